//! Handlers for the role resource.
//!
//! The orchestration point: each handler sequences query parsing or write
//! classification, privilege-reference resolution, and the storage call, and
//! lets [`crate::error::AppError`] map the outcome to a status code.

use std::collections::BTreeSet;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use warden_core::error::CoreError;
use warden_core::query::{self, Sort, DEFAULT_PAGE, DEFAULT_SIZE};
use warden_core::role::{Role, RoleInput};
use warden_core::types::DbId;
use warden_core::validation;
use warden_db::Store;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/v1/roles
///
/// Plain, paginated, and/or sorted listing. Sort legality is checked before
/// pagination; any illegal component fails the whole request.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Role>>> {
    let sort = Sort::parse(params.sort.as_deref())?;
    if !params.is_paginated() {
        return Ok(Json(state.store.list_roles(sort).await?));
    }

    let page = query::parse_page_token(params.page.as_deref().unwrap_or(DEFAULT_PAGE), "page")?;
    let size = query::parse_page_token(params.size.as_deref().unwrap_or(DEFAULT_SIZE), "size")?;
    let total = state.store.count_roles().await?;
    let window = query::page_window(page, size, total)?;
    Ok(Json(state.store.page_roles(window, sort).await?))
}

/// GET /api/v1/roles/count
pub async fn count(State(state): State<AppState>) -> AppResult<Json<i64>> {
    Ok(Json(state.store.count_roles().await?))
}

/// GET /api/v1/roles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Role>> {
    let id = query::parse_id(&raw_id)?;
    let role = state
        .store
        .find_role(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "role", id })?;
    Ok(Json(role))
}

/// POST /api/v1/roles
///
/// 201 with a `Location` header addressing the new resource, and the created
/// role (with its server-assigned id) as the body.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<RoleInput>,
) -> AppResult<impl IntoResponse> {
    let name = validation::validate_role_create(&input)?;
    let privilege_ids = resolve_privileges(state.store.as_ref(), &input).await?;
    let role = state.store.insert_role(&name, &privilege_ids).await?;

    tracing::info!(id = role.id, name = %role.name, "Role created");

    let location = format!("/api/v1/roles/{}", role.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(role),
    ))
}

/// PUT /api/v1/roles/{id}
///
/// The row is addressed by the path id; the body id must be present but the
/// persisted id never changes.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<RoleInput>,
) -> AppResult<Json<Role>> {
    let id = query::parse_id(&raw_id)?;
    let (_, name) = validation::validate_role_update(&input)?;
    let privilege_ids = resolve_privileges(state.store.as_ref(), &input).await?;
    let role = state
        .store
        .update_role(id, &name, &privilege_ids)
        .await?
        .ok_or(CoreError::NotFound { entity: "role", id })?;

    tracing::info!(id = role.id, name = %role.name, "Role updated");

    Ok(Json(role))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = query::parse_id(&raw_id)?;
    if !state.store.delete_role(id).await? {
        return Err(CoreError::NotFound { entity: "role", id }.into());
    }

    tracing::info!(id, "Role deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the payload's privilege references to persisted ids.
///
/// A reference with a null id, or an id no persisted privilege carries, is a
/// conflict — even when its name would also fail a shape check. Identical
/// references collapse to one (set semantics).
async fn resolve_privileges(store: &dyn Store, input: &RoleInput) -> Result<Vec<DbId>, AppError> {
    let mut ids = BTreeSet::new();
    for reference in &input.privileges {
        let id = reference.id.ok_or_else(|| {
            CoreError::Conflict("role references an unpersisted privilege".to_string())
        })?;
        if store.find_privilege(id).await?.is_none() {
            return Err(CoreError::Conflict(format!("no persisted privilege with id {id}")).into());
        }
        ids.insert(id);
    }
    Ok(ids.into_iter().collect())
}
