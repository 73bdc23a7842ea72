//! Handlers for the privilege resource.
//!
//! Same contract as the role resource minus associations: shared query
//! engine, shared status mapping, name uniqueness enforced at the storage
//! boundary.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use warden_core::error::CoreError;
use warden_core::privilege::{Privilege, PrivilegeInput};
use warden_core::query::{self, Sort, DEFAULT_PAGE, DEFAULT_SIZE};
use warden_core::validation;
use warden_db::Store;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/v1/privileges
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Privilege>>> {
    let sort = Sort::parse(params.sort.as_deref())?;
    if !params.is_paginated() {
        return Ok(Json(state.store.list_privileges(sort).await?));
    }

    let page = query::parse_page_token(params.page.as_deref().unwrap_or(DEFAULT_PAGE), "page")?;
    let size = query::parse_page_token(params.size.as_deref().unwrap_or(DEFAULT_SIZE), "size")?;
    let total = state.store.count_privileges().await?;
    let window = query::page_window(page, size, total)?;
    Ok(Json(state.store.page_privileges(window, sort).await?))
}

/// GET /api/v1/privileges/count
pub async fn count(State(state): State<AppState>) -> AppResult<Json<i64>> {
    Ok(Json(state.store.count_privileges().await?))
}

/// GET /api/v1/privileges/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Privilege>> {
    let id = query::parse_id(&raw_id)?;
    let privilege = state.store.find_privilege(id).await?.ok_or(CoreError::NotFound {
        entity: "privilege",
        id,
    })?;
    Ok(Json(privilege))
}

/// POST /api/v1/privileges
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<PrivilegeInput>,
) -> AppResult<impl IntoResponse> {
    let name = validation::validate_privilege_create(&input)?;
    let privilege = state.store.insert_privilege(&name).await?;

    tracing::info!(id = privilege.id, name = %privilege.name, "Privilege created");

    let location = format!("/api/v1/privileges/{}", privilege.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(privilege),
    ))
}

/// PUT /api/v1/privileges/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<PrivilegeInput>,
) -> AppResult<Json<Privilege>> {
    let id = query::parse_id(&raw_id)?;
    let (_, name) = validation::validate_privilege_update(&input)?;
    let privilege = state
        .store
        .update_privilege(id, &name)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "privilege",
            id,
        })?;

    tracing::info!(id = privilege.id, name = %privilege.name, "Privilege updated");

    Ok(Json(privilege))
}

/// DELETE /api/v1/privileges/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = query::parse_id(&raw_id)?;
    if !state.store.delete_privilege(id).await? {
        return Err(CoreError::NotFound {
            entity: "privilege",
            id,
        }
        .into());
    }

    tracing::info!(id, "Privilege deleted");

    Ok(StatusCode::NO_CONTENT)
}
