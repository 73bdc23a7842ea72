//! Route definitions for the role resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::role;
use crate::state::AppState;

/// Routes mounted at `/roles`.
///
/// ```text
/// GET    /          -> list (plain, ?page=&size=, ?sort=field,dir)
/// POST   /          -> create
/// GET    /count     -> count
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(role::list).post(role::create))
        .route("/count", get(role::count))
        .route(
            "/{id}",
            get(role::get_by_id).put(role::update).delete(role::delete),
        )
}
