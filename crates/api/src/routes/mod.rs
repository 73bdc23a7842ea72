pub mod health;
pub mod privilege;
pub mod role;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /roles                 list, create
/// /roles/count           count
/// /roles/{id}            get, update, delete
///
/// /privileges            list, create
/// /privileges/count      count
/// /privileges/{id}       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/roles", role::router())
        .nest("/privileges", privilege::router())
}
