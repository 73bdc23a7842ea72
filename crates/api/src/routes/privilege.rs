//! Route definitions for the privilege resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::privilege;
use crate::state::AppState;

/// Routes mounted at `/privileges`, mirroring the role resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(privilege::list).post(privilege::create))
        .route("/count", get(privilege::count))
        .route(
            "/{id}",
            get(privilege::get_by_id)
                .put(privilege::update)
                .delete(privilege::delete),
        )
}
