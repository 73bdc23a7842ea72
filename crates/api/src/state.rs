use std::sync::Arc;

use warden_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable. The storage backend sits behind `Arc<dyn Store>` so the
/// same handlers serve the in-memory and PostgreSQL deployments.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
}
