use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable and deliberately small: the database pool is
/// the only shared resource, so no request-visible state can go stale
/// between requests.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: loretable_db::DbPool,
    /// Server configuration, including the JWT signing secret.
    pub config: Arc<ServerConfig>,
}
