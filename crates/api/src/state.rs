use std::sync::Arc;

use crate::config::ServerConfig;

/// Handler state. Storage is the only shared mutable state; admin identity
/// travels in each request's bearer token.
#[derive(Clone)]
pub struct AppState {
    pub pool: fds_db::DbPool,
    pub config: Arc<ServerConfig>,
}
