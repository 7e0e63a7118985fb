use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::CatalogSession;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The entry store and open submission wizards.
    pub catalog: Arc<CatalogSession>,
}
