use std::sync::Arc;

use crate::clock::Clock;
use crate::config::ServerConfig;
use crate::upstream::AvailabilityApi;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the remote availability API, the system of record.
    pub availability: Arc<dyn AvailabilityApi>,
    /// Supplies "today" once per request.
    pub clock: Arc<dyn Clock>,
}
