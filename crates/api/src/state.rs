use std::sync::Arc;

use longpoll_core::{JobRegistry, WorkUnit};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (all fields are behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Registry of submitted jobs, shared by every presentation style.
    pub registry: Arc<JobRegistry>,
    /// Source of work unit invocations.
    pub work: Arc<dyn WorkUnit>,
}
