use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::AiGateway;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only: requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Model backend. `GeminiClient` in production, a stub in tests.
    pub gateway: Arc<dyn AiGateway>,
}
