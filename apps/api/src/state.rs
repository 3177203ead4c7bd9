use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing request-scoped lives here.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. Production: `GeminiClient`.
    pub llm: Arc<dyn ChatModel>,
    pub config: Config,
}
