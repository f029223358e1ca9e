use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::LlmBackend;
use crate::sections::TaskContext;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Model backend. `VertexClient` in production, a scripted double in tests.
    pub llm: Arc<dyn LlmBackend>,
    pub retry: RetryPolicy,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn LlmBackend>) -> Self {
        let retry = RetryPolicy::from_config(&config);
        Self { config, llm, retry }
    }

    /// Per-request handle for section tasks.
    pub fn tasks(&self) -> TaskContext {
        TaskContext {
            llm: self.llm.clone(),
            retry: self.retry.clone(),
            profiles: self.config.profiles,
        }
    }
}
