use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    config::AppConfig,
    error::ServiceError,
    services::llm::{ChatClient, LlmError, OpenAiClient},
};

pub type SharedState = Arc<AppState>;

/// Central application state: resolved configuration and the optional model client.
///
/// Immutable after startup; without a client the service runs in degraded mode
/// where only template generation is available.
pub struct AppState {
    config: AppConfig,
    llm: Option<Arc<dyn ChatClient>>,
}

impl AppState {
    /// Build the state from `config`, connecting the OpenAI client when a key is present.
    pub fn new(config: AppConfig) -> SharedState {
        let llm = match OpenAiClient::new(&config.llm) {
            Ok(client) => {
                info!(model = %config.llm.model, "language model client ready");
                Some(Arc::new(client) as Arc<dyn ChatClient>)
            }
            Err(LlmError::MissingApiKey) => {
                warn!("OPENAI_API_KEY not set; AI features disabled (degraded mode)");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to build language model client; AI features disabled");
                None
            }
        };
        Arc::new(Self { config, llm })
    }

    /// Build the state around an explicit client, or none.
    pub fn with_llm(config: AppConfig, llm: Option<Arc<dyn ChatClient>>) -> SharedState {
        Arc::new(Self { config, llm })
    }

    /// Resolved configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle to the model client, if one is configured.
    pub fn llm(&self) -> Option<Arc<dyn ChatClient>> {
        self.llm.clone()
    }

    /// Model client or [`ServiceError::AiUnavailable`].
    pub fn require_llm(&self) -> Result<Arc<dyn ChatClient>, ServiceError> {
        self.llm().ok_or(ServiceError::AiUnavailable)
    }

    /// Whether AI features are unavailable.
    pub fn is_degraded(&self) -> bool {
        self.llm.is_none()
    }
}
