use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report `ok` when the model client is configured, `degraded` otherwise.
pub fn health_status(state: &SharedState) -> HealthResponse {
    if state.is_degraded() {
        warn!("language model unavailable (degraded mode)");
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
