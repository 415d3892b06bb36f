use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// Every feature, AI included, is available.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// Template generation works but the language model is not configured.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
