use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        generated::{DownloadResponse, GeneratedCode},
        spec::ApiSpec,
    },
    error::ServiceError,
    services::codegen::{self, naming::project_name},
};

/// Message returned with every successful download.
pub const DOWNLOAD_MESSAGE: &str = "Code generated successfully";

/// Check field lengths, paths, version and route uniqueness of `spec`.
pub fn validate_spec(spec: &ApiSpec) -> Result<(), ServiceError> {
    spec.validate()
        .map_err(|err| ServiceError::InvalidInput(format!("validation failed: {err}")))
}

/// Generate every artifact of `spec` from templates.
pub fn generate(spec: &ApiSpec) -> Result<GeneratedCode, ServiceError> {
    info!(
        name = %spec.name,
        framework = spec.framework.display_name(),
        endpoints = spec.endpoints.len(),
        "generating project from templates"
    );
    Ok(codegen::generate_api(spec)?)
}

/// Generate `spec` and lay the artifacts out as named files.
pub fn download(spec: &ApiSpec) -> Result<DownloadResponse, ServiceError> {
    let files = generate(spec)?.into_files(spec.framework);
    Ok(DownloadResponse {
        success: true,
        message: DOWNLOAD_MESSAGE.to_string(),
        files,
        project_name: project_name(&spec.name),
    })
}
