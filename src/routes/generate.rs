use axum::{Json, Router, routing::post};
use axum_valid::Valid;

use crate::{
    dto::{
        generated::{DownloadResponse, GeneratedCode},
        spec::ApiSpec,
    },
    error::AppError,
    services::generation_service,
    state::SharedState,
};

/// Template generation endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/generate", post(generate_code))
        .route("/api/download", post(download_code))
}

#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generation",
    request_body = ApiSpec,
    responses(
        (status = 200, description = "Generated project sources", body = GeneratedCode),
        (status = 400, description = "Invalid specification"),
        (status = 500, description = "A template failed to render")
    )
)]
/// Generate the project described by the specification from templates.
pub async fn generate_code(
    Valid(Json(spec)): Valid<Json<ApiSpec>>,
) -> Result<Json<GeneratedCode>, AppError> {
    Ok(Json(generation_service::generate(&spec)?))
}

#[utoipa::path(
    post,
    path = "/api/download",
    tag = "generation",
    request_body = ApiSpec,
    responses(
        (status = 200, description = "Generated files keyed by file name", body = DownloadResponse),
        (status = 400, description = "Invalid specification"),
        (status = 500, description = "A template failed to render")
    )
)]
/// Generate the project and return it as a map of file names to contents.
pub async fn download_code(
    Valid(Json(spec)): Valid<Json<ApiSpec>>,
) -> Result<Json<DownloadResponse>, AppError> {
    Ok(Json(generation_service::download(&spec)?))
}
