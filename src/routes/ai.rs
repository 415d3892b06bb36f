use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::{
        ai::{AiSpecResponse, AiStatusResponse, EnhanceQuery, EnhanceResponse, NaturalLanguageRequest},
        spec::ApiSpec,
    },
    error::AppError,
    services::ai_service,
    state::SharedState,
};

/// Model-assisted endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/ai/generate-from-description",
            post(generate_from_description),
        )
        .route("/api/ai/enhance-code", post(enhance_code))
        .route("/api/ai/status", get(ai_status))
}

#[utoipa::path(
    post,
    path = "/api/ai/generate-from-description",
    tag = "ai",
    request_body = NaturalLanguageRequest,
    responses(
        (status = 200, description = "Specification designed by the model", body = AiSpecResponse),
        (status = 400, description = "Description too short or too long"),
        (status = 500, description = "Model call failed or returned malformed JSON"),
        (status = 503, description = "No model configured")
    )
)]
/// Design an API specification from a prose description.
pub async fn generate_from_description(
    State(state): State<SharedState>,
    Valid(Json(request)): Valid<Json<NaturalLanguageRequest>>,
) -> Result<Json<AiSpecResponse>, AppError> {
    let generated = ai_service::generate_spec_from_description(&state, &request).await?;
    Ok(Json(generated.into()))
}

#[utoipa::path(
    post,
    path = "/api/ai/enhance-code",
    tag = "ai",
    params(EnhanceQuery),
    request_body = ApiSpec,
    responses(
        (status = 200, description = "Generated and reviewed project sources", body = EnhanceResponse),
        (status = 400, description = "Invalid specification or unknown mode"),
        (status = 500, description = "Model call failed")
    )
)]
/// Generate the project with model assistance, falling back to templates without a model.
pub async fn enhance_code(
    State(state): State<SharedState>,
    query: Result<Query<EnhanceQuery>, QueryRejection>,
    Valid(Json(spec)): Valid<Json<ApiSpec>>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let response = ai_service::enhance_code(&state, &spec, query.mode).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/ai/status",
    tag = "ai",
    responses((status = 200, description = "Availability of AI features", body = AiStatusResponse))
)]
/// Report whether the model is configured and which features it enables.
pub async fn ai_status(State(state): State<SharedState>) -> Json<AiStatusResponse> {
    Json(ai_service::status(&state))
}
