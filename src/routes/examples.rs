use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};

use crate::{
    dto::{examples::ExamplesResponse, spec::ApiSpec},
    error::AppError,
    services::examples,
    state::SharedState,
};

/// Built-in example specifications.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/examples", get(list_examples))
        .route("/api/examples/{example_id}", get(get_example))
}

#[utoipa::path(
    get,
    path = "/api/examples",
    tag = "examples",
    responses((status = 200, description = "Available examples", body = ExamplesResponse))
)]
/// List the built-in example specifications.
pub async fn list_examples() -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: examples::list_examples(),
    })
}

#[utoipa::path(
    get,
    path = "/api/examples/{example_id}",
    tag = "examples",
    params(("example_id" = String, Path, description = "Example identifier")),
    responses(
        (status = 200, description = "Example specification", body = ApiSpec),
        (status = 404, description = "Unknown example")
    )
)]
/// Return the full specification of one example.
pub async fn get_example(Path(example_id): Path<String>) -> Result<Json<ApiSpec>, AppError> {
    let spec = examples::get_example(&example_id)?;
    Ok(Json(spec))
}
