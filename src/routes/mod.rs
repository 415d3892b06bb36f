use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod ai;
pub mod examples;
pub mod generate;
pub mod health;

/// Compose all route trees with the Swagger UI and wire in the shared state.
pub fn router(state: SharedState) -> Router<()> {
    let docs: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    health::router()
        .merge(generate::router())
        .merge(examples::router())
        .merge(ai::router())
        .merge(docs)
        .with_state(state)
}
