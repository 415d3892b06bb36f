use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the scaffolding service.
#[openapi(
    info(title = "API Scaffold", description = "Generate API projects from declarative specifications"),
    paths(
        crate::routes::health::healthcheck,
        crate::routes::generate::generate_code,
        crate::routes::generate::download_code,
        crate::routes::examples::list_examples,
        crate::routes::examples::get_example,
        crate::routes::ai::generate_from_description,
        crate::routes::ai::enhance_code,
        crate::routes::ai::ai_status,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::spec::ApiSpec,
            crate::dto::spec::Endpoint,
            crate::dto::spec::HttpMethod,
            crate::dto::spec::Framework,
            crate::dto::spec::Database,
            crate::dto::spec::AuthMethod,
            crate::dto::generated::GeneratedCode,
            crate::dto::generated::DownloadResponse,
            crate::dto::examples::ExampleSummary,
            crate::dto::examples::ExamplesResponse,
            crate::dto::ai::NaturalLanguageRequest,
            crate::dto::ai::Complexity,
            crate::dto::ai::GenerationMode,
            crate::dto::ai::AiSpecResponse,
            crate::dto::ai::CodeReview,
            crate::dto::ai::ReviewIssue,
            crate::dto::ai::EnhancedCode,
            crate::dto::ai::EnhanceResponse,
            crate::dto::ai::AiFeatures,
            crate::dto::ai::AiStatusResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "generation", description = "Template code generation"),
        (name = "examples", description = "Built-in example specifications"),
        (name = "ai", description = "Model-assisted design and generation"),
    )
)]
pub struct ApiDoc;
