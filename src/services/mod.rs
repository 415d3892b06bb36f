/// Model-assisted specification design, endpoint enhancement and code review.
pub mod ai_service;
/// Template expansion for every supported framework.
pub mod codegen;
/// OpenAPI documentation generation.
pub mod documentation;
/// Built-in example specifications.
pub mod examples;
/// Template-mode generation and downloads.
pub mod generation_service;
/// Health check service.
pub mod health_service;
/// Chat-completion client, prompts and reply parsing.
pub mod llm;
