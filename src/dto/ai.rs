//! DTOs exchanged by the AI-assisted generation endpoints and the model replies they parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dto::{generated::GeneratedCode, spec::ApiSpec};

/// Reasoning reported when the model omits one.
pub const DEFAULT_REASONING: &str = "AI generated result";
/// Confidence reported when the model omits one.
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
/// Quality score of the fallback review.
pub const FALLBACK_QUALITY_SCORE: f64 = 70.0;

/// How much of the generation is delegated to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Plain templates, no model calls.
    Template,
    /// Templates followed by a model review of the main code.
    #[default]
    AiAssisted,
    /// Model-written endpoint logic plus the review.
    FullyAi,
}

impl GenerationMode {
    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Template => "template",
            GenerationMode::AiAssisted => "ai_assisted",
            GenerationMode::FullyAi => "fully_ai",
        }
    }
}

/// Expected size of the API the model should design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl Complexity {
    /// Wire name of the complexity.
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

/// Natural-language requirements to turn into an [`ApiSpec`].
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct NaturalLanguageRequest {
    /// Requirements written in prose.
    #[validate(length(min = 10, max = 5000))]
    pub description: String,
    /// Business domain, e.g. e-commerce, education, healthcare.
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub complexity: Complexity,
    /// Whether the design should include authentication.
    #[serde(default = "default_true")]
    pub include_auth: bool,
    /// Whether the design should include administrator features.
    #[serde(default)]
    pub include_admin: bool,
}

fn default_true() -> bool {
    true
}

/// Specification synthesized by the model.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AiGeneratedSpec {
    /// Model reply exactly as parsed.
    #[schema(value_type = Object)]
    pub api_spec: Value,
    /// The reply normalized into a valid specification, when it conforms.
    pub spec: Option<ApiSpec>,
    pub reasoning: String,
    pub suggestions: Vec<String>,
    /// Self-reported confidence in `[0, 1]`.
    pub confidence_score: f64,
}

/// Response of `/api/ai/generate-from-description`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AiSpecResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub data: Value,
    pub spec: Option<ApiSpec>,
    pub reasoning: String,
    pub suggestions: Vec<String>,
    pub confidence_score: f64,
}

impl From<AiGeneratedSpec> for AiSpecResponse {
    fn from(generated: AiGeneratedSpec) -> Self {
        Self {
            success: true,
            data: generated.api_spec,
            spec: generated.spec,
            reasoning: generated.reasoning,
            suggestions: generated.suggestions,
            confidence_score: generated.confidence_score,
        }
    }
}

/// Model reply describing the business logic of one endpoint.
///
/// `implementation` and `database_operations` end up in the generated project;
/// the remaining sections are kept as the model wrote them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EndpointLogic {
    pub implementation: String,
    pub validation: Value,
    pub error_handling: Value,
    pub database_operations: String,
    pub response_formatting: Value,
    pub test_cases: Value,
}

/// AI-written additions attached to one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointEnhancement {
    /// Handler body produced by the model.
    pub ai_generated_logic: String,
    /// Database operations described by the model.
    pub business_logic: String,
}

impl From<EndpointLogic> for EndpointEnhancement {
    fn from(logic: EndpointLogic) -> Self {
        Self {
            ai_generated_logic: logic.implementation,
            business_logic: logic.database_operations,
        }
    }
}

/// One finding of a code review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewIssue {
    /// security, performance, style or logic.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// low, medium, high or critical.
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub suggestion: String,
}

/// Review of generated code returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CodeReview {
    #[serde(default = "fallback_quality_score")]
    pub quality_score: f64,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
    #[serde(default)]
    pub optimized_code: String,
    #[serde(default)]
    pub performance_tips: Vec<String>,
    #[serde(default)]
    pub security_recommendations: Vec<String>,
}

impl CodeReview {
    /// Review used when the model is unavailable or its reply is unusable.
    pub fn fallback(code: &str) -> Self {
        Self {
            quality_score: FALLBACK_QUALITY_SCORE,
            issues: Vec::new(),
            optimized_code: code.to_string(),
            performance_tips: Vec::new(),
            security_recommendations: Vec::new(),
        }
    }
}

fn fallback_quality_score() -> f64 {
    FALLBACK_QUALITY_SCORE
}

/// Generated files plus the optional model review.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnhancedCode {
    #[serde(flatten)]
    pub code: GeneratedCode,
    pub ai_review: Option<CodeReview>,
}

/// Query string of `/api/ai/enhance-code`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EnhanceQuery {
    /// Generation mode; defaults to `ai_assisted`.
    #[serde(default)]
    pub mode: GenerationMode,
}

/// Response of `/api/ai/enhance-code`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnhanceResponse {
    pub success: bool,
    pub data: EnhancedCode,
    /// Mode actually used: a [`GenerationMode`] name or `basic_fallback`.
    pub mode: String,
    /// RFC 3339 timestamp of the generation.
    pub generated_at: String,
    /// Why the template generator was used instead of the requested mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Which AI features can currently be used.
#[derive(Debug, Serialize, ToSchema)]
pub struct AiFeatures {
    pub natural_language_generation: bool,
    pub code_enhancement: bool,
    pub code_review: bool,
}

/// Response of `/api/ai/status`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AiStatusResponse {
    pub api_key_configured: bool,
    /// Chat model used for completions.
    pub model: String,
    pub features: AiFeatures,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn natural_language_request_defaults() {
        let request: NaturalLanguageRequest =
            serde_json::from_value(json!({"description": "A library lending service"})).unwrap();
        assert_eq!(request.complexity, Complexity::Medium);
        assert!(request.include_auth);
        assert!(!request.include_admin);
        assert!(request.domain.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn short_descriptions_are_rejected() {
        let request: NaturalLanguageRequest =
            serde_json::from_value(json!({"description": "todo"})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn review_tolerates_missing_fields() {
        let review: CodeReview = serde_json::from_value(json!({
            "issues": [{"type": "security", "severity": "high"}]
        }))
        .unwrap();
        assert_eq!(review.quality_score, FALLBACK_QUALITY_SCORE);
        assert_eq!(review.issues[0].kind, "security");
        assert!(review.optimized_code.is_empty());
    }

    #[test]
    fn enhanced_code_flattens_generated_files() {
        let enhanced = EnhancedCode {
            code: GeneratedCode {
                main_code: "m".into(),
                models: "o".into(),
                database: "d".into(),
                requirements: "r".into(),
                documentation: "x".into(),
            },
            ai_review: None,
        };
        let value = serde_json::to_value(enhanced).unwrap();
        assert_eq!(value["main_code"], "m");
        assert!(value["ai_review"].is_null());
    }

    #[test]
    fn generation_mode_uses_snake_case() {
        let mode: GenerationMode = serde_json::from_value(json!("fully_ai")).unwrap();
        assert_eq!(mode, GenerationMode::FullyAi);
        assert_eq!(GenerationMode::default().as_str(), "ai_assisted");
    }
}
