use serde_json::Value;
use time::OffsetDateTime;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    dto::{
        ai::{
            AiFeatures, AiGeneratedSpec, AiStatusResponse, CodeReview, DEFAULT_CONFIDENCE,
            DEFAULT_REASONING, EndpointEnhancement, EndpointLogic, EnhanceResponse, EnhancedCode,
            GenerationMode, NaturalLanguageRequest,
        },
        format_timestamp,
        spec::{ApiSpec, Endpoint, Framework},
    },
    error::ServiceError,
    services::{
        codegen::{self, GenerationContext},
        llm::{ChatClient, parse::parse_reply, prompts},
    },
    state::SharedState,
};

/// Mode reported when the template generator stands in for an AI mode.
pub const FALLBACK_MODE: &str = "basic_fallback";

/// Ask the model to design an API from a prose description.
pub async fn generate_spec_from_description(
    state: &SharedState,
    request: &NaturalLanguageRequest,
) -> Result<AiGeneratedSpec, ServiceError> {
    let client = state.require_llm()?;
    info!(
        complexity = request.complexity.as_str(),
        include_auth = request.include_auth,
        "generating api spec from description"
    );

    let reply = client
        .complete(prompts::api_spec_request(request))
        .await?;
    let raw: Value = parse_reply(&reply)?;
    if !raw.is_object() {
        return Err(ServiceError::AiResponse(
            "expected a JSON object describing the API".into(),
        ));
    }
    Ok(normalize_generated_spec(raw))
}

/// Split a model reply into the spec and its commentary.
///
/// `spec` is only filled when the reply deserializes into a valid [`ApiSpec`].
fn normalize_generated_spec(raw: Value) -> AiGeneratedSpec {
    let reasoning = raw
        .get("reasoning")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(DEFAULT_REASONING)
        .to_string();
    let suggestions = raw
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let confidence_score = raw
        .get("confidence_score")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    let spec = match serde_json::from_value::<ApiSpec>(raw.clone()) {
        Ok(spec) => match spec.validate() {
            Ok(()) => Some(spec),
            Err(err) => {
                warn!(error = %err, "model spec failed validation");
                None
            }
        },
        Err(err) => {
            warn!(error = %err, "model spec does not match the expected shape");
            None
        }
    };

    AiGeneratedSpec {
        api_spec: raw,
        spec,
        reasoning,
        suggestions,
        confidence_score,
    }
}

/// Ask the model for the business logic of one endpoint.
///
/// Failures are logged and yield `None`; the endpoint then keeps its template body.
pub async fn enhance_endpoint(
    client: &dyn ChatClient,
    endpoint: &Endpoint,
    framework: Framework,
    api_context: &str,
) -> Option<EndpointEnhancement> {
    let request = prompts::endpoint_logic_request(endpoint, framework, api_context);
    let outcome = match client.complete(request).await {
        Ok(reply) => parse_reply::<EndpointLogic>(&reply),
        Err(err) => Err(err),
    };
    match outcome {
        Ok(logic) => Some(logic.into()),
        Err(err) => {
            warn!(
                method = %endpoint.method,
                path = %endpoint.path,
                error = %err,
                "endpoint enhancement failed"
            );
            None
        }
    }
}

/// Have the model review `code`, falling back to a neutral review on failure.
pub async fn review_code(client: &dyn ChatClient, code: &str, framework: Framework) -> CodeReview {
    let outcome = match client
        .complete(prompts::code_review_request(code, framework))
        .await
    {
        Ok(reply) => parse_reply::<CodeReview>(&reply),
        Err(err) => Err(err),
    };
    match outcome {
        Ok(mut review) => {
            review.quality_score = review.quality_score.clamp(0.0, 100.0);
            review
        }
        Err(err) => {
            warn!(error = %err, "code review failed; using fallback review");
            CodeReview::fallback(code)
        }
    }
}

/// Generate `spec` in the requested mode.
///
/// `template` never touches the model. The AI modes require a configured client,
/// review the main module and splice in the optimized code when the review has one.
pub async fn generate_enhanced(
    state: &SharedState,
    spec: &ApiSpec,
    mode: GenerationMode,
) -> Result<EnhancedCode, ServiceError> {
    if mode == GenerationMode::Template {
        return Ok(EnhancedCode {
            code: codegen::generate_api(spec)?,
            ai_review: None,
        });
    }

    let client = state.require_llm()?;
    info!(
        name = %spec.name,
        mode = mode.as_str(),
        endpoints = spec.endpoints.len(),
        "generating project with model assistance"
    );

    let mut enhanced_spec = spec.clone();
    let ctx = if mode == GenerationMode::FullyAi {
        let api_context = format!("{}: {}", spec.name, spec.description);
        let mut logic = Vec::with_capacity(spec.endpoints.len());
        for endpoint in &mut enhanced_spec.endpoints {
            let enhancement =
                enhance_endpoint(client.as_ref(), endpoint, spec.framework, &api_context).await;
            if let Some(enhancement) = &enhancement {
                if !enhancement.business_logic.trim().is_empty() {
                    endpoint.business_logic = Some(enhancement.business_logic.clone());
                }
            }
            logic.push(enhancement);
        }
        GenerationContext::new(&enhanced_spec).with_endpoint_logic(logic)
    } else {
        GenerationContext::new(&enhanced_spec).ai_enhanced()
    };

    let mut code = codegen::generate(&ctx)?;
    let review = review_code(client.as_ref(), &code.main_code, spec.framework).await;
    if !review.optimized_code.trim().is_empty() {
        code.main_code = review.optimized_code.clone();
    }

    Ok(EnhancedCode {
        code,
        ai_review: Some(review),
    })
}

/// Generate `spec` for `/api/ai/enhance-code`.
///
/// When the model is not configured the template generator is used instead and
/// the response says so through `mode` and `note`.
pub async fn enhance_code(
    state: &SharedState,
    spec: &ApiSpec,
    mode: GenerationMode,
) -> Result<EnhanceResponse, ServiceError> {
    let (data, mode, note) = match generate_enhanced(state, spec, mode).await {
        Ok(data) => (data, mode.as_str().to_string(), None),
        Err(ServiceError::AiUnavailable) => {
            warn!(mode = mode.as_str(), "model unavailable; falling back to templates");
            let data = EnhancedCode {
                code: codegen::generate_api(spec)?,
                ai_review: None,
            };
            let note = format!(
                "{}; generated with templates instead",
                ServiceError::AiUnavailable
            );
            (data, FALLBACK_MODE.to_string(), Some(note))
        }
        Err(err) => return Err(err),
    };

    Ok(EnhanceResponse {
        success: true,
        data,
        mode,
        generated_at: format_timestamp(OffsetDateTime::now_utc()),
        note,
    })
}

/// Which AI features are usable right now.
pub fn status(state: &SharedState) -> AiStatusResponse {
    let available = !state.is_degraded();
    AiStatusResponse {
        api_key_configured: available,
        model: state.config().llm.model.clone(),
        features: AiFeatures {
            natural_language_generation: available,
            code_enhancement: available,
            code_review: available,
        },
    }
}
