//! Markdown README shared by every framework.

use askama::Template;

use crate::dto::spec::{Endpoint, Framework, HttpMethod};

use super::{GenerationContext, naming::docker_image_name, render_file};

/// Response example shown for endpoints that do not declare one.
const DEFAULT_RESPONSE: &str = r#"{"success": true, "data": {}, "timestamp": "2024-01-01T00:00:00"}"#;

/// One endpoint section; empty strings are left out of the page.
struct EndpointDoc {
    method: HttpMethod,
    path: String,
    description: String,
    tags: String,
    parameters: String,
    request_body: String,
    response: String,
    business_logic: String,
    ai_written: bool,
}

impl EndpointDoc {
    fn new(endpoint: &Endpoint, logic: Option<&str>) -> Self {
        let text = |value: Option<&str>| value.unwrap_or_default().to_string();
        Self {
            method: endpoint.method,
            path: endpoint.path.clone(),
            description: endpoint.description.clone(),
            tags: endpoint.tags.join(", "),
            parameters: text(endpoint.parameters_text()),
            request_body: text(endpoint.request_body_text()),
            response: endpoint.responses_text().unwrap_or(DEFAULT_RESPONSE).to_string(),
            business_logic: text(endpoint.business_logic_text()),
            ai_written: logic.is_some(),
        }
    }
}

#[derive(Template)]
#[template(path = "README.md.txt", escape = "none")]
struct ReadmeTemplate {
    name: String,
    version: String,
    generated_at: String,
    description: String,
    framework: &'static str,
    database: &'static str,
    auth_name: &'static str,
    auth: bool,
    python: bool,
    fastapi: bool,
    endpoints: Vec<EndpointDoc>,
    port: u16,
    image: String,
    ai_enhanced: bool,
}

/// Render the project README.
pub fn readme(ctx: &GenerationContext<'_>) -> askama::Result<String> {
    let spec = ctx.spec;
    render_file(&ReadmeTemplate {
        name: spec.name.clone(),
        version: spec.version.clone(),
        generated_at: ctx.generated_at.clone(),
        description: spec.description.clone(),
        framework: spec.framework.display_name(),
        database: spec.database.display_name(),
        auth_name: spec.authentication.display_name(),
        auth: spec.authentication.is_enabled(),
        python: spec.framework.is_python(),
        fastapi: spec.framework == Framework::Fastapi,
        endpoints: ctx
            .endpoints()
            .map(|(endpoint, logic)| EndpointDoc::new(endpoint, logic))
            .collect(),
        port: port_of(spec.framework),
        image: docker_image_name(&spec.name),
        ai_enhanced: ctx.ai_enhanced,
    })
}

fn port_of(framework: Framework) -> u16 {
    match framework {
        Framework::Fastapi => 8000,
        Framework::Flask => 5000,
        Framework::Express => 3000,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        dto::{ai::EndpointEnhancement, spec::AuthMethod},
        services::examples,
    };

    use super::*;

    #[test]
    fn readme_lists_every_endpoint() {
        let spec = examples::get_example("user_management").unwrap();
        let doc = readme(&GenerationContext::new(&spec)).unwrap();

        assert!(doc.starts_with("# User Management API\n"));
        assert!(doc.contains("- **Framework**: FastAPI"));
        assert!(doc.contains("- **Database**: PostgreSQL"));
        assert!(doc.contains("### POST /api/auth/register"));
        assert!(doc.contains("### GET /api/users/{user_id}"));
        assert!(doc.contains("**Tags**: users"));
        assert!(doc.contains("This API uses JWT authentication."));
        assert!(doc.contains("docker build -t user-management-api ."));
        assert!(doc.contains("# 1. Install dependencies\npip install -r requirements.txt\n\n"));
        assert!(doc.contains("```\n\nInteractive documentation is served at `/docs`"));
        assert!(doc.ends_with("docker run -p 8000:8000 user-management-api\n```\n"));
        assert!(!doc.contains("## AI features"));
    }

    #[test]
    fn placeholders_are_skipped_and_default_response_used() {
        let mut spec = examples::get_example("blog_system").unwrap();
        spec.endpoints[0].responses = Some("none".into());
        spec.authentication = AuthMethod::None;
        let doc = readme(&GenerationContext::new(&spec)).unwrap();

        let section = &doc[doc.find("### GET /api/posts\n").unwrap()..];
        let section = &section[..section.find("---").unwrap()];
        assert!(!section.contains("**Request body**"));
        assert!(section.contains(&format!("**Response**:\n\n```json\n{DEFAULT_RESPONSE}\n```\n")));
        assert!(doc.contains("No authentication is required."));
    }

    #[test]
    fn express_projects_use_npm() {
        let mut spec = examples::get_example("ecommerce").unwrap();
        spec.framework = Framework::Express;
        let doc = readme(&GenerationContext::new(&spec)).unwrap();

        assert!(doc.contains("```bash\nnpm test\ncurl http://localhost:3000/health\n```"));
        assert!(doc.contains("# 3. Start the server\nnpm start\n```\n\n## Endpoints\n"));
        assert!(!doc.contains("/redoc"));
    }

    #[test]
    fn ai_sections_appear_when_enhanced() {
        let spec = examples::get_example("ecommerce").unwrap();
        let mut logic = vec![None; spec.endpoints.len()];
        logic[1] = Some(EndpointEnhancement {
            ai_generated_logic: "return product".into(),
            business_logic: String::new(),
        });
        let doc = readme(&GenerationContext::new(&spec).with_endpoint_logic(logic)).unwrap();

        assert!(doc.contains("## AI features"));
        assert!(doc.ends_with("Review AI-written code before deploying it.\n"));
        assert_eq!(doc.matches("**AI-generated logic**").count(), 1);
    }
}
