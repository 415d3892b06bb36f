//! Prompt templates for the three model-backed features.

use crate::dto::{
    ai::NaturalLanguageRequest,
    spec::{Endpoint, Framework},
};

use super::client::{ChatMessage, ChatRequest};

const SPEC_SYSTEM: &str =
    "You are an expert API designer. Always respond with valid JSON only.";
const LOGIC_SYSTEM: &str =
    "You are a senior backend developer. Produce production-quality code.";
const REVIEW_SYSTEM: &str =
    "You are a code review expert. Give objective, constructive feedback.";

/// Ask the model to design a full specification from prose requirements.
pub fn api_spec_request(request: &NaturalLanguageRequest) -> ChatRequest {
    let domain = request
        .domain
        .as_deref()
        .map(str::trim)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("general");
    let auth = if request.include_auth {
        "include authentication (register/login) and protect write operations"
    } else {
        "do not include authentication; set \"authentication\" to \"none\""
    };
    let admin = if request.include_admin {
        "include administrator endpoints for managing resources"
    } else {
        "do not include administrator endpoints"
    };

    let prompt = format!(
        r#"Design a complete REST API specification for the following requirements.

Requirements: {description}
Domain: {domain}
Complexity: {complexity}
Authentication: {auth}
Administration: {admin}

Respond in this JSON format:
{{
    "api_name": "API name",
    "description": "API description",
    "version": "1.0.0",
    "framework": "fastapi",
    "database": "postgresql",
    "authentication": "jwt",
    "endpoints": [
        {{
            "path": "/api/resource",
            "method": "GET|POST|PUT|DELETE|PATCH",
            "description": "What the endpoint does",
            "parameters": "Parameter description",
            "request_body": "Example request body as a JSON string",
            "responses": "Example response as a JSON string",
            "tags": ["tag1", "tag2"],
            "business_logic": "Detailed business rules of this endpoint"
        }}
    ],
    "reasoning": "Why the API is designed this way",
    "suggestions": ["Further points to consider"],
    "confidence_score": 0.95
}}

Design considerations:
1. Follow RESTful principles
2. Use appropriate HTTP status codes
3. Account for security (authentication, authorization)
4. Keep the structure extensible
5. Make the business logic realistically implementable

The response must contain valid JSON only."#,
        description = request.description.trim(),
        complexity = request.complexity.as_str(),
    );

    ChatRequest {
        messages: vec![ChatMessage::system(SPEC_SYSTEM), ChatMessage::user(prompt)],
        temperature: 0.7,
        max_tokens: 3000,
    }
}

/// Ask the model for the business logic of a single endpoint.
pub fn endpoint_logic_request(
    endpoint: &Endpoint,
    framework: Framework,
    api_context: &str,
) -> ChatRequest {
    let language = language_of(framework);
    let prompt = format!(
        r#"Write the detailed business logic of the following API endpoint as {language} code for {framework}.

Endpoint: {method} {path}: {description}
API context: {api_context}

Respond in this format:
{{
    "implementation": "Complete handler body code",
    "validation": "Input validation logic",
    "error_handling": "Error handling logic",
    "database_operations": "Database access code",
    "response_formatting": "Response formatting code",
    "test_cases": "Example test cases"
}}

The code must be production quality and include:
- proper error handling
- input validation
- logging
- security considerations
- performance awareness

The response must contain valid JSON only."#,
        framework = framework.display_name(),
        method = endpoint.method,
        path = endpoint.path,
        description = endpoint.description,
    );

    ChatRequest {
        messages: vec![ChatMessage::system(LOGIC_SYSTEM), ChatMessage::user(prompt)],
        temperature: 0.3,
        max_tokens: 2000,
    }
}

/// Ask the model to review and optimize generated code.
pub fn code_review_request(code: &str, framework: Framework) -> ChatRequest {
    let language = language_of(framework);
    let fence = if framework.is_python() {
        "python"
    } else {
        "javascript"
    };
    let prompt = format!(
        r#"Review the following {framework} code and suggest improvements.

Code:
```{fence}
{code}
```

Respond in this format:
{{
    "quality_score": 85,
    "issues": [
        {{
            "type": "security|performance|style|logic",
            "description": "Problem description",
            "severity": "low|medium|high|critical",
            "suggestion": "How to fix it"
        }}
    ],
    "optimized_code": "Improved {language} code",
    "performance_tips": ["Performance tips"],
    "security_recommendations": ["Security recommendations"]
}}

Review criteria:
1. Code quality and readability
2. Security vulnerabilities
3. Performance opportunities
4. Completeness of error handling
5. Testability

The response must contain valid JSON only."#,
        framework = framework.display_name(),
    );

    ChatRequest {
        messages: vec![ChatMessage::system(REVIEW_SYSTEM), ChatMessage::user(prompt)],
        temperature: 0.2,
        max_tokens: 2500,
    }
}

fn language_of(framework: Framework) -> &'static str {
    if framework.is_python() {
        "Python"
    } else {
        "JavaScript"
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::{ai::Complexity, spec::HttpMethod};

    use super::*;

    #[test]
    fn spec_prompt_carries_request_fields() {
        let request = NaturalLanguageRequest {
            description: "A service for booking meeting rooms".into(),
            domain: Some("office".into()),
            complexity: Complexity::Simple,
            include_auth: false,
            include_admin: true,
        };
        let chat = api_spec_request(&request);
        let prompt = &chat.messages[1].content;

        assert!(prompt.contains("Requirements: A service for booking meeting rooms"));
        assert!(prompt.contains("Domain: office"));
        assert!(prompt.contains("Complexity: simple"));
        assert!(prompt.contains("\"authentication\" to \"none\""));
        assert!(prompt.contains("include administrator endpoints"));
        assert_eq!(chat.temperature, 0.7);
        assert_eq!(chat.max_tokens, 3000);
    }

    #[test]
    fn missing_domain_falls_back_to_general() {
        let request = NaturalLanguageRequest {
            description: "A service for booking meeting rooms".into(),
            domain: None,
            complexity: Complexity::Medium,
            include_auth: true,
            include_admin: false,
        };
        let chat = api_spec_request(&request);
        assert!(chat.messages[1].content.contains("Domain: general"));
    }

    #[test]
    fn logic_prompt_names_the_endpoint() {
        let endpoint = Endpoint {
            path: "/api/users/{user_id}".into(),
            method: HttpMethod::Delete,
            description: "Delete a user".into(),
            parameters: None,
            request_body: None,
            responses: None,
            business_logic: None,
            tags: vec![],
        };
        let chat = endpoint_logic_request(&endpoint, Framework::Express, "Users: manage users");
        let prompt = &chat.messages[1].content;
        assert!(prompt.contains("Endpoint: DELETE /api/users/{user_id}: Delete a user"));
        assert!(prompt.contains("JavaScript code for Express.js"));
        assert!(prompt.contains("API context: Users: manage users"));
        assert_eq!(chat.max_tokens, 2000);
    }

    #[test]
    fn review_prompt_embeds_the_code() {
        let chat = code_review_request("print('hi')", Framework::Fastapi);
        let prompt = &chat.messages[1].content;
        assert!(prompt.contains("```python\nprint('hi')\n```"));
        assert_eq!(chat.temperature, 0.2);
    }
}
