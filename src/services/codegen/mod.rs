//! Template expansion turning an [`ApiSpec`] into project source text.
//!
//! File skeletons live under `templates/` as askama templates. Each target
//! framework has a [`ProjectEmitter`] that builds their context; the README is shared.

mod documentation;
mod express;
mod fastapi;
mod flask;
mod literal;
pub mod naming;
mod python;
pub mod schema;

use askama::Template;
use time::OffsetDateTime;

use crate::dto::{
    ai::EndpointEnhancement,
    format_timestamp,
    generated::GeneratedCode,
    spec::{ApiSpec, AuthMethod, Database, Endpoint, Framework},
};

pub use express::ExpressEmitter;
pub use fastapi::FastApiEmitter;
pub use flask::FlaskEmitter;

/// Everything an emitter needs to render one project.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    pub spec: &'a ApiSpec,
    /// RFC 3339 timestamp written into file headers.
    pub generated_at: String,
    /// Model-written logic per endpoint, parallel to `spec.endpoints`.
    pub endpoint_logic: Vec<Option<EndpointEnhancement>>,
    /// Whether any part of the project went through the model.
    pub ai_enhanced: bool,
}

impl<'a> GenerationContext<'a> {
    /// Plain template context stamped with the current time.
    pub fn new(spec: &'a ApiSpec) -> Self {
        Self {
            spec,
            generated_at: format_timestamp(OffsetDateTime::now_utc()),
            endpoint_logic: Vec::new(),
            ai_enhanced: false,
        }
    }

    /// Attach per-endpoint model output and mark the context as AI-enhanced.
    pub fn with_endpoint_logic(mut self, logic: Vec<Option<EndpointEnhancement>>) -> Self {
        self.endpoint_logic = logic;
        self.ai_enhanced = true;
        self
    }

    /// Mark the context as AI-enhanced without endpoint logic.
    pub fn ai_enhanced(mut self) -> Self {
        self.ai_enhanced = true;
        self
    }

    /// Endpoints paired with their non-empty model-written handler body.
    pub fn endpoints(&self) -> impl Iterator<Item = (&'a Endpoint, Option<&str>)> + '_ {
        self.spec
            .endpoints
            .iter()
            .enumerate()
            .map(move |(index, endpoint)| (endpoint, self.ai_logic(index)))
    }

    fn ai_logic(&self, index: usize) -> Option<&str> {
        self.endpoint_logic
            .get(index)
            .and_then(Option::as_ref)
            .map(|logic| logic.ai_generated_logic.trim_end())
            .filter(|logic| !logic.trim().is_empty())
    }
}

/// Whether the generated handler for `endpoint` requires an authenticated caller.
///
/// Routes under `/auth` (register, login) stay public.
pub fn requires_auth(endpoint: &Endpoint, auth: AuthMethod) -> bool {
    auth.is_enabled()
        && !naming::resource_segment(&endpoint.path)
            .is_some_and(|segment| segment.eq_ignore_ascii_case("auth"))
}

/// Database and authentication switches read by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    pub sql: bool,
    pub sqlite: bool,
    pub postgres: bool,
    pub mysql: bool,
    pub mongo: bool,
    /// Any authentication at all.
    pub auth: bool,
    /// JWT or OAuth2 bearer tokens.
    pub tokens: bool,
    pub jwt: bool,
    pub oauth2: bool,
    pub api_key: bool,
}

impl Stack {
    /// Switches for the database and authentication of `spec`.
    pub fn of(spec: &ApiSpec) -> Self {
        let auth = spec.authentication;
        Self {
            sql: spec.database.is_sql(),
            sqlite: spec.database == Database::Sqlite,
            postgres: spec.database == Database::Postgresql,
            mysql: spec.database == Database::Mysql,
            mongo: spec.database == Database::Mongodb,
            auth: auth.is_enabled(),
            tokens: auth.uses_tokens(),
            jwt: auth == AuthMethod::Jwt,
            oauth2: auth == AuthMethod::Oauth2,
            api_key: auth == AuthMethod::ApiKey,
        }
    }
}

/// Render a whole file, ending with exactly one newline.
fn render_file(template: &impl Template) -> askama::Result<String> {
    let mut text = render_fragment(template)?;
    text.push('\n');
    Ok(text)
}

/// Render a piece spliced into another template, without trailing whitespace.
fn render_fragment(template: &impl Template) -> askama::Result<String> {
    let mut text = template.render()?;
    text.truncate(text.trim_end().len());
    Ok(text)
}

/// Renders the framework-specific files of a project.
pub trait ProjectEmitter: Send + Sync {
    /// Application entry point.
    fn main_code(&self, ctx: &GenerationContext<'_>) -> askama::Result<String>;
    /// Data models.
    fn models(&self, ctx: &GenerationContext<'_>) -> askama::Result<String>;
    /// Database connection setup.
    fn database(&self, ctx: &GenerationContext<'_>) -> askama::Result<String>;
    /// Dependency manifest.
    fn requirements(&self, ctx: &GenerationContext<'_>) -> askama::Result<String>;
}

/// Emitter for `framework`.
pub fn emitter_for(framework: Framework) -> &'static dyn ProjectEmitter {
    match framework {
        Framework::Fastapi => &FastApiEmitter,
        Framework::Flask => &FlaskEmitter,
        Framework::Express => &ExpressEmitter,
    }
}

/// Render every artifact of the project described by `ctx`.
pub fn generate(ctx: &GenerationContext<'_>) -> askama::Result<GeneratedCode> {
    let emitter = emitter_for(ctx.spec.framework);
    Ok(GeneratedCode {
        main_code: emitter.main_code(ctx)?,
        models: emitter.models(ctx)?,
        database: emitter.database(ctx)?,
        requirements: emitter.requirements(ctx)?,
        documentation: documentation::readme(ctx)?,
    })
}

/// Template-mode generation: no model involvement.
pub fn generate_api(spec: &ApiSpec) -> askama::Result<GeneratedCode> {
    generate(&GenerationContext::new(spec))
}

#[cfg(test)]
mod tests {
    use crate::services::examples;

    use super::*;

    #[test]
    fn every_framework_produces_all_artifacts() {
        for framework in [Framework::Fastapi, Framework::Flask, Framework::Express] {
            let mut spec = examples::get_example("ecommerce").unwrap();
            spec.framework = framework;
            let code = generate_api(&spec).unwrap();

            assert!(code.main_code.contains("E-commerce API"), "{framework:?}");
            assert!(!code.models.is_empty());
            assert!(!code.database.is_empty());
            assert!(!code.requirements.is_empty());
            assert!(code.documentation.starts_with("# E-commerce API"));
            for text in [&code.main_code, &code.models, &code.database, &code.requirements] {
                assert!(text.ends_with('\n') && !text.ends_with("\n\n"), "{framework:?}");
            }
        }
    }

    #[test]
    fn stack_switches_follow_the_spec() {
        let mut spec = examples::get_example("blog_system").unwrap();
        let stack = Stack::of(&spec);
        assert!(stack.sql && stack.mysql && stack.jwt && stack.tokens);
        assert!(!stack.mongo && !stack.api_key);

        spec.database = Database::Mongodb;
        spec.authentication = AuthMethod::ApiKey;
        let stack = Stack::of(&spec);
        assert!(stack.mongo && !stack.sql && stack.auth && stack.api_key && !stack.tokens);
    }

    #[test]
    fn endpoint_logic_is_looked_up_by_index() {
        let spec = examples::get_example("user_management").unwrap();
        let ctx = GenerationContext::new(&spec).with_endpoint_logic(vec![
            None,
            Some(EndpointEnhancement {
                ai_generated_logic: "  result = login()  ".into(),
                business_logic: String::new(),
            }),
            Some(EndpointEnhancement::default()),
        ]);

        let logic: Vec<_> = ctx.endpoints().map(|(_, logic)| logic).collect();
        assert_eq!(logic, [None, Some("  result = login()"), None, None]);
        assert!(ctx.ai_enhanced);
    }
}
