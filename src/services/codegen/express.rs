//! Express.js project emitter.

use askama::Template;

use crate::dto::spec::{Endpoint, HttpMethod};

use super::{
    GenerationContext, ProjectEmitter, Stack,
    literal::{comment_safe, dedent, has_return, indent, quoted},
    naming::{
        camel_case, docker_image_name, express_route, extract_path_params, is_numeric_param,
        unique_function_names,
    },
    render_file, render_fragment, requires_auth,
    schema::{ModelPlan, plan_models},
};

/// Renders Express + Sequelize (or Mongoose) projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressEmitter;

/// Block comment opening every generated module.
#[derive(Template)]
#[template(path = "express/header.txt", escape = "none")]
struct Header {
    title: String,
    description: Vec<String>,
    ai_enhanced: bool,
    generated_at: String,
}

impl Header {
    fn render_for(ctx: &GenerationContext<'_>, title: &str) -> askama::Result<String> {
        render_fragment(&Header {
            title: comment_safe(&format!("{} {title}", ctx.spec.name)),
            description: ctx.spec.description.lines().map(comment_safe).collect(),
            ai_enhanced: ctx.ai_enhanced,
            generated_at: ctx.generated_at.clone(),
        })
    }
}

/// Placeholder logic assigning `result` for the endpoint's method.
#[derive(Template)]
#[template(path = "express/default_logic.txt", escape = "none")]
struct DefaultLogic {
    comment: &'static str,
    resource_id: String,
    data: &'static str,
}

impl DefaultLogic {
    fn new(method: HttpMethod, params: &[String]) -> Self {
        let id_expr = params.first().map(|param| {
            if is_numeric_param(param) {
                format!("Number(req.params.{param})")
            } else {
                format!("req.params.{param}")
            }
        });
        let (comment, data) = match method {
            HttpMethod::Get if id_expr.is_some() => (
                "Fetch a single resource",
                "{ id: resourceId, message: \"Resource found\" }",
            ),
            HttpMethod::Get => ("List resources", "{ items: [], total: 0, page: 1, limit: 10 }"),
            HttpMethod::Post => (
                "Create a new resource",
                "{ id: 1, ...payload, message: \"Resource created\" }",
            ),
            HttpMethod::Put | HttpMethod::Patch => (
                "Update the resource",
                "{ id: resourceId, message: \"Resource updated\" }",
            ),
            HttpMethod::Delete => (
                "Delete the resource",
                "{ id: resourceId, message: \"Resource deleted\" }",
            ),
        };
        let resource_id = match method {
            HttpMethod::Post => None,
            HttpMethod::Put | HttpMethod::Patch => id_expr.or_else(|| Some("payload.id".into())),
            HttpMethod::Delete => id_expr.or_else(|| Some("null".into())),
            HttpMethod::Get => id_expr,
        };

        Self {
            comment,
            resource_id: resource_id.unwrap_or_default(),
            data,
        }
    }
}

/// One endpoint as `app.js` sees it.
struct Handler {
    name: String,
    method: HttpMethod,
    route: String,
    doc: Vec<String>,
    log_message: String,
    /// Request model checked by `missingFields`, empty when none was inferred.
    body_model: String,
    requires_auth: bool,
    logic: String,
    logic_returns: bool,
    fallback: String,
}

impl Handler {
    fn new(
        ctx: &GenerationContext<'_>,
        plan: &ModelPlan,
        index: usize,
        function_name: &str,
        endpoint: &Endpoint,
        logic: Option<&str>,
    ) -> askama::Result<Self> {
        let fallback = match logic {
            Some(_) => String::new(),
            None => render_fragment(&DefaultLogic::new(
                endpoint.method,
                &extract_path_params(&endpoint.path),
            ))?,
        };
        let mut doc = endpoint.description.lines().map(comment_safe).collect::<Vec<_>>();
        if let Some(parameters) = endpoint.parameters_text() {
            doc.extend(format!("Parameters: {parameters}").lines().map(comment_safe));
        }
        if let Some(responses) = endpoint.responses_text() {
            doc.extend(format!("Returns: {responses}").lines().map(comment_safe));
        }

        Ok(Self {
            name: camel_case(function_name),
            method: endpoint.method,
            route: quoted(&express_route(&endpoint.path)),
            doc,
            log_message: quoted(&format!("{} {} called", endpoint.method, endpoint.path)),
            body_model: plan
                .request_for(index)
                .map(|model| model.class_name.clone())
                .unwrap_or_default(),
            requires_auth: requires_auth(endpoint, ctx.spec.authentication),
            logic: logic.map(|logic| indent(&dedent(logic), 4)).unwrap_or_default(),
            logic_returns: logic.is_some_and(has_return),
            fallback,
        })
    }

    fn has_body(&self) -> bool {
        self.method.has_body()
    }

    fn creates(&self) -> bool {
        self.method == HttpMethod::Post
    }
}

#[derive(Template)]
#[template(path = "express/app.js.txt", escape = "none")]
struct AppTemplate {
    header: String,
    stack: Stack,
    title: String,
    version: String,
    welcome: String,
    ai_enhanced: bool,
    generated_at: String,
    /// Project name as it may appear inside a template literal.
    listen_name: String,
    handlers: Vec<Handler>,
}

#[derive(Template)]
#[template(path = "express/models.js.txt", escape = "none")]
struct ModelsTemplate {
    header: String,
    stack: Stack,
    plan: ModelPlan,
}

#[derive(Template)]
#[template(path = "express/database.js.txt", escape = "none")]
struct DatabaseTemplate {
    header: String,
    stack: Stack,
    url: String,
}

#[derive(Template)]
#[template(path = "express/package.json.txt", escape = "none")]
struct PackageTemplate {
    stack: Stack,
    name: String,
    version: String,
    description: String,
}

impl ProjectEmitter for ExpressEmitter {
    fn main_code(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        let spec = ctx.spec;
        let plan = plan_models(spec);
        let handlers = ctx
            .endpoints()
            .zip(unique_function_names(spec))
            .enumerate()
            .map(|(index, ((endpoint, logic), name))| {
                Handler::new(ctx, &plan, index, &name, endpoint, logic)
            })
            .collect::<askama::Result<Vec<_>>>()?;

        render_file(&AppTemplate {
            header: Header::render_for(ctx, "API")?,
            stack: Stack::of(spec),
            title: quoted(&spec.name),
            version: quoted(&spec.version),
            welcome: quoted(&format!("Welcome to {} API", spec.name)),
            ai_enhanced: ctx.ai_enhanced,
            generated_at: quoted(&ctx.generated_at),
            listen_name: spec.name.replace('`', "'").replace("${", "$ {"),
            handlers,
        })
    }

    fn models(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        render_file(&ModelsTemplate {
            header: Header::render_for(ctx, "data models")?,
            stack: Stack::of(ctx.spec),
            plan: plan_models(ctx.spec),
        })
    }

    fn database(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        let spec = ctx.spec;
        render_file(&DatabaseTemplate {
            header: Header::render_for(ctx, "database configuration")?,
            stack: Stack::of(spec),
            url: quoted(spec.database.default_url(spec.framework)),
        })
    }

    fn requirements(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        let spec = ctx.spec;
        render_file(&PackageTemplate {
            stack: Stack::of(spec),
            name: quoted(&docker_image_name(&spec.name)),
            version: quoted(&semver(&spec.version)),
            description: quoted(&spec.description),
        })
    }
}

/// npm requires three version components: `1.2` → `1.2.0`.
fn semver(version: &str) -> String {
    let mut parts: Vec<&str> = version.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    parts.join(".")
}
