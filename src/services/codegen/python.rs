//! Template context shared by the two Python emitters.

use askama::Template;

use crate::dto::spec::{Endpoint, HttpMethod};

use super::{
    GenerationContext,
    literal::{dedent, docstring_safe, has_return, indent, quoted, string_list},
    naming::{extract_path_params, is_numeric_param, unique_function_names},
    render_fragment, requires_auth,
    schema::ModelPlan,
};

/// Module docstring: title, API description and generation stamp.
#[derive(Template)]
#[template(path = "python/header.txt", escape = "none")]
pub struct ModuleHeader {
    title: String,
    description: String,
    ai_enhanced: bool,
    generated_at: String,
}

impl ModuleHeader {
    /// Rendered docstring for a module titled `"{name} {title}"`.
    pub fn render_for(ctx: &GenerationContext<'_>, title: &str) -> askama::Result<String> {
        render_fragment(&ModuleHeader {
            title: docstring_safe(&format!("{} {title}", ctx.spec.name)),
            description: docstring_safe(&ctx.spec.description),
            ai_enhanced: ctx.ai_enhanced,
            generated_at: ctx.generated_at.clone(),
        })
    }
}

/// Handler docstring built from the endpoint's description, parameters and responses.
#[derive(Template)]
#[template(path = "python/docstring.txt", escape = "none")]
struct Docstring {
    summary: String,
    parameters: String,
    returns: String,
}

impl Docstring {
    fn new(endpoint: &Endpoint) -> Self {
        let block = |text: Option<&str>| {
            text.map(|text| indent(&docstring_safe(text), 8))
                .unwrap_or_default()
        };
        Self {
            summary: indent(&docstring_safe(&endpoint.description), 4),
            parameters: block(endpoint.parameters_text()),
            returns: block(endpoint.responses_text()),
        }
    }
}

/// Placeholder logic assigning `result` for the endpoint's method.
///
/// `payload` must already hold the request body as a dict for body methods.
#[derive(Template)]
#[template(path = "python/default_logic.txt", escape = "none")]
pub struct DefaultLogic {
    comment: &'static str,
    /// Empty when the handler works on no single resource.
    resource_id: String,
    todo: &'static str,
    data: String,
}

impl DefaultLogic {
    /// Logic for `method`, identifying the resource by the first path parameter.
    pub fn new(method: HttpMethod, params: &[String]) -> Self {
        let first = params.first().cloned();
        let (comment, resource_id, message) = match method {
            HttpMethod::Get if first.is_some() => {
                ("Fetch a single resource", first, "Resource found")
            }
            HttpMethod::Get => ("List resources", None, ""),
            HttpMethod::Post => ("Create a new resource", None, "Resource created"),
            HttpMethod::Put | HttpMethod::Patch => (
                "Update the resource",
                Some(first.unwrap_or_else(|| "payload.get(\"id\")".to_string())),
                "Resource updated",
            ),
            HttpMethod::Delete => (
                "Delete the resource",
                Some(first.unwrap_or_else(|| "None".to_string())),
                "Resource deleted",
            ),
        };

        let (todo, data) = match (method, resource_id.is_some()) {
            (HttpMethod::Get, false) => (
                "implement paging and filtering",
                r#"{"items": [], "total": 0, "page": 1, "limit": 10}"#.to_string(),
            ),
            (HttpMethod::Post, _) => (
                "validate and persist the payload",
                format!(r#"{{"id": 1, **payload, "message": "{message}"}}"#),
            ),
            _ => (
                "implement the database operation",
                format!(r#"{{"id": resource_id, "message": "{message}"}}"#),
            ),
        };

        Self {
            comment,
            resource_id: resource_id.unwrap_or_default(),
            todo,
            data,
        }
    }
}

/// A path parameter bound as a handler argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// `int` or `str`.
    pub ty: &'static str,
}

/// One endpoint as the Python templates see it.
#[derive(Debug, Clone)]
pub struct Handler {
    pub name: String,
    pub method: HttpMethod,
    /// Quoted route in the framework's syntax.
    pub route: String,
    /// Quoted tag list, `["default"]` when the endpoint has none.
    pub tags: String,
    pub params: Vec<Param>,
    /// Inferred request model, empty when the body stays a plain dict.
    pub body_model: String,
    pub requires_auth: bool,
    pub docstring: String,
    /// Quoted `"GET /path called"` log message.
    pub log_message: String,
    /// Model-written logic indented for the `try` block, empty when absent.
    pub logic: String,
    /// Whether [`Handler::logic`] returns on its own.
    pub logic_returns: bool,
    /// Rendered [`DefaultLogic`], empty when model-written logic is used.
    pub fallback: String,
}

impl Handler {
    /// Whether the handler reads a request body.
    pub fn has_body(&self) -> bool {
        self.method.has_body()
    }

    /// Whether a successful call answers 201.
    pub fn creates(&self) -> bool {
        self.method == HttpMethod::Post
    }

    /// Comma-separated parameter names, for positional signatures.
    pub fn param_list(&self) -> String {
        self.params
            .iter()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Python annotation of a path parameter.
pub fn param_type(name: &str) -> &'static str {
    if is_numeric_param(name) { "int" } else { "str" }
}

/// Handlers for every endpoint of `ctx`, routes written with `route`.
pub fn handlers(
    ctx: &GenerationContext<'_>,
    plan: &ModelPlan,
    route: fn(&str) -> String,
) -> askama::Result<Vec<Handler>> {
    let names = unique_function_names(ctx.spec);
    ctx.endpoints()
        .zip(names)
        .enumerate()
        .map(|(index, ((endpoint, logic), name))| {
            let params = extract_path_params(&endpoint.path);
            let fallback = match logic {
                Some(_) => String::new(),
                None => render_fragment(&DefaultLogic::new(endpoint.method, &params))?,
            };
            let tags: Vec<&str> = if endpoint.tags.is_empty() {
                vec!["default"]
            } else {
                endpoint.tags.iter().map(String::as_str).collect()
            };

            Ok(Handler {
                name,
                method: endpoint.method,
                route: route(&endpoint.path),
                tags: string_list(&tags),
                params: params
                    .iter()
                    .map(|param| Param {
                        ty: param_type(param),
                        name: param.clone(),
                    })
                    .collect(),
                body_model: plan
                    .request_for(index)
                    .map(|model| model.class_name.clone())
                    .unwrap_or_default(),
                requires_auth: requires_auth(endpoint, ctx.spec.authentication),
                docstring: render_fragment(&Docstring::new(endpoint))?,
                log_message: quoted(&format!("{} {} called", endpoint.method, endpoint.path)),
                logic: logic.map(|logic| indent(&dedent(logic), 8)).unwrap_or_default(),
                logic_returns: logic.is_some_and(has_return),
                fallback,
            })
        })
        .collect()
}
