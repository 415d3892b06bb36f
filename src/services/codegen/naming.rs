//! Identifier and route conversions shared by every emitter.

use std::collections::HashMap;

use crate::dto::spec::{ApiSpec, HttpMethod};

/// Handler name for an endpoint: `/api/users/{id}` + GET → `get_users_by_id`.
///
/// The `api` segment is dropped, `{x}` becomes `by_x` and any other
/// non-alphanumeric character becomes `_`.
pub fn path_to_function_name(path: &str, method: HttpMethod) -> String {
    let mut parts = vec![method.lower().to_string()];
    for segment in path.trim_matches('/').split('/') {
        if segment.is_empty() || segment == "api" {
            continue;
        }
        match param_name(segment) {
            Some(param) => {
                parts.push("by".to_string());
                parts.push(sanitize(param));
            }
            None => parts.push(sanitize(segment)),
        }
    }
    parts.join("_")
}

/// Handler names for every endpoint of `spec`, in order, made unique with `_2`, `_3`, ... suffixes.
pub fn unique_function_names(spec: &ApiSpec) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    spec.endpoints
        .iter()
        .map(|endpoint| {
            let base = path_to_function_name(&endpoint.path, endpoint.method);
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{base}_{count}")
            }
        })
        .collect()
}

/// Identifiers of the `{param}` segments of a path, in order.
pub fn extract_path_params(path: &str) -> Vec<String> {
    path.split('/').filter_map(param_name).map(param_ident).collect()
}

/// Identifier a path parameter is bound to in generated code: `user-id` → `user_id`.
///
/// Leading digits get a `_` prefix and Python or JavaScript keywords a `_` suffix.
pub fn param_ident(name: &str) -> String {
    let ident = sanitize(name);
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else if RESERVED_WORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "case", "class",
    "const", "continue", "def", "default", "del", "delete", "elif", "else", "except", "finally",
    "for", "from", "function", "global", "if", "import", "in", "is", "lambda", "let", "new",
    "nonlocal", "not", "or", "pass", "raise", "return", "switch", "this", "try", "typeof", "var",
    "while", "with", "yield",
];

/// Parameters named `id` or `*_id` are typed as integers.
pub fn is_numeric_param(name: &str) -> bool {
    name == "id" || name.ends_with("_id")
}

/// Directory-friendly project name: `User API` → `user_api`.
pub fn project_name(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

/// Container image name: `User API` → `user-api`.
pub fn docker_image_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// FastAPI route syntax: parameters renamed to their identifiers, `/users/{user-id}` → `/users/{user_id}`.
pub fn fastapi_route(path: &str) -> String {
    map_params(path, |param| format!("{{{param}}}"))
}

/// Flask route syntax: `/users/{user_id}` → `/users/<int:user_id>`.
pub fn flask_route(path: &str) -> String {
    map_params(path, |param| {
        if is_numeric_param(param) {
            format!("<int:{param}>")
        } else {
            format!("<{param}>")
        }
    })
}

/// Express route syntax: `/users/{user_id}` → `/users/:user_id`.
pub fn express_route(path: &str) -> String {
    map_params(path, |param| format!(":{param}"))
}

/// `user_id` / `cart-items` / `cart items` → `UserId` / `CartItems` / `CartItems`.
pub fn pascal_case(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `get_users_by_id` → `getUsersById`.
pub fn camel_case(text: &str) -> String {
    let pascal = pascal_case(text);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Naive English singular used for model names: `categories` → `category`.
pub fn singular(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if let Some(stem) = lower.strip_suffix("ies").filter(|stem| !stem.is_empty()) {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && lower.len() > 1
    {
        return lower[..lower.len() - 1].to_string();
    }
    lower
}

/// First path segment naming a resource, skipping `api`, version segments and parameters.
pub fn resource_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| {
        !segment.is_empty()
            && *segment != "api"
            && !is_version_segment(segment)
            && param_name(segment).is_none()
    })
}

/// Alphanumeric-and-underscore identifier.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn param_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
}

fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

fn map_params(path: &str, render: impl Fn(&str) -> String) -> String {
    path.split('/')
        .map(|segment| match param_name(segment) {
            Some(param) => render(&param_ident(param)),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
