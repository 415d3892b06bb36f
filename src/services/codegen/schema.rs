//! Data models inferred from a specification's endpoints and example payloads.

use serde_json::{Map, Value};

use crate::dto::spec::{ApiSpec, Endpoint, HttpMethod};

use super::naming::{
    camel_case, pascal_case, resource_segment, sanitize, singular, unique_function_names,
};

/// Segment whose endpoints never map to a stored resource.
const AUTH_SEGMENT: &str = "auth";

/// Classes every generated models module declares on its own.
const RESERVED_CLASS_NAMES: &[&str] = &[
    "APIResponse",
    "LoginRequest",
    "PaginatedResponse",
    "TimestampMixin",
    "Token",
];

/// Scalar or container type of an inferred field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Str,
    List,
    Object,
    Any,
}

impl FieldType {
    /// Type of a JSON example value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => FieldType::Bool,
            Value::Number(n) if n.is_f64() => FieldType::Float,
            Value::Number(_) => FieldType::Int,
            Value::String(_) => FieldType::Str,
            Value::Array(_) => FieldType::List,
            Value::Object(_) => FieldType::Object,
            Value::Null => FieldType::Any,
        }
    }

    /// Python type annotation.
    pub fn python(self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Str => "str",
            FieldType::List => "List[Any]",
            FieldType::Object => "Dict[str, Any]",
            FieldType::Any => "Optional[Any]",
        }
    }

    /// SQLAlchemy column type.
    pub fn sqlalchemy(self) -> &'static str {
        match self {
            FieldType::Bool => "Boolean",
            FieldType::Int => "Integer",
            FieldType::Float => "Float",
            FieldType::Str => "String(255)",
            FieldType::List | FieldType::Object | FieldType::Any => "JSON",
        }
    }

    /// Sequelize `DataTypes` member.
    pub fn sequelize(self) -> &'static str {
        match self {
            FieldType::Bool => "DataTypes.BOOLEAN",
            FieldType::Int => "DataTypes.INTEGER",
            FieldType::Float => "DataTypes.FLOAT",
            FieldType::Str => "DataTypes.STRING",
            FieldType::List | FieldType::Object | FieldType::Any => "DataTypes.JSON",
        }
    }

    /// Mongoose schema type.
    pub fn mongoose(self) -> &'static str {
        match self {
            FieldType::Bool => "Boolean",
            FieldType::Int | FieldType::Float => "Number",
            FieldType::Str => "String",
            FieldType::List => "Array",
            FieldType::Object | FieldType::Any => "Schema.Types.Mixed",
        }
    }
}

/// A named, typed attribute of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    /// Stored but never serialized back to clients.
    pub fn is_secret(&self) -> bool {
        self.name == "password_hash"
    }
}

/// A stored entity, one per resource path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Table or collection name, e.g. `categories`.
    pub table: String,
    /// Class name, e.g. `Category`.
    pub class_name: String,
    pub fields: Vec<Field>,
}

impl Resource {
    /// Variable name for the class in JavaScript, e.g. `category`.
    pub fn instance_name(&self) -> String {
        camel_case(&self.class_name)
    }
}

/// Body model of one endpoint whose request example is a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestModel {
    /// Index of the endpoint in the specification.
    pub endpoint: usize,
    pub class_name: String,
    pub fields: Vec<Field>,
}

/// Every model the emitters render for a specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPlan {
    pub resources: Vec<Resource>,
    pub requests: Vec<RequestModel>,
}

impl ModelPlan {
    /// Body model of the endpoint at `index`, if it has one.
    pub fn request_for(&self, index: usize) -> Option<&RequestModel> {
        self.requests.iter().find(|model| model.endpoint == index)
    }
}

/// Infer resources and request models from the endpoints of `spec`.
///
/// Resource fields come from request bodies of write endpoints and from the
/// `data` object of single-item GET responses. `id` is always implicit and a
/// `password` input is stored as `password_hash`.
pub fn plan_models(spec: &ApiSpec) -> ModelPlan {
    let names = unique_function_names(spec);
    let mut plan = ModelPlan::default();

    for (index, endpoint) in spec.endpoints.iter().enumerate() {
        let body = endpoint.request_body_object();

        if let Some(map) = body.as_ref().filter(|_| endpoint.method.has_body()) {
            plan.requests.push(RequestModel {
                endpoint: index,
                class_name: format!("{}Request", pascal_case(&names[index])),
                fields: fields_of(map),
            });
        }

        let Some(segment) = resource_segment(&endpoint.path) else {
            continue;
        };
        if segment.eq_ignore_ascii_case(AUTH_SEGMENT) {
            continue;
        }

        let table = sanitize(segment).to_lowercase();
        let position = match plan.resources.iter().position(|r| r.table == table) {
            Some(position) => position,
            None => {
                plan.resources.push(Resource {
                    class_name: resource_class_name(&table),
                    table,
                    fields: Vec::new(),
                });
                plan.resources.len() - 1
            }
        };
        let resource = &mut plan.resources[position];

        if endpoint.method.has_body() {
            if let Some(map) = &body {
                merge_fields(&mut resource.fields, map);
            }
        } else if endpoint.method == HttpMethod::Get && endpoint.path.contains('{') {
            if let Some(data) = response_data(endpoint) {
                merge_fields(&mut resource.fields, &data);
            }
        }
    }

    plan
}

/// `order_items` → `OrderItem`; names taken by shared models get a `Model` suffix.
fn resource_class_name(table: &str) -> String {
    let name = pascal_case(&singular(table));
    if RESERVED_CLASS_NAMES.contains(&name.as_str()) {
        format!("{name}Model")
    } else {
        name
    }
}

fn fields_of(map: &Map<String, Value>) -> Vec<Field> {
    map.iter()
        .map(|(name, value)| Field {
            name: sanitize(name),
            ty: FieldType::of(value),
        })
        .collect()
}

fn merge_fields(fields: &mut Vec<Field>, map: &Map<String, Value>) {
    for (name, value) in map {
        if name == "id" {
            continue;
        }
        let name = if name == "password" {
            "password_hash".to_string()
        } else {
            sanitize(name)
        };
        if fields.iter().any(|field| field.name == name) {
            continue;
        }
        let ty = if name == "password_hash" {
            FieldType::Str
        } else {
            FieldType::of(value)
        };
        fields.push(Field { name, ty });
    }
}

fn response_data(endpoint: &Endpoint) -> Option<Map<String, Value>> {
    let text = endpoint.responses_text()?;
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Object(data)) => Some(data),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::services::examples;

    use super::*;

    #[test]
    fn json_types_are_mapped() {
        assert_eq!(FieldType::of(&Value::from(true)), FieldType::Bool);
        assert_eq!(FieldType::of(&Value::from(3)), FieldType::Int);
        assert_eq!(FieldType::of(&Value::from(3.5)), FieldType::Float);
        assert_eq!(FieldType::of(&Value::from("x")), FieldType::Str);
        assert_eq!(FieldType::of(&serde_json::json!([])), FieldType::List);
        assert_eq!(FieldType::of(&Value::Null), FieldType::Any);
        assert_eq!(FieldType::Float.sqlalchemy(), "Float");
        assert_eq!(FieldType::Object.python(), "Dict[str, Any]");
    }

    #[test]
    fn user_management_example_yields_user_resource() {
        let spec = examples::get_example("user_management").unwrap();
        let plan = plan_models(&spec);

        let tables: Vec<_> = plan.resources.iter().map(|r| r.table.as_str()).collect();
        assert_eq!(tables, ["users"]);

        let user = &plan.resources[0];
        assert_eq!(user.class_name, "User");
        let fields: Vec<_> = user.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["username", "email"]);

        let requests: Vec<_> = plan.requests.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(
            requests,
            ["PostAuthRegisterRequest", "PostAuthLoginRequest"]
        );
        assert!(plan.request_for(0).is_some());
        assert!(plan.request_for(2).is_none());
    }

    #[test]
    fn write_bodies_feed_resource_fields() {
        let spec = examples::get_example("blog_system").unwrap();
        let plan = plan_models(&spec);

        let posts = plan.resources.iter().find(|r| r.table == "posts").unwrap();
        assert_eq!(posts.class_name, "Post");
        let names: Vec<_> = posts.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "content", "category_id", "comments"]);
        assert_eq!(posts.fields[2].ty, FieldType::Int);

        let categories = plan.resources.iter().find(|r| r.table == "categories").unwrap();
        assert_eq!(categories.class_name, "Category");
        assert!(categories.fields.is_empty());
    }

    #[test]
    fn resources_do_not_shadow_shared_models() {
        let mut spec = examples::get_example("user_management").unwrap();
        spec.endpoints[2].path = "/api/tokens".into();
        spec.endpoints[3].path = "/api/tokens/{token_id}".into();
        let plan = plan_models(&spec);

        let classes: Vec<_> = plan.resources.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(classes, ["TokenModel"]);
        assert_eq!(plan.resources[0].table, "tokens");
        assert_eq!(plan.resources[0].instance_name(), "tokenModel");
        assert_eq!(resource_class_name("paginated_responses"), "PaginatedResponseModel");
        assert_eq!(resource_class_name("tokenizers"), "Tokenizer");
    }

    #[test]
    fn password_is_stored_hashed() {
        let mut fields = Vec::new();
        let map = serde_json::from_str::<Map<String, Value>>(
            r#"{"id": 1, "password": "secret", "age": 30}"#,
        )
        .unwrap();
        merge_fields(&mut fields, &map);
        assert_eq!(
            fields,
            vec![
                Field {
                    name: "password_hash".into(),
                    ty: FieldType::Str
                },
                Field {
                    name: "age".into(),
                    ty: FieldType::Int
                },
            ]
        );
        assert!(fields[0].is_secret());
        assert!(!fields[1].is_secret());
    }
}
