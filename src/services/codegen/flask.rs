//! Flask project emitter.

use askama::Template;

use super::{
    GenerationContext, ProjectEmitter, Stack,
    literal::quoted,
    naming::flask_route,
    python::{Handler, ModuleHeader, handlers},
    render_file,
    schema::{ModelPlan, plan_models},
};

/// Renders Flask + Flask-SQLAlchemy (or PyMongo) projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlaskEmitter;

#[derive(Template)]
#[template(path = "flask/main.py.txt", escape = "none")]
struct MainTemplate {
    header: String,
    stack: Stack,
    auth_name: &'static str,
    title: String,
    version: String,
    welcome: String,
    ai_enhanced: bool,
    generated_at: String,
    handlers: Vec<Handler>,
}

#[derive(Template)]
#[template(path = "flask/models.py.txt", escape = "none")]
struct ModelsTemplate {
    header: String,
    stack: Stack,
    plan: ModelPlan,
}

#[derive(Template)]
#[template(path = "flask/database.py.txt", escape = "none")]
struct DatabaseTemplate {
    header: String,
    stack: Stack,
    url: String,
}

#[derive(Template)]
#[template(path = "flask/requirements.txt", escape = "none")]
struct RequirementsTemplate {
    stack: Stack,
}

impl ProjectEmitter for FlaskEmitter {
    fn main_code(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        let spec = ctx.spec;
        let plan = plan_models(spec);
        render_file(&MainTemplate {
            header: ModuleHeader::render_for(ctx, "API")?,
            stack: Stack::of(spec),
            auth_name: spec.authentication.display_name(),
            title: quoted(&spec.name),
            version: quoted(&spec.version),
            welcome: quoted(&format!("Welcome to {} API", spec.name)),
            ai_enhanced: ctx.ai_enhanced,
            generated_at: quoted(&ctx.generated_at),
            handlers: handlers(ctx, &plan, |path| quoted(&flask_route(path)))?,
        })
    }

    fn models(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        render_file(&ModelsTemplate {
            header: ModuleHeader::render_for(ctx, "data models")?,
            stack: Stack::of(ctx.spec),
            plan: plan_models(ctx.spec),
        })
    }

    fn database(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        let spec = ctx.spec;
        render_file(&DatabaseTemplate {
            header: ModuleHeader::render_for(ctx, "database configuration")?,
            stack: Stack::of(spec),
            url: quoted(spec.database.default_url(spec.framework)),
        })
    }

    fn requirements(&self, ctx: &GenerationContext<'_>) -> askama::Result<String> {
        render_file(&RequirementsTemplate {
            stack: Stack::of(ctx.spec),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        dto::{
            ai::EndpointEnhancement,
            spec::{ApiSpec, AuthMethod, Database, Framework, HttpMethod},
        },
        services::examples,
    };

    use super::*;

    fn flask_example(id: &str) -> ApiSpec {
        let mut spec = examples::get_example(id).unwrap();
        spec.framework = Framework::Flask;
        spec
    }

    #[test]
    fn routes_use_flask_syntax() {
        let spec = flask_example("user_management");
        let code = FlaskEmitter.main_code(&GenerationContext::new(&spec)).unwrap();

        assert!(code.contains("@app.route(\"/api/users/<int:user_id>\", methods=[\"GET\"])\n@login_required\ndef get_users_by_user_id(user_id):"));
        assert!(code.contains("@app.route(\"/api/auth/register\", methods=[\"POST\"])\ndef post_auth_register():"));
        assert!(code.contains("return jsonify(result), 201"));
        assert!(code.contains("import jwt"));
    }

    #[test]
    fn api_key_auth_checks_header() {
        let mut spec = flask_example("ecommerce");
        spec.authentication = AuthMethod::ApiKey;
        let code = FlaskEmitter.main_code(&GenerationContext::new(&spec)).unwrap();
        assert!(code.contains("request.headers.get(\"X-API-Key\") != API_KEY"));
        assert!(!code.contains("import jwt"));
    }

    #[test]
    fn models_use_flask_sqlalchemy() {
        let spec = flask_example("blog_system");
        let models = FlaskEmitter.models(&GenerationContext::new(&spec)).unwrap();
        assert!(models.contains("class Post(db.Model):"));
        assert!(models.contains("    category_id = db.Column(db.Integer)"));
        assert!(models.contains("@dataclass\nclass PostPostsRequest:"));
    }

    #[test]
    fn requirements_pick_drivers() {
        let mut spec = flask_example("blog_system");
        let requirements = FlaskEmitter.requirements(&GenerationContext::new(&spec)).unwrap();
        assert!(requirements.contains("Flask-SQLAlchemy==3.1.1\npymysql==1.1.0"));
        assert!(requirements.contains("PyJWT==2.8.0"));

        spec.database = Database::Mongodb;
        spec.authentication = AuthMethod::None;
        let ctx = GenerationContext::new(&spec);
        let requirements = FlaskEmitter.requirements(&ctx).unwrap();
        assert!(requirements.contains("pymongo==4.6.0"));
        assert!(!requirements.contains("SQLAlchemy"));
        assert!(FlaskEmitter.database(&ctx).unwrap().contains("MongoClient(MONGODB_URL)"));
    }

    #[test]
    fn mongo_documents_list_their_fields() {
        let mut spec = flask_example("blog_system");
        spec.database = Database::Mongodb;
        let models = FlaskEmitter.models(&GenerationContext::new(&spec)).unwrap();

        assert!(models.contains("class PostDocument:\n    collection = \"posts\"\n"));
        assert!(models.contains("    fields = (\"title\", \"content\", \"category_id\", \"comments\")\n"));
        assert!(models.contains("class CategoryDocument:\n    collection = \"categories\"\n    fields = ()\n"));
        assert!(!models.contains("from database import db"));
    }

    #[test]
    fn to_dict_skips_password_hashes() {
        let mut spec = flask_example("user_management");
        spec.endpoints[2].method = HttpMethod::Post;
        spec.endpoints[2].request_body = Some(r#"{"username": "ada", "password": "pw"}"#.into());
        let models = FlaskEmitter.models(&GenerationContext::new(&spec)).unwrap();

        assert!(models.contains("    password_hash = db.Column(db.String(255))"));
        assert!(!models.contains("\"password_hash\": self.password_hash"));
        assert!(models.contains("            \"username\": self.username,"));
    }

    #[test]
    fn hyphenated_path_params_become_identifiers() {
        let mut spec = flask_example("user_management");
        spec.endpoints[3].path = "/api/users/{user-id}".into();
        let code = FlaskEmitter.main_code(&GenerationContext::new(&spec)).unwrap();

        assert!(code.contains("@app.route(\"/api/users/<int:user_id>\", methods=[\"GET\"])"));
        assert!(code.contains("def get_users_by_user_id(user_id):"));
        assert!(!code.contains("(user-id)"));
    }

    #[test]
    fn model_logic_that_returns_replaces_the_jsonify_tail() {
        let spec = flask_example("blog_system");
        let mut logic = vec![None; spec.endpoints.len()];
        logic[1] = Some(EndpointEnhancement {
            ai_generated_logic: "post = create_post(payload)\nreturn jsonify(post), 201".into(),
            business_logic: String::new(),
        });
        let ctx = GenerationContext::new(&spec).with_endpoint_logic(logic);
        let code = FlaskEmitter.main_code(&ctx).unwrap();

        let start = code.find("def post_posts(").unwrap();
        let handler = &code[start..code[start..].find("except").unwrap() + start];
        assert!(handler.contains("        payload = request.get_json(silent=True) or {}\n        # AI-generated business logic\n"));
        assert!(!handler.contains("jsonify(result)"));
        assert!(code.contains("\"ai_enhanced\": True,"));
    }
}
