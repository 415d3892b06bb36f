//! Built-in example specifications offered by `/api/examples`.

use crate::{
    dto::{
        examples::ExampleSummary,
        spec::{ApiSpec, AuthMethod, Database, Endpoint, Framework, HttpMethod},
    },
    error::ServiceError,
};

struct Example {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    build: fn() -> ApiSpec,
}

const CATALOGUE: [Example; 3] = [
    Example {
        id: "user_management",
        name: "User management system",
        description: "User registration, authentication and profile management",
        build: user_management,
    },
    Example {
        id: "blog_system",
        name: "Blog system",
        description: "Posts, comments and category management",
        build: blog_system,
    },
    Example {
        id: "ecommerce",
        name: "E-commerce system",
        description: "Products, shopping cart and order management",
        build: ecommerce,
    },
];

/// Summaries of every built-in example, in catalogue order.
pub fn list_examples() -> Vec<ExampleSummary> {
    CATALOGUE
        .iter()
        .map(|example| {
            let spec = (example.build)();
            ExampleSummary {
                id: example.id.to_string(),
                name: example.name.to_string(),
                description: example.description.to_string(),
                endpoints_count: spec.endpoints.len(),
                framework: spec.framework.display_name().to_string(),
                database: spec.database.display_name().to_string(),
            }
        })
        .collect()
}

/// Full specification of the example `id`.
pub fn get_example(id: &str) -> Result<ApiSpec, ServiceError> {
    CATALOGUE
        .iter()
        .find(|example| example.id == id)
        .map(|example| (example.build)())
        .ok_or_else(|| ServiceError::NotFound(format!("example '{id}' not found")))
}

fn endpoint(
    method: HttpMethod,
    path: &str,
    description: &str,
    parameters: &str,
    request_body: &str,
    responses: &str,
    tag: &str,
) -> Endpoint {
    Endpoint {
        path: path.to_string(),
        method,
        description: description.to_string(),
        parameters: Some(parameters.to_string()),
        request_body: Some(request_body.to_string()),
        responses: Some(responses.to_string()),
        business_logic: None,
        tags: vec![tag.to_string()],
    }
}

fn user_management() -> ApiSpec {
    ApiSpec {
        name: "User Management API".into(),
        description: "REST API for user registration, authentication and profile management"
            .into(),
        version: "1.0.0".into(),
        framework: Framework::Fastapi,
        database: Database::Postgresql,
        authentication: AuthMethod::Jwt,
        endpoints: vec![
            endpoint(
                HttpMethod::Post,
                "/api/auth/register",
                "Register a new user",
                "none",
                r#"{"username": "testuser", "email": "test@example.com", "password": "password123"}"#,
                r#"{"success": true, "message": "User created", "data": {"id": 1, "username": "testuser"}}"#,
                "authentication",
            ),
            endpoint(
                HttpMethod::Post,
                "/api/auth/login",
                "Log a user in",
                "none",
                r#"{"username": "testuser", "password": "password123"}"#,
                r#"{"access_token": "jwt_token_here", "token_type": "bearer"}"#,
                "authentication",
            ),
            endpoint(
                HttpMethod::Get,
                "/api/users",
                "List users",
                "page, limit (optional)",
                "none",
                r#"{"success": true, "data": {"items": [], "total": 10}}"#,
                "users",
            ),
            endpoint(
                HttpMethod::Get,
                "/api/users/{user_id}",
                "Get a user by ID",
                "user_id: user ID",
                "none",
                r#"{"success": true, "data": {"id": 1, "username": "testuser", "email": "test@example.com"}}"#,
                "users",
            ),
        ],
    }
}

fn blog_system() -> ApiSpec {
    ApiSpec {
        name: "Blog System API".into(),
        description: "API for writing blog posts and managing comments and categories".into(),
        version: "1.2.0".into(),
        framework: Framework::Fastapi,
        database: Database::Mysql,
        authentication: AuthMethod::Jwt,
        endpoints: vec![
            endpoint(
                HttpMethod::Get,
                "/api/posts",
                "List blog posts",
                "page, category, search (optional)",
                "none",
                r#"{"success": true, "data": {"items": [], "total": 50, "page": 1}}"#,
                "posts",
            ),
            endpoint(
                HttpMethod::Post,
                "/api/posts",
                "Create a blog post",
                "authentication required",
                r#"{"title": "My Blog Post", "content": "Post content here", "category_id": 1}"#,
                r#"{"success": true, "data": {"id": 1, "title": "My Blog Post", "slug": "my-blog-post"}}"#,
                "posts",
            ),
            endpoint(
                HttpMethod::Get,
                "/api/posts/{post_id}",
                "Get a blog post",
                "post_id: post ID",
                "none",
                r#"{"success": true, "data": {"id": 1, "title": "Post Title", "content": "Full content", "comments": []}}"#,
                "posts",
            ),
            endpoint(
                HttpMethod::Get,
                "/api/categories",
                "List categories",
                "none",
                "none",
                r#"{"success": true, "data": [{"id": 1, "name": "Technology", "post_count": 15}]}"#,
                "categories",
            ),
        ],
    }
}

fn ecommerce() -> ApiSpec {
    ApiSpec {
        name: "E-commerce API".into(),
        description: "Complete e-commerce API for an online store".into(),
        version: "2.0.0".into(),
        framework: Framework::Fastapi,
        database: Database::Postgresql,
        authentication: AuthMethod::Jwt,
        endpoints: vec![
            endpoint(
                HttpMethod::Get,
                "/api/products",
                "List products",
                "category, min_price, max_price, search",
                "none",
                r#"{"success": true, "data": {"items": [], "total": 200, "filters": {}}}"#,
                "products",
            ),
            endpoint(
                HttpMethod::Get,
                "/api/products/{product_id}",
                "Get product details",
                "product_id: product ID",
                "none",
                r#"{"success": true, "data": {"id": 1, "name": "Product Name", "price": 99.99, "images": []}}"#,
                "products",
            ),
            endpoint(
                HttpMethod::Get,
                "/api/cart",
                "Get the shopping cart",
                "authentication required",
                "none",
                r#"{"success": true, "data": {"items": [], "total_amount": 199.99, "item_count": 3}}"#,
                "cart",
            ),
            endpoint(
                HttpMethod::Post,
                "/api/cart/items",
                "Add a product to the cart",
                "authentication required",
                r#"{"product_id": 1, "quantity": 2}"#,
                r#"{"success": true, "message": "Item added to cart", "data": {"cart_total": 149.99}}"#,
                "cart",
            ),
            endpoint(
                HttpMethod::Post,
                "/api/orders",
                "Create an order",
                "authentication required",
                r#"{"items": [{"product_id": 1, "quantity": 2}], "shipping_address": {}}"#,
                r#"{"success": true, "data": {"order_id": "ORD-001", "total_amount": 199.99, "status": "pending"}}"#,
                "orders",
            ),
        ],
    }
}
