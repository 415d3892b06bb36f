//! DTOs describing the built-in example specifications.

use serde::Serialize;
use utoipa::ToSchema;

/// Short description of one built-in example.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExampleSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub endpoints_count: usize,
    pub framework: String,
    pub database: String,
}

/// List of available examples.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExamplesResponse {
    pub examples: Vec<ExampleSummary>,
}
