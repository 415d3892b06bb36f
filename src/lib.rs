//! Library crate for api-scaffold-back, exposing modules for the server and the CLI tools.

/// Configuration file and environment loading.
pub mod config;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP route trees.
pub mod routes;
/// Generation, AI and health services.
pub mod services;
/// Shared application state.
pub mod state;
