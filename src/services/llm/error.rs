//! Error types raised while talking to the chat-completion API.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`LlmError`] failures.
pub type LlmResult<T> = Result<T, LlmError>;

/// Failures that can occur during a completion round trip.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key is configured.
    #[error("no API key configured for the language model")]
    MissingApiKey,
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build chat-completion client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or timed out.
    #[error("failed to send completion request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("completion endpoint returned status {status}: {body}")]
    RequestStatus { status: StatusCode, body: String },
    /// The response body was not the expected completion JSON.
    #[error("failed to decode completion response")]
    DecodeResponse {
        #[source]
        source: reqwest::Error,
    },
    /// The completion did not contain any message text.
    #[error("completion response contained no message")]
    EmptyCompletion,
    /// The model reply could not be parsed as the requested JSON shape.
    #[error("model reply is not valid JSON (starts with `{excerpt}`)")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        excerpt: String,
    },
}
