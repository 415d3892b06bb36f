//! Thin client for an OpenAI-compatible chat-completion API, plus the prompts
//! and reply parsing used by the AI-assisted generation features.

mod client;
mod error;
pub mod parse;
pub mod prompts;
#[cfg(test)]
pub mod testing;

pub use self::client::{ChatClient, ChatMessage, ChatRequest, OpenAiClient, Role};
pub use self::error::{LlmError, LlmResult};
