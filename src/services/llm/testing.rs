//! Scripted [`ChatClient`] for unit tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use futures::future::BoxFuture;

use super::{ChatClient, ChatRequest, LlmError, LlmResult};

/// Replays queued replies in order and records every request it receives.
///
/// Once the queue is drained every call fails with [`LlmError::EmptyCompletion`].
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<LlmResult<String>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies = replies.into_iter().map(|reply| Ok(reply.into())).collect();
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn as_dyn(self: &Arc<Self>) -> Arc<dyn ChatClient> {
        self.clone()
    }
}

impl ChatClient for ScriptedClient {
    fn complete(&self, request: ChatRequest) -> BoxFuture<'static, LlmResult<String>> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyCompletion));
        Box::pin(async move { reply })
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}
