use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::SessionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatApiError {
    #[error("unable to reach the chat backend: {0}")]
    Network(String),

    #[error("chat backend responded with status {status}")]
    Protocol { status: u16 },

    #[error("chat backend returned an unreadable response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait ChatBackend {
    /// Sends one user message to the backend and resolves with the
    /// assistant's reply text.
    ///
    /// The `session_id` is what lets the backend keep multi-turn context, and
    /// must be the same for every message of a conversation. There is a
    /// single request/response exchange per call: no streaming, no retries
    /// and no timeout.
    async fn send(&self, message: &str, session_id: &SessionId) -> Result<String, ChatApiError>;
}

pub type BackendHandle = Arc<dyn ChatBackend + Send + Sync>;
