use thiserror::Error;

use super::ConversationId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no conversation found for id {0}")]
    NotFound(ConversationId),
}
