use std::fmt;

use uuid::Uuid;

/// Identifies a conversation inside one running client. Allocated by the
/// session store from a counter that only moves forward, so ids are never
/// reused for the lifetime of the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(u64);

impl ConversationId {
    pub fn new(value: u64) -> ConversationId {
        return ConversationId(value);
    }

    pub fn value(&self) -> u64 {
        return self.0;
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "chat-{}", self.value());
    }
}

/// Opaque token sent to the chat backend with every message of a
/// conversation so the backend can keep multi-turn context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn create() -> SessionId {
        return SessionId(Uuid::new_v4().to_string());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}
