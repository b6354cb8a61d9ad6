#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use super::ConversationId;
use super::Message;
use super::Sender;
use super::SessionId;

pub const WELCOME_TITLE: &str = "Welcome — ARGO Data Chat";
pub const WELCOME_GREETING: &str = "Hello! I'm FloatChat, your AI assistant for ARGO ocean data. I can help you discover insights about ocean temperature, salinity, pressure, and more. What would you like to explore today?";
pub const NEW_CHAT_TITLE: &str = "New chat";
pub const NEW_CHAT_GREETING: &str = "Hi! Ask me anything about ARGO ocean data.";

const PREVIEW_LEN: usize = 40;

/// One independent chat thread. Messages can only be appended, and their
/// timestamps never go backwards.
#[derive(Clone, Debug)]
pub struct Conversation {
    id: ConversationId,
    session_id: SessionId,
    title: String,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: ConversationId, title: &str, greeting: &str) -> Conversation {
        return Conversation {
            id,
            session_id: SessionId::create(),
            title: title.to_string(),
            messages: vec![Message::new(Sender::Bot, greeting)],
        };
    }

    pub fn id(&self) -> &ConversationId {
        return &self.id;
    }

    pub fn session_id(&self) -> &SessionId {
        return &self.session_id;
    }

    pub fn title(&self) -> &str {
        return &self.title;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn last_message(&self) -> Option<&Message> {
        return self.messages.last();
    }

    /// Shortened text of the most recent message, as shown in conversation
    /// lists.
    pub fn preview(&self) -> String {
        return self
            .last_message()
            .map(|msg| return msg.preview(PREVIEW_LEN))
            .unwrap_or_default();
    }

    pub(crate) fn push(&mut self, mut message: Message) {
        if let Some(last) = self.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }

        self.messages.push(message);
    }
}
