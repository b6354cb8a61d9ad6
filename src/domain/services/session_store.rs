#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;

use crate::domain::models::Conversation;
use crate::domain::models::ConversationId;
use crate::domain::models::Message;
use crate::domain::models::SessionError;
use crate::domain::models::NEW_CHAT_GREETING;
use crate::domain::models::NEW_CHAT_TITLE;
use crate::domain::models::WELCOME_GREETING;
use crate::domain::models::WELCOME_TITLE;

pub type SharedSessionStore = Arc<Mutex<SessionStore>>;

/// Ordered set of conversations, most recently created first, plus which one
/// is active. Every mutation bumps `version`.
pub struct SessionStore {
    conversations: Vec<Conversation>,
    active_id: Option<ConversationId>,
    next_id: u64,
    version: u64,
}

impl Default for SessionStore {
    fn default() -> SessionStore {
        return SessionStore::new();
    }
}

impl SessionStore {
    /// Creates a store holding the welcome conversation, which starts out
    /// active.
    pub fn new() -> SessionStore {
        let mut store = SessionStore {
            conversations: vec![],
            active_id: None,
            next_id: 1,
            version: 0,
        };
        store.insert_conversation(WELCOME_TITLE, WELCOME_GREETING);

        return store;
    }

    pub fn shared(self) -> SharedSessionStore {
        return Arc::new(Mutex::new(self));
    }

    fn insert_conversation(&mut self, title: &str, greeting: &str) -> Conversation {
        let id = ConversationId::new(self.next_id);
        self.next_id += 1;

        let conversation = Conversation::new(id.clone(), title, greeting);
        self.conversations.insert(0, conversation.clone());
        self.active_id = Some(id);
        self.version += 1;

        return conversation;
    }

    pub fn create_conversation(&mut self) -> Conversation {
        return self.insert_conversation(NEW_CHAT_TITLE, NEW_CHAT_GREETING);
    }

    pub fn select_conversation(&mut self, id: &ConversationId) -> Result<(), SessionError> {
        if !self.contains(id) {
            return Err(SessionError::NotFound(id.clone()));
        }

        self.active_id = Some(id.clone());
        self.version += 1;

        return Ok(());
    }

    pub fn append_message(
        &mut self,
        id: &ConversationId,
        message: Message,
    ) -> Result<(), SessionError> {
        let conversation = self
            .conversations
            .iter_mut()
            .find(|conversation| return conversation.id() == id)
            .ok_or_else(|| return SessionError::NotFound(id.clone()))?;

        conversation.push(message);
        self.version += 1;

        return Ok(());
    }

    /// Returns the active conversation. A stale active id falls back to the
    /// most recently created conversation, which then becomes active.
    pub fn get_active(&mut self) -> Option<&Conversation> {
        let is_stale = match &self.active_id {
            Some(id) => !self.contains(id),
            None => true,
        };

        if is_stale {
            let fallback = self
                .conversations
                .first()
                .map(|conversation| return conversation.id().clone());
            if fallback != self.active_id {
                tracing::debug!(
                    stale = ?self.active_id,
                    fallback = ?fallback,
                    "Re-resolving active conversation"
                );
                self.active_id = fallback;
                self.version += 1;
            }
        }

        let active_id = self.active_id.as_ref()?;
        return self.get(active_id);
    }

    pub fn active_id(&self) -> Option<&ConversationId> {
        return self.active_id.as_ref();
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        return self
            .conversations
            .iter()
            .find(|conversation| return conversation.id() == id);
    }

    pub fn contains(&self, id: &ConversationId) -> bool {
        return self.get(id).is_some();
    }

    pub fn list(&self) -> &[Conversation] {
        return &self.conversations;
    }

    pub fn version(&self) -> u64 {
        return self.version;
    }

    #[cfg(test)]
    pub(crate) fn remove_conversation(&mut self, id: &ConversationId) -> Option<Conversation> {
        let idx = self
            .conversations
            .iter()
            .position(|conversation| return conversation.id() == id)?;
        self.version += 1;

        return Some(self.conversations.remove(idx));
    }
}
