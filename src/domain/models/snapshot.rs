use std::collections::HashSet;

use super::Conversation;
use super::ConversationId;

/// Read-only copy of everything the presentation layer renders. A new one
/// is published after every mutation, and `version` increases with each.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub version: u64,
    pub conversations: Vec<Conversation>,
    pub active_id: Option<ConversationId>,
    pub pending: HashSet<ConversationId>,
}

impl Snapshot {
    pub fn active(&self) -> Option<&Conversation> {
        let active_id = self.active_id.as_ref()?;
        return self.get(active_id);
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        return self
            .conversations
            .iter()
            .find(|conversation| return conversation.id() == id);
    }

    pub fn is_dispatch_pending_for(&self, id: &ConversationId) -> bool {
        return self.pending.contains(id);
    }
}
