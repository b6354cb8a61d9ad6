#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;

use super::SessionStore;
use super::SharedSessionStore;
use crate::domain::models::BackendHandle;
use crate::domain::models::ChatApiError;
use crate::domain::models::Conversation;
use crate::domain::models::ConversationId;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Sender;
use crate::domain::models::SessionError;
use crate::domain::models::Snapshot;

pub const APOLOGY_TEXT: &str =
    "Sorry, I couldn't get an answer from the ARGO data service just now. Please try sending your message again.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    DuplicateDispatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and nothing was sent.
    Ignored(IgnoreReason),
    /// The reply was appended to the conversation.
    Replied,
    /// The backend failed and an error message was appended instead.
    Failed(ChatApiError),
    /// The conversation disappeared while waiting, so the result was dropped.
    Discarded,
}

/// Identifies one dispatch. Only the dispatch holding the current token for
/// a conversation may clear that conversation's in-flight marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchToken(u64);

/// Turns user intents into session store mutations and backend dispatches.
///
/// Cloning is cheap and every clone drives the same store, so a send can be
/// moved onto its own task while the original keeps serving other intents.
#[derive(Clone)]
pub struct ConversationController {
    store: SharedSessionStore,
    backend: BackendHandle,
    in_flight: Arc<DashMap<ConversationId, DispatchToken>>,
    next_token: Arc<AtomicU64>,
    snapshots: Arc<watch::Sender<Snapshot>>,
}

impl ConversationController {
    pub fn new(store: SharedSessionStore, backend: BackendHandle) -> ConversationController {
        let (tx, _rx) = watch::channel(Snapshot::default());
        let controller = ConversationController {
            store,
            backend,
            in_flight: Arc::new(DashMap::new()),
            next_token: Arc::new(AtomicU64::new(1)),
            snapshots: Arc::new(tx),
        };

        {
            let store = controller.lock_store();
            controller.publish(&store);
        }

        return controller;
    }

    fn lock_store(&self) -> MutexGuard<'_, SessionStore> {
        return self.store.lock().unwrap_or_else(PoisonError::into_inner);
    }

    fn publish(&self, store: &SessionStore) {
        let snapshot = Snapshot {
            version: store.version(),
            conversations: store.list().to_vec(),
            active_id: store.active_id().cloned(),
            pending: self
                .in_flight
                .iter()
                .map(|entry| return entry.key().clone())
                .collect(),
        };

        self.snapshots.send_replace(snapshot);
    }

    /// Receives a fresh snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        return self.snapshots.subscribe();
    }

    pub fn snapshot(&self) -> Snapshot {
        return self.snapshots.borrow().clone();
    }

    pub fn is_dispatch_pending_for(&self, id: &ConversationId) -> bool {
        return self.in_flight.contains_key(id);
    }

    /// Id of the conversation new messages should go to. A stale active id
    /// is re-resolved by the store, and that change is published too.
    pub fn active_conversation_id(&self) -> Option<ConversationId> {
        let mut store = self.lock_store();
        let version = store.version();
        let active_id = store
            .get_active()
            .map(|conversation| return conversation.id().clone());
        if store.version() != version {
            self.publish(&store);
        }

        return active_id;
    }

    pub fn create_new_conversation(&self) -> Conversation {
        let mut store = self.lock_store();
        let conversation = store.create_conversation();
        tracing::debug!(conversation = %conversation.id(), "Created conversation");
        self.publish(&store);

        return conversation;
    }

    /// Switches the active conversation. Dispatches running for other
    /// conversations are left alone and still resolve into their own history.
    pub fn select_conversation(&self, id: &ConversationId) -> Result<(), SessionError> {
        let mut store = self.lock_store();
        store.select_conversation(id)?;
        self.publish(&store);

        return Ok(());
    }

    pub async fn send_user_message(
        &self,
        conversation_id: &ConversationId,
        raw_text: &str,
    ) -> Result<SendOutcome, SessionError> {
        let text = raw_text.trim();
        if text.is_empty() {
            tracing::debug!(conversation = %conversation_id, "Ignoring empty message");
            return Ok(SendOutcome::Ignored(IgnoreReason::EmptyInput));
        }

        let (token, session_id) = {
            let mut store = self.lock_store();
            let session_id = match store.get(conversation_id) {
                Some(conversation) => conversation.session_id().clone(),
                None => return Err(SessionError::NotFound(conversation_id.clone())),
            };

            let token = match self.in_flight.entry(conversation_id.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(
                        conversation = %conversation_id,
                        "Ignoring message while a dispatch is in flight"
                    );
                    return Ok(SendOutcome::Ignored(IgnoreReason::DuplicateDispatch));
                }
                Entry::Vacant(entry) => {
                    store.append_message(conversation_id, Message::new(Sender::User, text))?;
                    let token = DispatchToken(self.next_token.fetch_add(1, Ordering::Relaxed));
                    entry.insert(token);
                    token
                }
            };
            self.publish(&store);

            (token, session_id)
        };

        tracing::debug!(
            conversation = %conversation_id,
            session_id = %session_id,
            "Dispatching message to chat backend"
        );
        let (message, outcome) = match self.backend.send(text, &session_id).await {
            Ok(reply) => {
                tracing::debug!(conversation = %conversation_id, "Chat backend replied");
                (Message::new(Sender::Bot, &reply), SendOutcome::Replied)
            }
            Err(err) => {
                tracing::error!(
                    conversation = %conversation_id,
                    error = ?err,
                    "Chat backend dispatch failed"
                );
                (
                    Message::new_with_type(Sender::Bot, MessageType::Error, APOLOGY_TEXT),
                    SendOutcome::Failed(err),
                )
            }
        };

        let mut store = self.lock_store();
        let outcome = match store.append_message(conversation_id, message) {
            Ok(()) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "Discarding chat backend result");
                SendOutcome::Discarded
            }
        };

        self.in_flight
            .remove_if(conversation_id, |_, current| return *current == token);
        self.publish(&store);

        return Ok(outcome);
    }
}
