use super::SessionStore;
use crate::domain::models::ConversationId;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::SessionError;
use crate::domain::models::NEW_CHAT_GREETING;
use crate::domain::models::WELCOME_GREETING;
use crate::domain::models::WELCOME_TITLE;

fn ids(store: &SessionStore) -> Vec<ConversationId> {
    return store
        .list()
        .iter()
        .map(|conversation| return conversation.id().clone())
        .collect();
}

#[test]
fn it_starts_with_the_welcome_conversation() {
    let mut store = SessionStore::new();
    assert_eq!(store.list().len(), 1);

    let active = store.get_active().unwrap();
    assert_eq!(active.title(), WELCOME_TITLE);
    assert_eq!(active.messages().len(), 1);
    assert_eq!(active.messages()[0].sender, Sender::Bot);
    assert_eq!(active.messages()[0].text, WELCOME_GREETING);
}

#[test]
fn it_creates_conversations_at_the_front_and_activates_them() {
    let mut store = SessionStore::new();
    let welcome_id = store.active_id().unwrap().clone();

    let created = store.create_conversation();
    assert_eq!(store.active_id(), Some(created.id()));
    assert_eq!(ids(&store), vec![created.id().clone(), welcome_id]);
    assert_eq!(created.messages().len(), 1);
    assert_eq!(created.messages()[0].text, NEW_CHAT_GREETING);
}

#[test]
fn it_never_reuses_ids_or_session_ids() {
    let mut store = SessionStore::new();
    let first = store.create_conversation();
    let second = store.create_conversation();

    assert_ne!(first.id(), second.id());
    assert_ne!(first.session_id(), second.session_id());
    assert!(second.id().value() > first.id().value());
}

#[test]
fn it_selects_existing_conversations() {
    let mut store = SessionStore::new();
    let welcome_id = store.active_id().unwrap().clone();
    store.create_conversation();

    store.select_conversation(&welcome_id).unwrap();
    assert_eq!(store.active_id(), Some(&welcome_id));
}

#[test]
fn it_rejects_selecting_unknown_conversations() {
    let mut store = SessionStore::new();
    let active_before = store.active_id().cloned();
    let version_before = store.version();

    let res = store.select_conversation(&ConversationId::new(404));
    assert_eq!(res, Err(SessionError::NotFound(ConversationId::new(404))));
    assert_eq!(store.active_id().cloned(), active_before);
    assert_eq!(store.version(), version_before);
}

#[test]
fn it_appends_to_the_named_conversation_only() {
    let mut store = SessionStore::new();
    let welcome_id = store.active_id().unwrap().clone();
    let created = store.create_conversation();

    store
        .append_message(&welcome_id, Message::new(Sender::User, "hello"))
        .unwrap();

    assert_eq!(store.get(&welcome_id).unwrap().messages().len(), 2);
    assert_eq!(store.get(created.id()).unwrap().messages().len(), 1);
}

#[test]
fn it_fails_appending_to_unknown_conversations() {
    let mut store = SessionStore::new();
    let res = store.append_message(&ConversationId::new(9), Message::new(Sender::User, "hi"));
    assert_eq!(res, Err(SessionError::NotFound(ConversationId::new(9))));
}

#[test]
fn it_bumps_version_on_every_mutation() {
    let mut store = SessionStore::new();
    let start = store.version();
    let welcome_id = store.active_id().unwrap().clone();

    store.create_conversation();
    store.select_conversation(&welcome_id).unwrap();
    store
        .append_message(&welcome_id, Message::new(Sender::User, "hello"))
        .unwrap();

    assert_eq!(store.version(), start + 3);
}

#[test]
fn it_falls_back_to_the_most_recent_conversation_when_active_is_stale() {
    let mut store = SessionStore::new();
    let older = store.create_conversation();
    let newest = store.create_conversation();

    store.remove_conversation(newest.id());

    let active = store.get_active().unwrap();
    assert_eq!(active.id(), older.id());
    assert_eq!(store.active_id(), Some(older.id()));
}

#[test]
fn it_returns_nothing_for_an_empty_store() {
    let mut store = SessionStore::new();
    let welcome_id = store.active_id().unwrap().clone();
    store.remove_conversation(&welcome_id);

    assert!(store.get_active().is_none());
    assert!(store.active_id().is_none());
}
