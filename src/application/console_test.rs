use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::codec::FramedRead;
use tokio_util::codec::LinesCodec;

use super::handle_input;
use super::help_text;
use super::run;
use super::Flow;
use crate::domain::models::ChatApiError;
use crate::domain::models::ChatBackend;
use crate::domain::models::ConversationId;
use crate::domain::models::SessionId;
use crate::domain::models::SUGGESTIONS;
use crate::domain::services::ConversationController;
use crate::domain::services::SessionStore;

struct EchoBackend {}

#[async_trait]
impl ChatBackend for EchoBackend {
    async fn send(&self, message: &str, _session_id: &SessionId) -> Result<String, ChatApiError> {
        tokio::task::yield_now().await;
        return Ok(format!("You asked: {message}"));
    }
}

fn controller() -> ConversationController {
    return ConversationController::new(SessionStore::new().shared(), Arc::new(EchoBackend {}));
}

fn active_texts(controller: &ConversationController) -> Vec<String> {
    return controller
        .snapshot()
        .active()
        .unwrap()
        .messages()
        .iter()
        .skip(1)
        .map(|msg| return msg.text.to_string())
        .collect();
}

async fn drain(sends: &mut JoinSet<()>) -> Result<()> {
    while let Some(res) = sends.join_next().await {
        res?;
    }
    return Ok(());
}

#[test]
fn it_lists_every_command_in_help() {
    let help = help_text();
    for command in ["/new", "/chats", "/select", "/suggest", "/quit", "/help"] {
        assert!(help.contains(command), "{command} is missing from help");
    }
}

#[test]
fn it_quits() -> Result<()> {
    let controller = controller();
    let mut sends = JoinSet::new();
    assert!(matches!(
        handle_input(&controller, &mut sends, "/quit")?,
        Flow::Quit
    ));
    assert!(matches!(
        handle_input(&controller, &mut sends, "/q")?,
        Flow::Quit
    ));
    return Ok(());
}

#[test]
fn it_starts_new_conversations() -> Result<()> {
    let controller = controller();
    let mut sends = JoinSet::new();
    assert!(matches!(
        handle_input(&controller, &mut sends, "/new")?,
        Flow::Continue
    ));

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.conversations.len(), 2);
    assert_eq!(snapshot.active_id.as_ref(), Some(snapshot.conversations[0].id()));
    return Ok(());
}

#[test]
fn it_selects_conversations_by_list_number() -> Result<()> {
    let controller = controller();
    let mut sends = JoinSet::new();
    let welcome = controller.snapshot().active_id.clone();
    handle_input(&controller, &mut sends, "/new")?;

    handle_input(&controller, &mut sends, "/select 2")?;
    assert_eq!(controller.snapshot().active_id, welcome);
    return Ok(());
}

#[test]
fn it_ignores_out_of_range_selections() -> Result<()> {
    let controller = controller();
    let mut sends = JoinSet::new();
    let before = controller.snapshot();

    handle_input(&controller, &mut sends, "/select 9")?;
    handle_input(&controller, &mut sends, "/select 0")?;
    handle_input(&controller, &mut sends, "/select")?;

    let after = controller.snapshot();
    assert_eq!(after.active_id, before.active_id);
    assert_eq!(after.version, before.version);
    return Ok(());
}

#[tokio::test]
async fn it_sends_plain_text_to_the_active_conversation() -> Result<()> {
    let controller = controller();
    let mut sends = JoinSet::new();
    handle_input(&controller, &mut sends, "How salty is the Atlantic?")?;
    assert_eq!(sends.len(), 1);
    drain(&mut sends).await?;

    assert_eq!(
        active_texts(&controller),
        vec![
            "How salty is the Atlantic?",
            "You asked: How salty is the Atlantic?"
        ]
    );
    return Ok(());
}

#[tokio::test]
async fn it_sends_suggestions_by_number() -> Result<()> {
    let controller = controller();
    let mut sends = JoinSet::new();
    handle_input(&controller, &mut sends, "/suggest 3")?;
    drain(&mut sends).await?;

    assert_eq!(active_texts(&controller)[0], SUGGESTIONS[2]);
    return Ok(());
}

#[tokio::test]
async fn it_finishes_pending_sends_when_input_ends() -> Result<()> {
    let controller = controller();
    let input = FramedRead::new("hello\n".as_bytes(), LinesCodec::new());

    run(controller.clone(), input).await?;

    assert_eq!(active_texts(&controller), vec!["hello", "You asked: hello"]);
    assert!(controller.snapshot().pending.is_empty());
    return Ok(());
}

#[tokio::test]
async fn it_finishes_pending_sends_in_every_conversation_on_quit() -> Result<()> {
    let controller = controller();
    let welcome = controller.snapshot().active_id.unwrap();
    let input = FramedRead::new(
        "first question\n/new\nsecond question\n/quit\n".as_bytes(),
        LinesCodec::new(),
    );

    run(controller.clone(), input).await?;

    let snapshot = controller.snapshot();
    let texts = |id: &ConversationId| {
        return snapshot
            .get(id)
            .unwrap()
            .messages()
            .iter()
            .skip(1)
            .map(|msg| return msg.text.to_string())
            .collect::<Vec<String>>();
    };
    assert_eq!(
        texts(&welcome),
        vec!["first question", "You asked: first question"]
    );
    assert_eq!(
        texts(snapshot.active_id.as_ref().unwrap()),
        vec!["second question", "You asked: second question"]
    );
    assert!(snapshot.pending.is_empty());
    return Ok(());
}
