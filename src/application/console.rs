#[cfg(test)]
#[path = "console_test.rs"]
mod tests;

use anyhow::Result;
use futures::StreamExt;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::io;
use tokio::io::AsyncRead;
use tokio::task::JoinError;
use tokio::task::JoinSet;
use tokio_util::codec::FramedRead;
use tokio_util::codec::LinesCodec;

use super::view::format_chat_list;
use super::view::format_suggestions;
use super::view::ConsoleView;
use super::view::Line;
use super::view::LineKind;
use crate::domain::models::suggestion;
use crate::domain::models::SlashCommand;
use crate::domain::services::ConversationController;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - Starts a new conversation and switches to it.
- /chats (/ls) - Lists all conversations, most recent first. The active one is marked with *.
- /select (/s) [NUMBER] - Switches to a conversation by its number from /chats. Replies still pending in other conversations keep arriving there.
- /suggest (/sg) [NUMBER?] - Lists suggested questions, or asks suggestion NUMBER in the active conversation.
- /quit /exit (/q) - Exit FloatChat.
- /help (/h) - Provides this help menu.

Anything else you type is sent as a question in the active conversation.
        "#;

    return text.trim().to_string();
}

enum Flow {
    Continue,
    Quit,
}

fn paint(line: &Line) -> String {
    let text = line.text.as_str();
    match line.kind {
        LineKind::Header => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.bold())
                .to_string();
        }
        LineKind::User => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.cyan())
                .to_string();
        }
        LineKind::Bot => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.green())
                .to_string();
        }
        LineKind::Error => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.red())
                .to_string();
        }
        LineKind::Notice => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.yellow())
                .to_string();
        }
    }
}

fn print_lines(lines: &[Line]) {
    for line in lines {
        println!("{}", paint(line));
    }
}

fn dispatch(controller: &ConversationController, sends: &mut JoinSet<()>, text: &str) {
    let active_id = match controller.active_conversation_id() {
        Some(active_id) => active_id,
        None => {
            print_lines(&[Line::notice("There is no active conversation, start one with /new.")]);
            return;
        }
    };

    if controller.is_dispatch_pending_for(&active_id) {
        print_lines(&[Line::notice(
            "Still waiting for the last reply in this conversation.",
        )]);
        return;
    }

    let controller = controller.clone();
    let text = text.to_string();
    sends.spawn(async move {
        match controller.send_user_message(&active_id, &text).await {
            Ok(outcome) => {
                tracing::debug!(conversation = %active_id, outcome = ?outcome, "Send finished");
            }
            Err(err) => {
                tracing::warn!(conversation = %active_id, error = %err, "Send rejected");
            }
        }
    });
}

fn handle_input(
    controller: &ConversationController,
    sends: &mut JoinSet<()>,
    input: &str,
) -> Result<Flow> {
    let command = match SlashCommand::parse(input) {
        Some(command) => command,
        None => {
            dispatch(controller, sends, input);
            return Ok(Flow::Continue);
        }
    };

    if command.is_quit() {
        return Ok(Flow::Quit);
    }

    if command.is_new_chat() {
        controller.create_new_conversation();
        return Ok(Flow::Continue);
    }

    if command.is_list_chats() {
        println!("{}", format_chat_list(&controller.snapshot()));
        return Ok(Flow::Continue);
    }

    if command.is_select_chat() {
        let snapshot = controller.snapshot();
        let target = command
            .number_arg()
            .and_then(|n| return n.checked_sub(1))
            .and_then(|idx| return snapshot.conversations.get(idx));

        match target {
            Some(conversation) => controller.select_conversation(conversation.id())?,
            None => print_lines(&[Line::notice(
                "Pick a conversation number from /chats, for example `/select 2`.",
            )]),
        }
        return Ok(Flow::Continue);
    }

    if command.is_suggest() {
        match command.number_arg() {
            Some(n) => match suggestion(n) {
                Some(text) => dispatch(controller, sends, text),
                None => print_lines(&[Line::notice(&format!(
                    "{n} is not a valid suggestion number."
                ))]),
            },
            None => println!("{}", format_suggestions()),
        }
        return Ok(Flow::Continue);
    }

    if command.is_help() {
        println!("{}", help_text());
    }

    return Ok(Flow::Continue);
}

/// Runs the terminal front end on stdin until the user quits or stdin
/// closes.
pub async fn start(controller: ConversationController) -> Result<()> {
    return run(controller, FramedRead::new(io::stdin(), LinesCodec::new())).await;
}

fn log_finished_send(res: Result<(), JoinError>) {
    if let Err(err) = res {
        tracing::error!(error = ?err, "Send task failed");
    }
}

/// Drives the console from any line source. Rendering is driven purely by
/// the controller's snapshots. Sends still in flight when input ends are
/// awaited, so their replies land in their conversations before returning.
async fn run<R: AsyncRead + Unpin>(
    controller: ConversationController,
    mut input: FramedRead<R, LinesCodec>,
) -> Result<()> {
    let mut snapshots = controller.subscribe();
    let mut view = ConsoleView::default();
    let mut sends = JoinSet::new();

    print_lines(&view.update(&snapshots.borrow_and_update()));
    print_lines(&[Line::notice(
        "Ask about ocean temperature, salinity, or any ARGO data. Type /help for commands.",
    )]);

    loop {
        tokio::select! {
            line = input.next() => {
                let line = match line {
                    Some(line) => line?,
                    None => break,
                };

                if let Flow::Quit = handle_input(&controller, &mut sends, &line)? {
                    break;
                }
            }
            Some(res) = sends.join_next(), if !sends.is_empty() => {
                log_finished_send(res);
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }

                let snapshot = snapshots.borrow_and_update().clone();
                print_lines(&view.update(&snapshot));
            }
        }
    }

    if !sends.is_empty() {
        print_lines(&[Line::notice("Waiting for pending replies...")]);
    }
    while let Some(res) = sends.join_next().await {
        log_finished_send(res);
    }

    let snapshot = snapshots.borrow_and_update().clone();
    print_lines(&view.update(&snapshot));

    return Ok(());
}
