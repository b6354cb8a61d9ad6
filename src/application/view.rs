#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use std::collections::HashMap;
use std::collections::HashSet;

use crate::domain::models::Conversation;
use crate::domain::models::ConversationId;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::Snapshot;
use crate::domain::models::SUGGESTIONS;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    Header,
    User,
    Bot,
    Error,
    Notice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn notice(text: &str) -> Line {
        return Line {
            kind: LineKind::Notice,
            text: text.to_string(),
        };
    }

    fn header(conversation: &Conversation) -> Line {
        return Line {
            kind: LineKind::Header,
            text: format!("── {} ({}) ──", conversation.title(), conversation.id()),
        };
    }

    fn bubble(message: &Message) -> Line {
        let kind = match (message.sender, message.is_error()) {
            (_, true) => LineKind::Error,
            (Sender::User, false) => LineKind::User,
            (Sender::Bot, false) => LineKind::Bot,
        };

        return Line {
            kind,
            text: format_bubble(message),
        };
    }
}

pub fn format_bubble(message: &Message) -> String {
    return format!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M"),
        message.sender.to_string(),
        message.text
    );
}

pub fn format_chat_list(snapshot: &Snapshot) -> String {
    return snapshot
        .conversations
        .iter()
        .enumerate()
        .map(|(idx, conversation)| {
            let marker = if snapshot.active_id.as_ref() == Some(conversation.id()) {
                "*"
            } else {
                " "
            };
            let mut line = format!(
                "{marker} ({n}) {title} - {preview}",
                n = idx + 1,
                title = conversation.title(),
                preview = conversation.preview()
            );
            if snapshot.is_dispatch_pending_for(conversation.id()) {
                line += " [waiting for reply]";
            }

            return line;
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn format_suggestions() -> String {
    return SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(idx, suggestion)| return format!("- ({}) {suggestion}", idx + 1))
        .collect::<Vec<String>>()
        .join("\n");
}

/// Tracks what has already been printed, so each snapshot only produces the
/// lines that changed since the last one.
#[derive(Default)]
pub struct ConsoleView {
    active: Option<ConversationId>,
    seen: HashMap<ConversationId, usize>,
    pending: HashSet<ConversationId>,
}

impl ConsoleView {
    pub fn update(&mut self, snapshot: &Snapshot) -> Vec<Line> {
        let mut lines = vec![];

        if snapshot.active_id != self.active {
            self.active = snapshot.active_id.clone();
            if let Some(active) = snapshot.active() {
                lines.push(Line::header(active));
                lines.extend(active.messages().iter().map(Line::bubble));
                self.seen.insert(active.id().clone(), active.messages().len());
            }
        } else if let Some(active) = snapshot.active() {
            let seen = self.seen.get(active.id()).copied().unwrap_or_default();
            lines.extend(active.messages().iter().skip(seen).map(Line::bubble));
            self.seen.insert(active.id().clone(), active.messages().len());
        }

        for conversation in snapshot.conversations.iter() {
            if Some(conversation.id()) == self.active.as_ref() {
                continue;
            }

            let len = conversation.messages().len();
            let seen = *self.seen.entry(conversation.id().clone()).or_insert(len);
            if len <= seen {
                continue;
            }

            for message in conversation.messages().iter().skip(seen) {
                if message.sender != Sender::Bot {
                    continue;
                }
                lines.push(Line::notice(&format!(
                    "New reply in \"{}\" ({}): {}",
                    conversation.title(),
                    conversation.id(),
                    message.preview(40)
                )));
            }
            self.seen.insert(conversation.id().clone(), len);
        }

        if let Some(active_id) = &self.active {
            if snapshot.is_dispatch_pending_for(active_id) && !self.pending.contains(active_id) {
                lines.push(Line::notice("FloatChat is looking into it..."));
            }
        }
        self.pending = snapshot.pending.clone();

        return lines;
    }
}
