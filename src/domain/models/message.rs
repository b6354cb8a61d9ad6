#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;

use super::Sender;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
    mtype: MessageType,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Message {
        return Message {
            sender,
            text: text.to_string(),
            timestamp: Local::now(),
            mtype: MessageType::Normal,
        };
    }

    pub fn new_with_type(sender: Sender, mtype: MessageType, text: &str) -> Message {
        return Message {
            sender,
            text: text.to_string(),
            timestamp: Local::now(),
            mtype,
        };
    }

    /// True only for the synthetic bot message recorded when a dispatch to
    /// the backend fails.
    pub fn is_error(&self) -> bool {
        return self.mtype == MessageType::Error;
    }

    /// The whole text on a single line, shortened to `max_len` characters
    /// with a trailing ellipsis when it doesn't fit.
    pub fn preview(&self, max_len: usize) -> String {
        let line = self.text.split_whitespace().collect::<Vec<&str>>().join(" ");
        if line.chars().count() <= max_len {
            return line;
        }

        let keep = max_len.saturating_sub(3);
        let head = line.chars().take(keep).collect::<String>();
        return format!("{head}...");
    }
}
