#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_new_chat()
            || cmd.is_list_chats()
            || cmd.is_select_chat()
            || cmd.is_suggest()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// First argument parsed as a 1-based number, if there is one.
    pub fn number_arg(&self) -> Option<usize> {
        return self.args.first().and_then(|arg| return arg.parse::<usize>().ok());
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_new_chat(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_list_chats(&self) -> bool {
        return ["/ls", "/chats"].contains(&self.command.as_str());
    }

    pub fn is_select_chat(&self) -> bool {
        return ["/s", "/select"].contains(&self.command.as_str());
    }

    pub fn is_suggest(&self) -> bool {
        return ["/sg", "/suggest"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
