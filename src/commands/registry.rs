use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    /// Text after the command name, trimmed.
    pub args: &'a str,
}

impl Command {
    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands().iter().find(|command| command.matches(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        aliases: &["?"],
        help: "Show available commands, or details for one (/help <command>).",
        handler: super::handle_help,
    },
    Command {
        name: "reset",
        aliases: &["refresh"],
        help: "Clear the conversation back to the greeting.",
        handler: super::handle_reset,
    },
    Command {
        name: "new",
        aliases: &[],
        help: "Start a new chat and add it to the recent chats list.",
        handler: super::handle_new_chat,
    },
    Command {
        name: "chats",
        aliases: &[],
        help: "List chats started this session.",
        handler: super::handle_chats,
    },
    Command {
        name: "history",
        aliases: &[],
        help: "Print the whole conversation again.",
        handler: super::handle_history,
    },
    Command {
        name: "quit",
        aliases: &["exit"],
        help: "Leave wingman.",
        handler: super::handle_quit,
    },
];
