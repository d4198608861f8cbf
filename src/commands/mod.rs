//! Slash commands typed at the chat prompt.

mod registry;


pub use registry::{all_commands, find_command, Command, CommandInvocation};

use crate::core::app::App;
use crate::ui::render::render_transcript;

pub enum CommandResult {
    /// Text to show the user; the conversation is otherwise untouched.
    Print(String),
    ProcessAsMessage(String),
    Quit,
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let mut parts = rest.splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match registry::find_command(command_name) {
        Some(command) => (command.handler)(app, CommandInvocation { args }),
        None => CommandResult::Print(format!(
            "Unknown command: /{command_name} (try /help)"
        )),
    }
}

pub(super) fn handle_help(_app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if !invocation.args.is_empty() {
        let name = invocation.args.trim_start_matches('/');
        return match find_command(name) {
            Some(command) => {
                let mut text = format!("/{}: {}", command.name, command.help);
                if !command.aliases.is_empty() {
                    let aliases: Vec<String> = command
                        .aliases
                        .iter()
                        .map(|alias| format!("/{alias}"))
                        .collect();
                    text.push_str(&format!("\nAliases: {}", aliases.join(", ")));
                }
                CommandResult::Print(text)
            }
            None => CommandResult::Print(format!("Unknown command: /{name} (try /help)")),
        };
    }

    let mut help = String::from("Commands:");
    for command in all_commands() {
        help.push_str(&format!("\n  /{:<8} {}", command.name, command.help));
    }
    help.push_str("\nAnything else is sent as a message.");
    CommandResult::Print(help)
}

pub(super) fn handle_reset(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.reset();
    CommandResult::Print(render_transcript(app.conversation.messages()))
}

pub(super) fn handle_new_chat(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let chat = app.new_chat();
    CommandResult::Print(format!(
        "Started {} ({})\n\n{}",
        chat.title(),
        chat.label,
        render_transcript(app.conversation.messages())
    ))
}

pub(super) fn handle_chats(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let chats = app.conversation.recent_chats();
    if chats.is_empty() {
        return CommandResult::Print("No chats started yet. Use /new to start one.".to_string());
    }
    let lines: Vec<String> = chats
        .iter()
        .map(|chat| {
            format!(
                "  {}  {}",
                chat.title(),
                chat.started_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect();
    CommandResult::Print(format!("Recent chats:\n{}", lines.join("\n")))
}

pub(super) fn handle_history(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Print(render_transcript(app.conversation.messages()))
}

pub(super) fn handle_quit(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Quit
}
