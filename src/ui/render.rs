//! Plain-text rendering of the conversation. Message content is printed as
//! is; markdown is left for the reader's eyes.

use crate::core::message::{Message, Role};

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "Wingman";

pub fn speaker_label(role: Role) -> &'static str {
    match role {
        Role::User => USER_LABEL,
        Role::Assistant => ASSISTANT_LABEL,
    }
}

/// Prefix printed before streamed reply text.
pub fn reply_prefix() -> String {
    format!("{ASSISTANT_LABEL}: ")
}

pub fn input_prompt() -> String {
    format!("{USER_LABEL}: ")
}

/// Shown when a message is typed while a reply is streaming. Starts on its
/// own line so it does not run into the partial reply.
pub fn busy_notice() -> &'static str {
    "\n(still replying, your message was not sent)"
}

pub fn render_message(message: &Message) -> String {
    let label = speaker_label(message.role);
    if message.content.is_empty() {
        return format!("{label}:");
    }
    format!("{label}: {}", message.content)
}

/// Render the whole thread, one blank line between messages.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}
