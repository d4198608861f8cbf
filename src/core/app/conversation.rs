use crate::core::constants::NEW_CHAT_LABEL;
use crate::core::message::Message;
use chrono::{DateTime, Local};

/// An entry in the recent-chats list, recorded each time a new chat starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChat {
    pub id: usize,
    pub label: String,
    pub started_at: DateTime<Local>,
}

impl RecentChat {
    pub fn title(&self) -> String {
        format!("Chat {}", self.id)
    }
}

/// The message thread plus the text the user is composing.
///
/// Always holds at least the greeting. While a send is in flight the last
/// message is the assistant placeholder that stream chunks are appended to.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    input: String,
    greeting: String,
    recent_chats: Vec<RecentChat>,
}

impl Conversation {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![Message::assistant(greeting.clone())],
            input: String::new(),
            greeting,
            recent_chats: Vec::new(),
        }
    }

    /// Append the user's message and an empty assistant placeholder.
    ///
    /// Returns the history to send: everything up to and including the new
    /// user message, without the placeholder.
    pub fn append_user_message(&mut self, text: impl Into<String>) -> Vec<Message> {
        self.messages.push(Message::user(text));
        let history = self.messages.clone();
        self.messages.push(Message::assistant(String::new()));
        history
    }

    pub fn append_to_last_message(&mut self, chunk: &str) {
        if let Some(last) = self.messages.last_mut() {
            last.content.push_str(chunk);
        }
    }

    pub fn overwrite_last_message(&mut self, content: impl Into<String>) {
        if let Some(last) = self.messages.last_mut() {
            last.content = content.into();
        }
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::assistant(self.greeting.clone()));
        self.input.clear();
    }

    /// Record a recent-chat entry and start over from the greeting.
    pub fn new_chat(&mut self) -> &RecentChat {
        let id = self.recent_chats.len() + 1;
        self.recent_chats.push(RecentChat {
            id,
            label: NEW_CHAT_LABEL.to_string(),
            started_at: Local::now(),
        });
        self.reset();
        &self.recent_chats[id - 1]
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Hand out the pending input, leaving the buffer empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn recent_chats(&self) -> &[RecentChat] {
        &self.recent_chats
    }

    #[cfg(test)]
    pub(crate) fn clear_for_test(&mut self) {
        self.messages.clear();
    }
}
