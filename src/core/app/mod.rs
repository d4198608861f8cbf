//! Application state: the conversation, the send state machine, and the
//! session used to reach the chat endpoint.
//!
//! The app is owned by a single task. Stream tasks never touch it directly;
//! they report through [`crate::core::chat_stream::ChatStreamService`] and the
//! owner applies each report with [`App::apply_stream_message`].

use crate::core::config::Config;

pub mod conversation;
pub mod session;
pub mod streaming;


pub use conversation::{Conversation, RecentChat};
pub use session::SessionContext;
pub use streaming::{SendState, StreamUpdate};

pub struct AppInitConfig {
    pub endpoint: String,
    pub greeting: String,
}

impl AppInitConfig {
    /// Build from the loaded config, with an optional one-off endpoint.
    pub fn from_config(config: &Config, endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| config.chat_endpoint()),
            greeting: config.greeting().to_string(),
        }
    }
}

pub struct App {
    pub conversation: Conversation,
    pub session: SessionContext,
    pub send_state: SendState,
}

impl App {
    pub fn new(init_config: AppInitConfig) -> Self {
        Self {
            conversation: Conversation::new(init_config.greeting),
            session: SessionContext::new(init_config.endpoint),
            send_state: SendState::Idle,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.session.endpoint
    }

    /// Drop the current thread and start again from the greeting.
    ///
    /// An outstanding send is cancelled; anything it still reports is
    /// discarded.
    pub fn reset(&mut self) {
        self.abandon_stream();
        self.conversation.reset();
    }

    /// Record a recent-chat entry and reset.
    pub fn new_chat(&mut self) -> RecentChat {
        self.abandon_stream();
        self.conversation.new_chat().clone()
    }
}
