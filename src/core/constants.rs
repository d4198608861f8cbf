//! Shared constants used across the application

/// Seed assistant message every fresh conversation starts with.
pub const DEFAULT_GREETING: &str =
    "Hi! I'm the Headstarter support assistant. How can I help you today?";

/// Replaces the reply placeholder when a send fails for any reason.
pub const APOLOGY_MESSAGE: &str = "I'm sorry, but I encountered an error. Please try again later.";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Path of the chat-completion endpoint, relative to the base URL.
pub const CHAT_ENDPOINT_PATH: &str = "api/chat";

/// Label recorded for every chat started with "new chat".
pub const NEW_CHAT_LABEL: &str = "New Chat";
