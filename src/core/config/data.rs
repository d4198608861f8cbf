use crate::core::constants::{CHAT_ENDPOINT_PATH, DEFAULT_BASE_URL, DEFAULT_GREETING};
use crate::utils::url::construct_api_url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin that serves the chat endpoint (e.g., "http://localhost:3000")
    pub base_url: Option<String>,
    /// Assistant message every fresh conversation starts with
    pub greeting: Option<String>,
}

/// Keys accepted by `wingman set` / `wingman unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    Greeting,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::BaseUrl, ConfigKey::Greeting];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::Greeting => "greeting",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// Full URL of the chat-completion endpoint.
    pub fn chat_endpoint(&self) -> String {
        construct_api_url(self.base_url(), CHAT_ENDPOINT_PATH)
    }

    pub fn greeting(&self) -> &str {
        self.greeting
            .as_deref()
            .filter(|greeting| !greeting.trim().is_empty())
            .unwrap_or(DEFAULT_GREETING)
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::BaseUrl => self.base_url.as_deref(),
            ConfigKey::Greeting => self.greeting.as_deref(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            ConfigKey::BaseUrl => self.base_url = Some(value),
            ConfigKey::Greeting => self.greeting = Some(value),
        }
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::Greeting => self.greeting = None,
        }
    }
}
