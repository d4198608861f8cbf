//! Wingman is a terminal chat client that streams replies from a
//! chat-completion endpoint.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation, the send state machine, incremental
//!   UTF-8 decoding, and the streaming HTTP consumer.
//! - [`ui`] runs the line-oriented chat loop and renders the transcript.
//! - [`commands`] implements the slash commands typed at the prompt.
//! - [`cli`] parses arguments and dispatches to the chat loop, the one-shot
//!   `say` command, or config management.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
