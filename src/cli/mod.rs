//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;
pub mod version;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::cli::version::long_version;
use crate::core::app::{App, AppInitConfig};
use crate::core::config::{path_display, Config, ConfigKey};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "wingman")]
#[command(version, long_version = long_version())]
#[command(about = "A terminal chat client that streams replies from a chat endpoint")]
#[command(
    long_about = "Wingman keeps one conversation thread, posts it to a chat-completion \
endpoint, and prints the reply as it streams in.\n\n\
Chat commands:\n\
  /reset            Clear the conversation back to the greeting\n\
  /new              Start a new chat\n\
  /chats            List chats started this session\n\
  /history          Print the whole conversation again\n\
  /quit             Leave wingman\n\n\
Environment Variables:\n\
  RUST_LOG          Diagnostic log filter (default: warn), written to stderr"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat endpoint URL for this run, overriding the configured base URL
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// Send one message and print the streamed reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value (base-url, greeting)
    Set {
        key: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset { key: String },
    /// Print the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let app = App::new(AppInitConfig::from_config(&config, args.endpoint));
            run_chat(app).await
        }
        Commands::Say { prompt } => {
            let config = Config::load()?;
            run_say(prompt, &config, args.endpoint).await
        }
        Commands::Set { key, value } => {
            let key = parse_key(&key);
            let value = value.join(" ");
            if value.trim().is_empty() {
                eprintln!("⚠️  Provide a value, e.g. wingman set {key} <value>");
                std::process::exit(1);
            }
            let mut config = Config::load()?;
            config.set(key, value.clone());
            config.save()?;
            println!("✅ Set {key} to: {value}");
            Ok(())
        }
        Commands::Unset { key } => {
            let key = parse_key(&key);
            let mut config = Config::load()?;
            config.unset(key);
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            println!("  file: {}", path_display(Config::config_path()?));
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> ConfigKey {
    match ConfigKey::parse(key) {
        Some(key) => key,
        None => {
            eprintln!("❌ Unknown config key: {key}");
            let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
            eprintln!("Known keys: {}", known.join(", "));
            std::process::exit(1);
        }
    }
}
