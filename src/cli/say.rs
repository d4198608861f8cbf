//! One-shot "say" command: send a single message, stream the reply to stdout.

use std::error::Error;
use std::io::{self, Write};

use crate::core::app::{App, AppInitConfig, StreamUpdate};
use crate::core::chat_stream::{ChatStreamService, StreamReceiver};
use crate::core::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum SayOutcome {
    Completed,
    /// The send failed; carries the text that replaced the reply.
    Failed(String),
}

pub async fn run_say(
    prompt: Vec<String>,
    config: &Config,
    endpoint: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: wingman say <prompt>");
        std::process::exit(1);
    }

    let mut app = App::new(AppInitConfig::from_config(config, endpoint));
    let Some(params) = app.send_message(&prompt) else {
        return Ok(());
    };

    let (stream_service, mut rx) = ChatStreamService::new();
    stream_service.spawn_stream(params);

    let mut stdout = io::stdout();
    match stream_reply_to(&mut app, &mut rx, &mut stdout).await? {
        SayOutcome::Completed => {
            writeln!(stdout)?;
            Ok(())
        }
        SayOutcome::Failed(apology) => {
            writeln!(stdout)?;
            eprintln!("❌ {apology}");
            std::process::exit(1);
        }
    }
}

/// Apply stream messages until the send settles, writing reply text to `out`
/// as it arrives.
pub async fn stream_reply_to<W: Write>(
    app: &mut App,
    rx: &mut StreamReceiver,
    out: &mut W,
) -> io::Result<SayOutcome> {
    while app.is_in_flight() {
        let Some((message, stream_id)) = rx.recv().await else {
            break;
        };
        match app.apply_stream_message(message, stream_id) {
            StreamUpdate::Appended(text) => {
                write!(out, "{text}")?;
                out.flush()?;
            }
            StreamUpdate::Replaced(text) => return Ok(SayOutcome::Failed(text)),
            StreamUpdate::Started | StreamUpdate::Finished | StreamUpdate::Ignored => {}
        }
    }
    Ok(SayOutcome::Completed)
}
