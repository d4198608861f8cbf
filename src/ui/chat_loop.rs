//! Interactive chat loop: reads lines from stdin, runs slash commands, and
//! prints streamed replies as they arrive.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::{process_input, CommandResult};
use crate::core::app::{App, StreamUpdate};
use crate::core::chat_stream::{ChatStreamService, StreamParams, StreamReceiver};
use crate::ui::render::{busy_notice, input_prompt, render_transcript, reply_prefix};

/// What the loop should do with one line of user input.
pub enum LineOutcome {
    /// Nothing to do (blank line).
    Nothing,
    Print(String),
    /// A send was started; spawn the stream with these parameters.
    Send(StreamParams),
    /// A reply is still streaming, so the message was not sent.
    Busy,
    Quit,
}

pub fn handle_line(app: &mut App, line: &str) -> LineOutcome {
    let is_command = line.trim_start().starts_with('/');
    if app.is_in_flight() && !is_command {
        return LineOutcome::Busy;
    }

    match process_input(app, line) {
        CommandResult::Print(text) => LineOutcome::Print(text),
        CommandResult::Quit => LineOutcome::Quit,
        CommandResult::ProcessAsMessage(text) => {
            app.conversation.set_input(text);
            match app.submit_input() {
                Some(params) => LineOutcome::Send(params),
                None => LineOutcome::Nothing,
            }
        }
    }
}

fn show_prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", input_prompt())?;
    stdout.flush()
}

/// Print one applied stream update. Returns `true` once the send has settled.
fn write_update<W: Write>(out: &mut W, update: StreamUpdate) -> io::Result<bool> {
    match update {
        StreamUpdate::Appended(text) => {
            write!(out, "{text}")?;
            out.flush()?;
            Ok(false)
        }
        StreamUpdate::Replaced(text) => {
            writeln!(out)?;
            writeln!(out, "{text}")?;
            Ok(true)
        }
        StreamUpdate::Finished => {
            writeln!(out)?;
            Ok(true)
        }
        StreamUpdate::Started | StreamUpdate::Ignored => Ok(false),
    }
}

/// Apply stream messages until the current send settles.
///
/// Used once input has closed, so a reply already in flight is still shown
/// before the loop exits.
pub async fn drain_in_flight<W: Write>(
    app: &mut App,
    rx: &mut StreamReceiver,
    out: &mut W,
) -> io::Result<()> {
    while app.is_in_flight() {
        let Some((message, stream_id)) = rx.recv().await else {
            break;
        };
        let update = app.apply_stream_message(message, stream_id);
        if write_update(out, update)? {
            writeln!(out)?;
        }
    }
    Ok(())
}

pub async fn run_chat(mut app: App) -> Result<(), Box<dyn Error>> {
    let (stream_service, mut rx) = ChatStreamService::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    debug!(endpoint = app.endpoint(), "chat loop starting");
    println!("{}", render_transcript(app.conversation.messages()));
    println!();
    show_prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    drain_in_flight(&mut app, &mut rx, &mut io::stdout()).await?;
                    break;
                };
                match handle_line(&mut app, &line) {
                    LineOutcome::Quit => break,
                    LineOutcome::Nothing => show_prompt()?,
                    LineOutcome::Print(text) => {
                        println!("{text}");
                        println!();
                        show_prompt()?;
                    }
                    LineOutcome::Busy => println!("{}", busy_notice()),
                    LineOutcome::Send(params) => {
                        print!("{}", reply_prefix());
                        io::stdout().flush()?;
                        stream_service.spawn_stream(params);
                    }
                }
            }
            Some((message, stream_id)) = rx.recv() => {
                let update = app.apply_stream_message(message, stream_id);
                if write_update(&mut io::stdout(), update)? {
                    println!();
                    show_prompt()?;
                }
            }
        }
    }

    // Stop any reply still streaming before the runtime shuts down.
    app.reset();
    println!();
    Ok(())
}
