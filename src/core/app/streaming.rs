use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::App;
use crate::core::chat_stream::{StreamMessage, StreamParams};
use crate::core::constants::APOLOGY_MESSAGE;
use crate::core::message::Message;

/// Where the current send is in its lifecycle.
///
/// `Idle → Sending → Streaming → Idle`, with failures from `Sending` or
/// `Streaming` also returning to `Idle`. Only one send can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    /// Request issued, no response headers yet.
    Sending { stream_id: u64 },
    /// Headers received, reply body being read.
    Streaming { stream_id: u64 },
}

impl SendState {
    pub fn is_in_flight(self) -> bool {
        !matches!(self, SendState::Idle)
    }

    pub fn stream_id(self) -> Option<u64> {
        match self {
            SendState::Idle => None,
            SendState::Sending { stream_id } | SendState::Streaming { stream_id } => {
                Some(stream_id)
            }
        }
    }
}

/// What changed after applying a stream message, for the front end to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamUpdate {
    /// The message belonged to an abandoned or unknown stream.
    Ignored,
    Started,
    /// Text appended to the reply placeholder.
    Appended(String),
    /// The reply placeholder was overwritten with this text.
    Replaced(String),
    /// The send is over and the app is idle again.
    Finished,
}

impl App {
    pub fn is_in_flight(&self) -> bool {
        self.send_state.is_in_flight()
    }

    pub fn is_current_stream(&self, stream_id: u64) -> bool {
        self.send_state.stream_id() == Some(stream_id)
    }

    /// Send whatever the user has typed. The input buffer is emptied before
    /// anything else happens, even if the send is refused.
    pub fn submit_input(&mut self) -> Option<StreamParams> {
        let text = self.conversation.take_input();
        self.send_message(&text)
    }

    /// Start a send.
    ///
    /// Returns `None` without touching the conversation when `text` is blank
    /// or another send is still in flight. Otherwise appends the user message
    /// and the reply placeholder, marks the send in flight, and returns the
    /// parameters to hand to `ChatStreamService::spawn_stream`.
    pub fn send_message(&mut self, text: &str) -> Option<StreamParams> {
        if text.trim().is_empty() {
            return None;
        }
        if self.is_in_flight() {
            debug!(state = ?self.send_state, "send ignored while another is in flight");
            return None;
        }

        let history = self.conversation.append_user_message(text);
        let (cancel_token, stream_id) = self.session.begin_stream();
        self.send_state = SendState::Sending { stream_id };
        debug!(stream_id, "send started");

        Some(self.build_stream_params(history, cancel_token, stream_id))
    }

    pub fn build_stream_params(
        &self,
        history: Vec<Message>,
        cancel_token: CancellationToken,
        stream_id: u64,
    ) -> StreamParams {
        StreamParams {
            client: self.session.client.clone(),
            endpoint: self.session.endpoint.clone(),
            history,
            cancel_token,
            stream_id,
        }
    }

    pub fn apply_stream_message(&mut self, message: StreamMessage, stream_id: u64) -> StreamUpdate {
        if !self.is_current_stream(stream_id) {
            return StreamUpdate::Ignored;
        }

        match message {
            StreamMessage::Started => {
                self.send_state = SendState::Streaming { stream_id };
                StreamUpdate::Started
            }
            StreamMessage::Chunk(text) => {
                self.send_state = SendState::Streaming { stream_id };
                self.conversation.append_to_last_message(&text);
                StreamUpdate::Appended(text)
            }
            StreamMessage::Error(error) => {
                warn!(stream_id, %error, "send failed, replacing reply with apology");
                self.conversation.overwrite_last_message(APOLOGY_MESSAGE);
                self.end_stream();
                StreamUpdate::Replaced(APOLOGY_MESSAGE.to_string())
            }
            StreamMessage::End => {
                self.end_stream();
                StreamUpdate::Finished
            }
        }
    }

    fn end_stream(&mut self) {
        self.send_state = SendState::Idle;
        self.session.clear_stream();
    }

    /// Cancel any outstanding send and go idle. Late messages from it no
    /// longer match the current stream and are ignored.
    pub(super) fn abandon_stream(&mut self) {
        if let Some(stream_id) = self.send_state.stream_id() {
            debug!(stream_id, "abandoning in-flight send");
        }
        self.session.cancel_stream();
        self.send_state = SendState::Idle;
    }
}
