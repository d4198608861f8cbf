use std::error::Error as StdError;
use std::fmt;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::message::Message;
use crate::core::stream_decoder::Utf8StreamDecoder;

/// Progress reports from a running stream, tagged with the stream id when
/// sent over the channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamMessage {
    /// The endpoint answered with a 2xx status and the body is being read.
    Started,
    /// Decoded reply text, in arrival order.
    Chunk(String),
    /// The send failed. Always followed by `End`.
    Error(String),
    /// The stream task has exited. Sent exactly once per stream.
    End,
}

pub type StreamSender = mpsc::UnboundedSender<(StreamMessage, u64)>;
pub type StreamReceiver = mpsc::UnboundedReceiver<(StreamMessage, u64)>;

/// Everything that can go wrong while sending a message and reading the reply.
#[derive(Debug)]
pub enum ChatError {
    /// The request could not be sent or no response headers arrived.
    Transport(reqwest::Error),
    /// The endpoint answered with a non-2xx status.
    Status(StatusCode),
    /// The connection failed while the body was being read.
    Body(reqwest::Error),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Transport(err) => write!(f, "request failed: {err}"),
            ChatError::Status(status) => write!(f, "endpoint returned {status}"),
            ChatError::Body(err) => write!(f, "reading reply failed: {err}"),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Transport(err) | ChatError::Body(err) => Some(err),
            ChatError::Status(_) => None,
        }
    }
}

pub struct StreamParams {
    pub client: reqwest::Client,
    pub endpoint: String,
    /// Full history up to and including the new user message.
    pub history: Vec<Message>,
    pub cancel_token: CancellationToken,
    pub stream_id: u64,
}

/// Sends `End` when dropped, so the receiver learns the stream is over on
/// every exit path: normal completion, handled error, cancellation, or a
/// panic unwinding through the task.
struct EndGuard {
    tx: StreamSender,
    stream_id: u64,
}

impl Drop for EndGuard {
    fn drop(&mut self) {
        let _ = self.tx.send((StreamMessage::End, self.stream_id));
    }
}

#[derive(Clone)]
pub struct ChatStreamService {
    tx: StreamSender,
}

impl ChatStreamService {
    pub fn new() -> (Self, StreamReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_stream(&self, params: StreamParams) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let stream_id = params.stream_id;
            let cancel_token = params.cancel_token.clone();
            let _end = EndGuard {
                tx: tx.clone(),
                stream_id,
            };

            tokio::select! {
                result = stream_reply(params, &tx) => {
                    if let Err(err) = result {
                        warn!(stream_id, error = %err, "chat request failed");
                        let _ = tx.send((StreamMessage::Error(err.to_string()), stream_id));
                    }
                }
                _ = cancel_token.cancelled() => {
                    debug!(stream_id, "chat stream cancelled");
                }
            }
        })
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: StreamMessage, stream_id: u64) {
        let _ = self.tx.send((message, stream_id));
    }
}

/// POST the history and forward the decoded reply body chunk by chunk.
async fn stream_reply(params: StreamParams, tx: &StreamSender) -> Result<(), ChatError> {
    let StreamParams {
        client,
        endpoint,
        history,
        stream_id,
        ..
    } = params;

    debug!(stream_id, %endpoint, messages = history.len(), "sending chat request");

    let response = client
        .post(&endpoint)
        .header(CONTENT_TYPE, "application/json")
        .json(&history)
        .send()
        .await
        .map_err(ChatError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChatError::Status(status));
    }
    let _ = tx.send((StreamMessage::Started, stream_id));

    let mut body = response.bytes_stream();
    let mut decoder = Utf8StreamDecoder::new();
    let mut received = 0usize;

    while let Some(chunk) = body.next().await {
        let bytes = chunk.map_err(ChatError::Body)?;
        received += bytes.len();
        let text = decoder.decode(&bytes);
        if !text.is_empty() {
            let _ = tx.send((StreamMessage::Chunk(text), stream_id));
        }
    }

    let tail = decoder.finish();
    if !tail.is_empty() {
        let _ = tx.send((StreamMessage::Chunk(tail), stream_id));
    }

    debug!(stream_id, bytes = received, "chat stream complete");
    Ok(())
}
