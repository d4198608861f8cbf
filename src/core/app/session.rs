use reqwest::Client;
use tokio_util::sync::CancellationToken;

/// Connection details and bookkeeping for the current stream.
pub struct SessionContext {
    pub client: Client,
    pub endpoint: String,
    pub stream_cancel_token: Option<CancellationToken>,
    /// Incremented for every send; stream messages tagged with any other id
    /// belong to an abandoned send.
    pub current_stream_id: u64,
}

impl SessionContext {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            stream_cancel_token: None,
            current_stream_id: 0,
        }
    }

    /// Allocate the id and cancellation token for a new stream.
    pub fn begin_stream(&mut self) -> (CancellationToken, u64) {
        self.current_stream_id += 1;
        let token = CancellationToken::new();
        self.stream_cancel_token = Some(token.clone());
        (token, self.current_stream_id)
    }

    pub fn cancel_stream(&mut self) {
        if let Some(token) = self.stream_cancel_token.take() {
            token.cancel();
        }
    }

    pub fn clear_stream(&mut self) {
        self.stream_cancel_token = None;
    }
}
