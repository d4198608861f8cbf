//! Fixtures shared by unit tests: a ready-made [`App`] and a one-shot HTTP
//! server that plays back a canned chat reply.

use crate::core::app::{App, AppInitConfig};
use crate::core::constants::DEFAULT_GREETING;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub fn create_test_app() -> App {
    create_test_app_for("http://127.0.0.1:9/api/chat")
}

pub fn create_test_app_for(endpoint: &str) -> App {
    App::new(AppInitConfig {
        endpoint: endpoint.to_string(),
        greeting: DEFAULT_GREETING.to_string(),
    })
}

/// What the mock endpoint sends back.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    status: u16,
    body: Vec<Vec<u8>>,
    chunked: bool,
    hold_open: bool,
    truncate: bool,
}

impl CannedResponse {
    /// A 200 reply streamed with chunked transfer encoding, one chunk per item.
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::raw_chunks(
            chunks
                .into_iter()
                .map(|chunk| chunk.as_ref().as_bytes().to_vec())
                .collect(),
        )
    }

    pub fn raw_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: chunks,
            chunked: true,
            hold_open: false,
            truncate: false,
        }
    }

    /// A plain reply with a fixed status and `Content-Length` body.
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: vec![body.as_bytes().to_vec()],
            chunked: false,
            hold_open: false,
            truncate: false,
        }
    }

    /// Keep the connection open after the last chunk instead of terminating
    /// the body.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Close the connection after the last chunk without the terminating
    /// zero-length chunk, so the client sees a broken body.
    pub fn truncated(mut self) -> Self {
        self.truncate = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct MockChatServer {
    pub endpoint: String,
    handle: JoinHandle<Result<CapturedRequest, String>>,
}

impl MockChatServer {
    /// Wait for the server to finish and return the request it received.
    pub async fn request(self) -> CapturedRequest {
        self.handle
            .await
            .expect("mock server task panicked")
            .expect("mock server failed")
    }
}

/// Serve exactly one request on an ephemeral port.
pub async fn spawn_chat_server(response: CannedResponse) -> MockChatServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
        let request = read_http_request(&mut stream).await?;
        write_response(&mut stream, &response)
            .await
            .map_err(|err| err.to_string())?;
        Ok::<_, String>(request)
    });

    MockChatServer {
        endpoint: format!("http://{addr}/api/chat"),
        handle,
    }
}

async fn write_response(stream: &mut TcpStream, response: &CannedResponse) -> std::io::Result<()> {
    let reason = StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown");

    if !response.chunked {
        let body = response.body.concat();
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            response.status,
            reason,
            body.len()
        );
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(&body).await?;
        return stream.flush().await;
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        response.status, reason
    );
    stream.write_all(head.as_bytes()).await?;
    stream.flush().await?;

    for chunk in &response.body {
        stream
            .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
            .await?;
        stream.write_all(chunk).await?;
        stream.write_all(b"\r\n").await?;
        stream.flush().await?;
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    if response.hold_open {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
    if response.truncate {
        return stream.shutdown().await;
    }

    stream.write_all(b"0\r\n\r\n").await?;
    stream.flush().await
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.expect("header end should exist");
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}
