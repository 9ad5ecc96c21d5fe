//! Minimal HTTP/1.1 stub of the Figma REST API for tests.
//!
//! Serves canned `(status, body)` pairs, or verbatim raw responses, by request
//! path and records every request it receives. Unknown paths answer 404. The server runs on a
//! background thread until the process exits.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A request as seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Canned(u16, String),
    /// Written to the socket as-is, status line included.
    Raw(String),
}

/// Handle to a running stub server.
#[derive(Debug, Clone)]
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Start serving `routes`: `(path, status, body)`.
    pub fn start<P, B>(routes: impl IntoIterator<Item = (P, u16, B)>) -> Self
    where
        P: Into<String>,
        B: Into<String>,
    {
        Self::serve(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.into(), Reply::Canned(status, body.into())))
                .collect(),
        )
    }

    /// Start serving `routes`: `(path, raw response)`. Used for malformed or
    /// truncated responses that [`StubServer::start`] cannot express.
    pub fn start_raw<P, R>(routes: impl IntoIterator<Item = (P, R)>) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Self::serve(
            routes
                .into_iter()
                .map(|(path, raw)| (path.into(), Reply::Raw(raw.into())))
                .collect(),
        )
    }

    fn serve(routes: HashMap<String, Reply>) -> Self {
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let port = listener.local_addr().expect("stub server address").port();

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    /// Root URL without a trailing slash, suitable for `FIGMA_API_BASE`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Reply>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let Some(request) = parse_request(&String::from_utf8_lossy(&raw)) else {
        return;
    };

    let reply = routes
        .get(&request.path)
        .cloned()
        .unwrap_or_else(|| Reply::Canned(404, r#"{"status":404,"err":"Not found"}"#.to_string()));

    if let Ok(mut all) = recorded.lock() {
        all.push(request);
    }

    let response = match reply {
        Reply::Canned(status, body) => format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len(),
        ),
        Reply::Raw(raw) => raw,
    };
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn parse_request(raw: &str) -> Option<RecordedRequest> {
    let mut lines = raw.split("\r\n");
    let mut start = lines.next()?.split_whitespace();
    let method = start.next()?.to_string();
    let path = start.next()?.to_string();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    Some(RecordedRequest {
        method,
        path,
        headers,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A [`crate::JsonSource`] answering from a fixed table, without sockets.
///
/// Unknown URLs answer like a 404. Every requested URL is recorded.
#[derive(Debug, Default)]
pub struct CannedSource {
    responses: HashMap<String, (u16, String)>,
    calls: Mutex<Vec<String>>,
}

impl CannedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a 200 and `body`.
    pub fn ok(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses.insert(url.into(), (200, body.to_string()));
        self
    }

    /// Answer `url` with `status` and a raw `body`.
    pub fn status(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), (status, body.into()));
        self
    }

    /// URLs requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl crate::JsonSource for CannedSource {
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, crate::SyncError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_owned());
        }
        let (status, body) = self
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| (404, "Not found".to_string()));
        if !(200..300).contains(&status) {
            return Err(crate::SyncError::Http {
                status,
                url: url.to_owned(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| crate::SyncError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}
