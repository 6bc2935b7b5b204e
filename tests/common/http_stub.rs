//! Local HTTP doubles for driving the real network clients in tests.
//!
//! `start_http_responder` serves one canned response, for exercising the
//! Jupiter client's status/body handling. `JsonRpcScript` plus
//! `start_json_rpc_server` stand in for a Solana JSON-RPC node, with results
//! scripted per method, so the broadcast/confirmation path runs against the
//! real RPC client without a validator.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serve the given status line and body to every request, on a fresh local
/// port. Returns the base URL.
pub async fn start_http_responder(
    status_line: &'static str,
    content_type: &'static str,
    body: String,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind local responder");
    let addr = listener.local_addr().expect("local responder addr");

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { break };
            let body = body.clone();
            tokio::spawn(async move {
                if read_request(&mut stream).await.is_none() {
                    return;
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Per-method scripted results for a JSON-RPC node double. Results queued
/// with [`push`](Self::push) are consumed in order;
/// [`respond_always`](Self::respond_always) answers a method any number of
/// times once its queue is drained.
#[derive(Default)]
pub struct JsonRpcScript {
    queued: Mutex<HashMap<String, VecDeque<Value>>>,
    repeated: Mutex<HashMap<String, Value>>,
}

impl JsonRpcScript {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, method: &str, result: Value) {
        self.queued.lock().entry(method.to_string()).or_default().push_back(result);
    }

    pub fn respond_always(&self, method: &str, result: Value) {
        self.repeated.lock().insert(method.to_string(), result);
    }

    fn take(&self, method: &str) -> Option<Value> {
        if let Some(result) = self.queued.lock().get_mut(method).and_then(|queue| queue.pop_front())
        {
            return Some(result);
        }
        self.repeated.lock().get(method).cloned()
    }
}

/// Start a scripted JSON-RPC node on a fresh local port. An unscripted method
/// gets a JSON-RPC error back, so a test fails fast instead of hanging.
pub async fn start_json_rpc_server(script: Arc<JsonRpcScript>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind local rpc node");
    let addr = listener.local_addr().expect("local rpc node addr");

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { break };
            let script = script.clone();
            tokio::spawn(async move {
                let Some(body) = read_request(&mut stream).await else { return };
                let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                let id = request.get("id").cloned().unwrap_or(Value::Null);
                let method = request.get("method").and_then(Value::as_str).unwrap_or_default();

                let reply = match script.take(method) {
                    Some(result) => json!({"jsonrpc": "2.0", "result": result, "id": id}),
                    None => json!({
                        "jsonrpc": "2.0",
                        "error": {
                            "code": -32601,
                            "message": format!("no scripted response for {method}"),
                        },
                        "id": id,
                    }),
                };

                let payload = reply.to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                    payload.len(),
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Read one HTTP request off the stream, returning its body.
async fn read_request(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf.split_off(header_end);
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    Some(body)
}
