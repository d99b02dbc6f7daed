//! Shared test helpers: fakes and a minimal HTTP stub

#![allow(dead_code)]

use homework_status_bot::{BotError, HomeworkSource, NotificationChannel, Result, SendResult};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Source that replays scripted answers, then reports "no updates"
#[derive(Default)]
pub struct FakeSource {
    answers: RefCell<VecDeque<Result<Value>>>,
    calls: RefCell<Vec<i64>>,
}

impl FakeSource {
    pub fn new(answers: Vec<Result<Value>>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// `from_date` of every fetch so far
    pub fn calls(&self) -> Vec<i64> {
        self.calls.borrow().clone()
    }
}

impl HomeworkSource for FakeSource {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.calls.borrow_mut().push(from_date);
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"homeworks": []})))
    }
}

/// Channel that records messages; can be told to fail the next sends
#[derive(Default)]
pub struct FakeChannel {
    sent: RefCell<Vec<String>>,
    failures: RefCell<u32>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(times: u32) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            failures: RefCell::new(times),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl NotificationChannel for FakeChannel {
    fn name(&self) -> &str {
        "fake"
    }

    async fn send(&self, text: &str) -> Result<SendResult> {
        let mut failures = self.failures.borrow_mut();
        if *failures > 0 {
            *failures -= 1;
            return Err(BotError::Messaging("chat not found".to_string()));
        }
        self.sent.borrow_mut().push(text.to_string());
        Ok(SendResult::Sent)
    }
}

pub fn homeworks(name: &str, status: &str, current_date: i64) -> Value {
    json!({
        "homeworks": [
            {"homework_name": name, "status": status},
            {"homework_name": "older.zip", "status": "approved"}
        ],
        "current_date": current_date
    })
}

/// HTTP server answering every request with a fixed status and body
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let request = read_request(&mut stream).await;
                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, requests }
    }

    /// Raw requests received so far (head and body)
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}
