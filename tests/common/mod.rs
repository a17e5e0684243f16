// Shared harness: an axum server on an ephemeral port that records every request.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use sakhatype::storage::{MemoryStorage, Storage};
use sakhatype::{ClientConfig, ClientContext};

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Captured>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Captured {
        self.requests().pop().expect("no request reached the server")
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    recorder.0.lock().unwrap().push(Captured {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        headers: parts.headers.clone(),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub struct MockServer {
    pub base_url: String,
    pub recorder: Recorder,
}

impl MockServer {
    pub async fn start(router: Router) -> Self {
        let recorder = Recorder::default();
        let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            recorder,
        }
    }

    pub fn context(&self) -> ClientContext {
        self.context_with_storage(Arc::new(MemoryStorage::new()))
    }

    pub fn context_with_storage(&self, storage: Arc<dyn Storage>) -> ClientContext {
        ClientContext::init(&ClientConfig::with_base_url(&self.base_url), storage).unwrap()
    }
}

pub fn profile_json(username: &str, best_wpm: f64) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "level": 4,
        "total_tests": 31,
        "total_time_seconds": 1240,
        "best_wpm": best_wpm,
        "best_accuracy": 97.5,
        "total_experience": 5300,
        "created_at": "2024-11-02T08:15:00"
    })
}

pub fn token_json(token: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "username": username
    })
}
