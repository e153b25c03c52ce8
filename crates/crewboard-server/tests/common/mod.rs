#![allow(dead_code)]

use async_trait::async_trait;
use crewboard_api::ApiError;
use crewboard_server::{build_router, ApiConfig, AppState, Mailer};
use crewboard_store::Store;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub struct Sent {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Captures outbound mail so tests can read verification and reset
/// tokens the way a real recipient would.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<Sent>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        self.sent.lock().unwrap().push(Sent {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

impl CapturingMailer {
    pub fn last_token_for(&self, to: &str, prefix: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == to && m.body.starts_with(prefix))
            .map(|m| m.body[prefix.len()..].to_string())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    pub mailer: Arc<CapturingMailer>,
}

pub async fn spawn_server() -> TestServer {
    let store = Store::open_in_memory().expect("in-memory store");
    let mailer = Arc::new(CapturingMailer::default());
    let state = AppState::with_mailer(store, ApiConfig::default(), mailer.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestServer {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        mailer,
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Registers a user and returns their bearer token.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let res = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await
            .expect("register request");
        assert_eq!(res.status(), 201, "register failed for {email}");
        let body: Value = res.json().await.expect("register body");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn create_task(&self, token: &str, payload: Value) -> Value {
        let res = self
            .client
            .post(self.url("/tasks"))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .expect("create task request");
        assert_eq!(res.status(), 201, "create task failed");
        res.json().await.expect("task body")
    }

    pub async fn get_json(&self, token: &str, path: &str) -> (u16, Value) {
        let res = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request");
        let status = res.status().as_u16();
        let body = res.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
