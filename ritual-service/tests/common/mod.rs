#![allow(dead_code)]

use reqwest::{Client, Response};
use ritual_service::services::{MemoryStore, MockPushProvider};
use ritual_service::{AppState, Application};
use serde_json::Value;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<MemoryStore>,
    pub push: Arc<MockPushProvider>,
    pub client: Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_push(MockPushProvider::new(true)).await
    }

    pub async fn spawn_with_push(push: MockPushProvider) -> Self {
        let store = Arc::new(MemoryStore::new());
        let push = Arc::new(push);

        let state = AppState {
            store: store.clone(),
            push_provider: push.clone(),
        };

        // Use random port for testing (port 0)
        let app = Application::with_state(0, state)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            push,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers a user and returns its id.
    pub async fn create_user(&self, fcm_token: &str) -> i64 {
        let response = self
            .post_json("/api/user", &serde_json::json!({ "fcm_token": fcm_token }))
            .await;
        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_i64().expect("user id should be a number")
    }

    /// Creates a ritual shared by `user_ids` and returns its id.
    pub async fn create_ritual(&self, title: &str, user_ids: &[i64]) -> i64 {
        let response = self
            .post_json(
                "/api/ritual",
                &serde_json::json!({ "title": title, "user_ids": user_ids }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_i64().expect("ritual id should be a number")
    }
}
