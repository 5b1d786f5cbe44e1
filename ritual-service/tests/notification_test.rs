mod common;

use common::TestApp;
use ritual_service::services::MockPushProvider;
use serde_json::{json, Value};

#[tokio::test]
async fn send_notification_reports_message_id() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/notification/send",
            &json!({
                "fcm_token": "device-abc",
                "title": "Ritual time",
                "body": "Morning Run starts now",
                "data": { "ritual_id": "7" }
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "messageId": "mock-push-1",
            "message": "Notification sent successfully"
        })
    );
    assert_eq!(app.push.send_count(), 1);
}

#[tokio::test]
async fn token_is_checked_before_content() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/api/notification/send", &json!({})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "fcm_token is required");
    assert_eq!(app.push.send_count(), 0);
}

#[tokio::test]
async fn missing_title_or_body_is_rejected() {
    let app = TestApp::spawn().await;

    for payload in [
        json!({ "fcm_token": "device", "body": "text" }),
        json!({ "fcm_token": "device", "title": "hi" }),
        json!({ "fcm_token": "device", "title": "", "body": "text" }),
    ] {
        let response = app.post_json("/api/notification/send", &payload).await;

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "title and body are required");
    }
    assert_eq!(app.push.send_count(), 0);
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let app = TestApp::spawn_with_push(MockPushProvider::new(false)).await;

    let response = app
        .post_json(
            "/api/notification/send",
            &json!({ "fcm_token": "device", "title": "hi", "body": "there" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Notification delivery failed");
}
