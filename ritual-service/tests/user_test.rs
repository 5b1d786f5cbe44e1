mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn create_user_returns_201_with_new_record() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/user", &json!({ "fcm_token": "device-abc", "nickname": "Mina" }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fcm_token"], "device-abc");
    assert_eq!(body["nickname"], "Mina");
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn create_user_with_known_token_returns_existing_row() {
    let app = TestApp::spawn().await;

    let first: Value = app
        .post_json("/api/user", &json!({ "fcm_token": "device-abc", "nickname": "Mina" }))
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .post_json("/api/user", &json!({ "fcm_token": "device-abc", "nickname": "Other" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let second: Value = response.json().await.unwrap();
    assert_eq!(second, first);

    let users: Vec<Value> = app.get("/api/users").await.json().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn create_user_without_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/api/user", &json!({})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "fcm_token is required");
}

#[tokio::test]
async fn create_user_with_empty_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/api/user", &json!({ "fcm_token": "" })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "fcm_token is required");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/api/user", app.address))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_user_by_token() {
    let app = TestApp::spawn().await;
    let id = app.create_user("device-xyz").await;

    let response = app.get("/api/user/device-xyz").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["fcm_token"], "device-xyz");
    assert!(body["nickname"].is_null());
}

#[tokio::test]
async fn unknown_token_returns_404_message() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/user/never-registered").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "User not found" }));
}

#[tokio::test]
async fn users_are_listed_newest_first() {
    let app = TestApp::spawn().await;
    let first = app.create_user("one").await;
    let second = app.create_user("two").await;
    let third = app.create_user("three").await;

    let users: Vec<Value> = app.get("/api/users").await.json().await.unwrap();

    let ids: Vec<i64> = users.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![third, second, first]);
}
