mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn create_record_echoes_ids() {
    let app = TestApp::spawn().await;
    let user = app.create_user("device").await;
    let ritual = app.create_ritual("Meditate", &[user]).await;

    let response = app
        .post_json(
            "/api/ritual-record",
            &json!({
                "ritual_id": ritual,
                "user_id": user,
                "image_url": "https://img.example/1.png",
                "review": "Calm"
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ritual_id"], ritual);
    assert_eq!(body["user_id"], user);
    assert_eq!(body["image_url"], "https://img.example/1.png");
    assert_eq!(body["review"], "Calm");
    assert!(body["completed_at"].is_string());
}

#[tokio::test]
async fn create_record_without_ids_is_rejected() {
    let app = TestApp::spawn().await;

    for payload in [json!({}), json!({ "ritual_id": 1 }), json!({ "user_id": 1 })] {
        let response = app.post_json("/api/ritual-record", &payload).await;

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "ritual_id and user_id are required");
    }
}

#[tokio::test]
async fn record_for_unknown_ritual_is_a_server_error() {
    let app = TestApp::spawn().await;
    let user = app.create_user("device").await;

    let response = app
        .post_json("/api/ritual-record", &json!({ "ritual_id": 404, "user_id": user }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn records_are_listed_newest_first_with_user() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice-device").await;
    let bob = app.create_user("bob-device").await;
    let ritual = app.create_ritual("Walk", &[alice, bob]).await;
    let other = app.create_ritual("Swim", &[alice]).await;

    for (user, review) in [(alice, "first"), (bob, "second")] {
        let response = app
            .post_json(
                "/api/ritual-record",
                &json!({ "ritual_id": ritual, "user_id": user, "review": review }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }
    app.post_json(
        "/api/ritual-record",
        &json!({ "ritual_id": other, "user_id": alice }),
    )
    .await;

    let response = app.get(&format!("/api/ritual/{}/records", ritual)).await;

    assert_eq!(response.status().as_u16(), 200);
    let records: Vec<Value> = response.json().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["review"], "second");
    assert_eq!(records[0]["user"]["id"], bob);
    assert_eq!(records[0]["user"]["fcm_token"], "bob-device");
    assert_eq!(records[1]["review"], "first");
    assert_eq!(records[1]["user"]["id"], alice);
}

#[tokio::test]
async fn records_of_unknown_ritual_are_empty() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/ritual/12345/records").await;

    assert_eq!(response.status().as_u16(), 200);
    let records: Vec<Value> = response.json().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn non_numeric_ritual_id_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/ritual/abc/records").await;

    assert_eq!(response.status().as_u16(), 400);
}
