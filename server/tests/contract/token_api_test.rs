//! トークン発行API契約テスト
//!
//! POST /api/user/token

use crate::support::server::{build_app, create_user, read_json, send_json};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_token_for_user() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "test@test.text", "supapassword").await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "test@test.text", "password": "supapassword"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["token"].is_string(), "'token' field must be a string");
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_token_email_case_insensitive() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "test@test.text", "supapassword").await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "TEST@Test.Text", "password": "supapassword"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_token_invalid_creds() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "email@email.com", "wronasspafgg").await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "email@email.com", "password": "supapassword"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("token").is_none());
    assert_eq!(
        body["non_field_errors"][0],
        "Unable to authenticate with provided credentials."
    );
}

#[tokio::test]
async fn test_create_token_rejects_password_sharing_72_byte_prefix() {
    let (app, db_pool) = build_app().await;
    let stored = "a".repeat(72);
    create_user(&db_pool, "prefix@test.com", &stored).await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "prefix@test.com", "password": format!("{}WRONG", stored)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("token").is_none());

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "prefix@test.com", "password": stored}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_token_no_user() {
    let (app, _db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "test@test.text", "password": "supapassword"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_create_token_missing_field() {
    let (app, _db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "abc", "password": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("token").is_none());
    assert_eq!(body["password"][0], "This field may not be blank.");
}
