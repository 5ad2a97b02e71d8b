//! プロフィール更新統合テスト
//!
//! PATCH /api/user/me

use crate::support::server::{
    build_app, create_user, obtain_token, read_json, send_json, send_with_token,
};
use axum::http::{header, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_update_profile_name_and_password() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "update@example.com", "oldpassword").await;
    let token = obtain_token(&app, "update@example.com", "oldpassword").await;

    let response = send_with_token(
        &app,
        "PATCH",
        "/api/user/me",
        &token,
        Some(json!({"name": "New Name", "password": "newpassword"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, json!({"email": "update@example.com", "name": "New Name"}));

    // 新しいパスワードでトークンを取得できる
    obtain_token(&app, "update@example.com", "newpassword").await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/token",
        json!({"email": "update@example.com", "password": "oldpassword"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_email_is_normalized() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "before@example.com", "password1").await;
    let token = obtain_token(&app, "before@example.com", "password1").await;

    let response = send_with_token(
        &app,
        "PATCH",
        "/api/user/me",
        &token,
        Some(json!({"email": "After@Example.COM"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["email"], "after@example.com");
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "taken@example.com", "password1").await;
    create_user(&db_pool, "mine@example.com", "password2").await;
    let token = obtain_token(&app, "mine@example.com", "password2").await;

    let response = send_with_token(
        &app,
        "PATCH",
        "/api/user/me",
        &token,
        Some(json!({"email": "taken@example.com"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("email").is_some());
}

#[tokio::test]
async fn test_update_profile_rejects_short_password() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "short@example.com", "password1").await;
    let token = obtain_token(&app, "short@example.com", "password1").await;

    let response = send_with_token(
        &app,
        "PATCH",
        "/api/user/me",
        &token,
        Some(json!({"password": "abc"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    obtain_token(&app, "short@example.com", "password1").await;
}

#[tokio::test]
async fn test_post_me_not_allowed() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "post@example.com", "password1").await;
    let token = obtain_token(&app, "post@example.com", "password1").await;

    let response = send_with_token(&app, "POST", "/api/user/me", &token, Some(json!({}))).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_post_me_unauthenticated_is_unauthorized() {
    let (app, _db_pool) = build_app().await;

    // 認証はメソッド判定より先に行われる
    let response = send_json(&app, "POST", "/api/user/me", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Token"
    );
}

#[tokio::test]
async fn test_update_profile_trims_password() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "trim@example.com", "password1").await;
    let token = obtain_token(&app, "trim@example.com", "password1").await;

    let response = send_with_token(
        &app,
        "PATCH",
        "/api/user/me",
        &token,
        Some(json!({"password": "      "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_with_token(
        &app,
        "PATCH",
        "/api/user/me",
        &token,
        Some(json!({"password": " newpass "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    obtain_token(&app, "trim@example.com", "newpass").await;
}
