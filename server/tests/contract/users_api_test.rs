//! ユーザー登録API契約テスト
//!
//! POST /api/user/create

use crate::support::server::{build_app, create_user, read_json, send_json};
use account_api::accounts;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_valid_user_success() {
    let (app, db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({
            "email": "Darkschnider@metalicanna.com",
            "password": "HandsomeDashingWizard",
            "name": "Darkschnider"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert!(body.get("password").is_none(), "password must not be echoed");
    assert_eq!(body["name"], "Darkschnider");

    let email = body["email"].as_str().unwrap();
    let user = accounts::find_by_email(&db_pool, email)
        .await
        .unwrap()
        .expect("created user must be persisted");
    assert!(accounts::check_password(&user, "HandsomeDashingWizard").unwrap());
    assert!(!user.is_staff);
    assert!(!user.is_superuser);
}

#[tokio::test]
async fn test_create_user_normalizes_email() {
    let (app, _db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "  Mixed@CASE.com ", "password": "mixedpass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["email"], "mixed@case.com");
    assert_eq!(body["name"], "");
}

#[tokio::test]
async fn test_user_exists() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "Darkschnider@metalicanna.com", "HandsomeDashingWizard").await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({
            "email": "Darkschnider@metalicanna.com",
            "password": "HandsomeDashingWizard",
            "name": "Darkschnider"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("email").is_some(), "error must be keyed by email");
}

#[tokio::test]
async fn test_user_exists_with_different_case() {
    let (app, db_pool) = build_app().await;
    create_user(&db_pool, "case@example.com", "casepass").await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "CASE@example.com", "password": "casepass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_password_under_limit() {
    let (app, db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "ken@lazy.com", "password": "lazy", "name": "ken"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("password").is_some());

    let exists = accounts::find_by_email(&db_pool, "ken@lazy.com")
        .await
        .unwrap()
        .is_some();
    assert!(!exists, "user must not be created");
}

#[tokio::test]
async fn test_whitespace_password_rejected() {
    let (app, db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "w@x.com", "password": "     "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("password").is_some());
    assert!(accounts::find_by_email(&db_pool, "w@x.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_password_is_trimmed_before_length_check() {
    let (app, db_pool) = build_app().await;

    // 空白を除くと4文字
    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "pad@x.com", "password": "  lazy  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "pad@x.com", "password": "  padded  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user = accounts::find_by_email(&db_pool, "pad@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(accounts::check_password(&user, "padded").unwrap());
}

#[tokio::test]
async fn test_password_over_bcrypt_limit_rejected() {
    let (app, db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "long@x.com", "password": format!("{}REAL", "a".repeat(72))}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["password"][0], "Ensure this field has no more than 72 bytes.");
    assert!(accounts::find_by_email(&db_pool, "long@x.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let (app, db_pool) = build_app().await;

    let response = send_json(
        &app,
        "POST",
        "/api/user/create",
        json!({"email": "not-an-email", "password": "validpass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("email").is_some());
    assert!(account_api::db::users::list(&db_pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let (app, _db_pool) = build_app().await;

    let response = send_json(&app, "POST", "/api/user/create", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body.get("email").is_some());
    assert!(body.get("password").is_some());
}
