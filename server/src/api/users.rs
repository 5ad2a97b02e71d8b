//! ユーザーAPI
//!
//! ユーザー登録と、認証済みユーザー自身のプロフィール参照・更新

use crate::accounts::{self, ProfileChanges};
use crate::api::error::{parse_json, AppError};
use crate::auth::password::{MAX_PASSWORD_BYTES, PASSWORD_TOO_LONG};
use crate::AppState;
use account_api_common::auth::User;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// ユーザー作成リクエスト
///
/// 欠落したフィールドは空文字列として検証エラーにする。
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    /// メールアドレス
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// パスワード（前後の空白を除いて5文字以上、72バイト以下）
    #[validate(
        length(min = 5, message = "Ensure this field has at least 5 characters."),
        custom(function = "within_hash_limit")
    )]
    pub password: String,
    /// 表示名
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: String,
}

/// プロフィール更新リクエスト（指定したフィールドのみ更新）
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    /// メールアドレス（オプション）
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    /// パスワード（オプション）
    #[validate(
        length(min = 5, message = "Ensure this field has at least 5 characters."),
        custom(function = "within_hash_limit")
    )]
    pub password: Option<String>,
    /// 表示名（オプション）
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

fn within_hash_limit(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("max_length").with_message(PASSWORD_TOO_LONG.into()));
    }
    Ok(())
}

/// ユーザーレスポンス（パスワード・ハッシュは含めない）
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// メールアドレス
    pub email: String,
    /// 表示名
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            email: user.email,
            name: user.name,
        }
    }
}

/// POST /api/user/create - ユーザー登録
///
/// # Returns
/// * `201 Created` - 作成されたユーザー（email, name）
/// * `400 Bad Request` - メールアドレス不正・重複、パスワードが短い
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let mut request = parse_json(payload)?;
    request.email = request.email.trim().to_string();
    request.password = request.password.trim().to_string();
    request.validate()?;

    let user = accounts::create_user(
        &state.db_pool,
        &request.email,
        &request.password,
        Some(&request.name),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/user/me - 認証済みユーザーのプロフィール
///
/// # Returns
/// * `200 OK` - プロフィール
/// * `401 Unauthorized` - 未認証（ミドルウェアで拒否）
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// PATCH /api/user/me - プロフィール部分更新
///
/// # Returns
/// * `200 OK` - 更新後のプロフィール
/// * `400 Bad Request` - 検証エラー、メールアドレス重複
/// * `401 Unauthorized` - 未認証
pub async fn update_me(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let mut request = parse_json(payload)?;
    request.email = request.email.map(|email| email.trim().to_string());
    request.password = request.password.map(|password| password.trim().to_string());
    request.validate()?;

    let updated = accounts::update_profile(
        &state.db_pool,
        user.id,
        ProfileChanges {
            email: request.email,
            name: request.name,
            password: request.password,
        },
    )
    .await?;

    Ok(Json(UserResponse::from(updated)))
}
