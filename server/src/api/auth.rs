//! 認証API
//!
//! トークン発行とログアウト（トークン失効）

use crate::accounts;
use crate::api::error::{parse_json, AppError};
use crate::AppState;
use account_api_common::auth::User;
use account_api_common::error::ServiceError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// トークン発行リクエスト
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TokenRequest {
    /// メールアドレス
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,
    /// パスワード（前後の空白も含めて照合する）
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// トークン発行レスポンス
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// 認証トークン（`Authorization: Token {token}` で使用）
    pub token: String,
}

/// POST /api/user/token - トークン発行
///
/// メールアドレスとパスワードで認証し、新しいトークンを発行する。
/// 以前に発行したトークンは無効になる。
///
/// # Returns
/// * `200 OK` - トークン
/// * `400 Bad Request` - 認証失敗、ユーザーが存在しない、フィールド欠落
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let request = parse_json(payload)?;
    request.validate()?;

    let user = accounts::authenticate(&state.db_pool, &request.email, &request.password)
        .await?
        .ok_or(ServiceError::InvalidCredentials)?;

    let issued = crate::db::auth_tokens::issue(&state.db_pool, user.id).await?;

    // 最終ログイン時刻の更新失敗はトークン発行を妨げない
    if let Err(e) = crate::db::users::update_last_login(&state.db_pool, user.id).await {
        tracing::warn!("Failed to update last login: {}", e);
    }

    tracing::info!(user_id = %user.id, "Issued auth token");
    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /api/user/logout - ログアウト
///
/// 認証に使ったトークンを失効させる。
///
/// # Returns
/// * `204 No Content` - 失効済み
/// * `401 Unauthorized` - 未認証
pub async fn logout(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    crate::db::auth_tokens::delete_for_user(&state.db_pool, user.id).await?;
    tracing::info!(user_id = %user.id, "Revoked auth token");
    Ok(StatusCode::NO_CONTENT)
}
