//! 認証トークンCRUD操作
//!
//! 平文トークンは発行時に一度だけ返し、DBにはSHA-256ハッシュのみ保存する。

use crate::auth::token::{generate_token, hash_token};
use account_api_common::auth::{AuthToken, AuthTokenWithPlaintext};
use account_api_common::error::{CommonError, ServiceError};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// ユーザーの認証トークンを発行
///
/// 既存のトークンは置き換えられ、以後は無効になる。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - ユーザーID
///
/// # Returns
/// * `Ok(AuthTokenWithPlaintext)` - 発行されたトークン（平文含む）
/// * `Err(ServiceError)` - 発行失敗
pub async fn issue(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<AuthTokenWithPlaintext, ServiceError> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let created_at = Utc::now();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?")
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to replace auth token: {}", e)))?;

    sqlx::query("INSERT INTO auth_tokens (token_hash, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token_hash)
        .bind(user_id.to_string())
        .bind(created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to create auth token: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit auth token: {}", e)))?;

    Ok(AuthTokenWithPlaintext {
        user_id,
        token,
        created_at,
    })
}

/// ハッシュ値で認証トークンを検索
///
/// # Returns
/// * `Ok(Some(AuthToken))` - トークンが見つかった
/// * `Ok(None)` - トークンが見つからなかった
/// * `Err(ServiceError)` - 検索失敗
pub async fn find_by_hash(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<AuthToken>, ServiceError> {
    let row = sqlx::query_as::<_, AuthTokenRow>(
        "SELECT user_id, token_hash, created_at FROM auth_tokens WHERE token_hash = ?",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find auth token: {}", e)))?;

    row.map(AuthTokenRow::into_auth_token).transpose()
}

/// ユーザーIDで認証トークンを検索
pub async fn find_by_user_id(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<AuthToken>, ServiceError> {
    let row = sqlx::query_as::<_, AuthTokenRow>(
        "SELECT user_id, token_hash, created_at FROM auth_tokens WHERE user_id = ?",
    )
    .bind(user_id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find auth token: {}", e)))?;

    row.map(AuthTokenRow::into_auth_token).transpose()
}

/// ユーザーの認証トークンを削除
///
/// # Returns
/// * `Ok(true)` - 削除した
/// * `Ok(false)` - トークンが存在しなかった
pub async fn delete_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<bool, ServiceError> {
    let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?")
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to delete auth token: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    user_id: String,
    token_hash: String,
    created_at: String,
}

impl AuthTokenRow {
    fn into_auth_token(self) -> Result<AuthToken, ServiceError> {
        let user_id = Uuid::parse_str(&self.user_id).map_err(CommonError::from)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(CommonError::from)?
            .with_timezone(&Utc);

        Ok(AuthToken {
            user_id,
            token_hash: self.token_hash,
            created_at,
        })
    }
}
