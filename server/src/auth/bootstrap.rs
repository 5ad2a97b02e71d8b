//! スーパーユーザーの初期作成
//!
//! 環境変数または対話式でスーパーユーザーを作成

use crate::accounts;
use crate::config::get_env_with_fallback;
use account_api_common::auth::User;
use account_api_common::error::ServiceError;
use std::io::{self, Write};

/// スーパーユーザーのメールアドレス環境変数
pub const SUPERUSER_EMAIL_ENV: &str = "ACCOUNT_API_SUPERUSER_EMAIL";
/// スーパーユーザーのパスワード環境変数
pub const SUPERUSER_PASSWORD_ENV: &str = "ACCOUNT_API_SUPERUSER_PASSWORD";
const LEGACY_SUPERUSER_EMAIL_ENV: &str = "SUPERUSER_EMAIL";
const LEGACY_SUPERUSER_PASSWORD_ENV: &str = "SUPERUSER_PASSWORD";

/// 環境変数からスーパーユーザーを作成
///
/// 既に同じメールアドレスのユーザーが存在する場合は何もしない。
///
/// # Environment Variables
/// * `ACCOUNT_API_SUPERUSER_EMAIL` - メールアドレス
/// * `ACCOUNT_API_SUPERUSER_PASSWORD` - パスワード
///
/// # Returns
/// * `Ok(Some(email))` - 作成済みまたは既存（メールアドレスを返す）
/// * `Ok(None)` - 環境変数が未設定（作成しない）
/// * `Err(ServiceError)` - 作成失敗
pub async fn ensure_superuser_from_env(
    pool: &sqlx::SqlitePool,
) -> Result<Option<String>, ServiceError> {
    let email = get_env_with_fallback(SUPERUSER_EMAIL_ENV, LEGACY_SUPERUSER_EMAIL_ENV);
    let password = get_env_with_fallback(SUPERUSER_PASSWORD_ENV, LEGACY_SUPERUSER_PASSWORD_ENV);

    let (email, password) = match (email, password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
        _ => {
            tracing::debug!("Superuser env not set, skipping superuser creation");
            return Ok(None);
        }
    };

    match accounts::create_superuser(pool, &email, &password, None).await {
        Ok(user) => {
            tracing::info!("Created superuser from env: {}", user.email);
            Ok(Some(user.email))
        }
        Err(ServiceError::DuplicateEmail(existing)) => {
            tracing::warn!("Superuser {} already exists, skipping creation", existing);
            Ok(Some(existing))
        }
        Err(e) => {
            tracing::error!("Failed to create superuser from env: {}", e);
            Err(e)
        }
    }
}

/// 対話式でスーパーユーザーを作成
///
/// パスワードはマスク入力し、確認のため2回入力させる。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `email` - メールアドレス
/// * `name` - 表示名
pub async fn create_superuser_interactive(
    pool: &sqlx::SqlitePool,
    email: &str,
    name: Option<&str>,
) -> Result<User, ServiceError> {
    println!("\n=== Create Superuser: {} ===", email);
    io::stdout()
        .flush()
        .map_err(|e| ServiceError::Internal(format!("Failed to flush stdout: {}", e)))?;

    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| ServiceError::Internal(format!("Failed to read password: {}", e)))?;
    let confirmation = rpassword::prompt_password("Password (again): ")
        .map_err(|e| ServiceError::Internal(format!("Failed to read password: {}", e)))?;

    if password.is_empty() {
        return Err(ServiceError::field("password", "This field may not be blank."));
    }
    if password != confirmation {
        return Err(ServiceError::field("password", "Passwords do not match."));
    }

    accounts::create_superuser(pool, email, &password, name).await
}
