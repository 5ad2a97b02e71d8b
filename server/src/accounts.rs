//! ユーザー管理
//!
//! ユーザー作成・認証・プロフィール更新。メールアドレスの正規化と
//! パスワードのハッシュ化はすべてここを通す。

use crate::auth::password::{hash_password, verify_password};
use crate::db::users::{self, UserChanges};
use account_api_common::auth::{User, UserFlags};
use account_api_common::email::normalize_email;
use account_api_common::error::ServiceError;
use sqlx::SqlitePool;
use uuid::Uuid;

/// メールアドレスが空の場合のメッセージ
pub const EMAIL_REQUIRED: &str = "Users must have an email address.";

/// プロフィール更新内容（Noneのフィールドは変更なし）
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    /// 新しいメールアドレス
    pub email: Option<String>,
    /// 新しい表示名
    pub name: Option<String>,
    /// 新しいパスワード（平文、保存前にハッシュ化）
    pub password: Option<String>,
}

/// 通常ユーザーを作成
///
/// パスワード長はここでは検証しない（API層で検証する）。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `email` - メールアドレス（正規化前）
/// * `password` - 平文パスワード
/// * `name` - 表示名（省略時は空文字列）
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(ServiceError::Validation)` - メールアドレスが空
/// * `Err(ServiceError::DuplicateEmail)` - メールアドレス重複
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<User, ServiceError> {
    create_with_flags(pool, email, password, name, UserFlags::default()).await
}

/// スーパーユーザーを作成（is_staff / is_superuser ともにtrue）
pub async fn create_superuser(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<User, ServiceError> {
    create_with_flags(pool, email, password, name, UserFlags::SUPERUSER).await
}

async fn create_with_flags(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    name: Option<&str>,
    flags: UserFlags,
) -> Result<User, ServiceError> {
    let email = normalize_email(email).ok_or_else(|| ServiceError::field("email", EMAIL_REQUIRED))?;
    let password_hash = hash_password(password)?;

    let user = users::create(pool, &email, name.unwrap_or_default(), &password_hash, flags).await?;

    tracing::info!(
        user_id = %user.id,
        is_superuser = user.is_superuser,
        "Created user: {}",
        user.email
    );
    Ok(user)
}

/// メールアドレスとパスワードで認証
///
/// # Returns
/// * `Ok(Some(User))` - 有効なユーザーでパスワードが一致
/// * `Ok(None)` - ユーザーが存在しない、無効化済み、またはパスワード不一致
/// * `Err(ServiceError)` - DBエラー等
pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>, ServiceError> {
    let Some(email) = normalize_email(email) else {
        return Ok(None);
    };

    let Some(user) = users::find_by_email(pool, &email).await? else {
        tracing::debug!("Authentication failed, unknown email: {}", email);
        return Ok(None);
    };

    if !user.is_active {
        tracing::debug!(user_id = %user.id, "Authentication failed, user inactive");
        return Ok(None);
    }

    if !check_password(&user, password)? {
        tracing::debug!(user_id = %user.id, "Authentication failed, wrong password");
        return Ok(None);
    }

    Ok(Some(user))
}

/// ユーザーのパスワードを検証（一方向ハッシュとの照合）
pub fn check_password(user: &User, password: &str) -> Result<bool, ServiceError> {
    verify_password(password, &user.password_hash)
}

/// プロフィールを更新
///
/// メールアドレスは正規化してから保存し、パスワードは再ハッシュ化する。
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    changes: ProfileChanges,
) -> Result<User, ServiceError> {
    let email = match changes.email.as_deref() {
        Some(raw) => {
            Some(normalize_email(raw).ok_or_else(|| ServiceError::field("email", EMAIL_REQUIRED))?)
        }
        None => None,
    };

    let password_hash = changes
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let user = users::update(
        pool,
        user_id,
        UserChanges {
            email: email.as_deref(),
            name: changes.name.as_deref(),
            password_hash: password_hash.as_deref(),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "Updated user profile");
    Ok(user)
}

/// メールアドレスでユーザーを検索（正規化してから検索）
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, ServiceError> {
    match normalize_email(email) {
        Some(email) => users::find_by_email(pool, &email).await,
        None => Ok(None),
    }
}
