//! ユーザーCRUD操作
//!
//! メールアドレスは呼び出し側で正規化済みであること。

use account_api_common::auth::{User, UserFlags};
use account_api_common::error::{CommonError, ServiceError};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, email, name, password_hash, is_active, is_staff, is_superuser, created_at, last_login";

/// ユーザーの部分更新内容（Noneのフィールドは変更なし）
#[derive(Debug, Default, Clone, Copy)]
pub struct UserChanges<'a> {
    /// 新しいメールアドレス（正規化済み）
    pub email: Option<&'a str>,
    /// 新しい表示名
    pub name: Option<&'a str>,
    /// 新しいパスワードハッシュ
    pub password_hash: Option<&'a str>,
}

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `email` - 正規化済みメールアドレス
/// * `name` - 表示名
/// * `password_hash` - bcryptハッシュ化されたパスワード
/// * `flags` - スタッフ/スーパーユーザーフラグ
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(ServiceError::DuplicateEmail)` - メールアドレス重複
/// * `Err(ServiceError)` - 作成失敗
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
    flags: UserFlags,
) -> Result<User, ServiceError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, email, name, password_hash, is_active, is_staff, is_superuser, created_at, last_login)
         VALUES (?, ?, ?, ?, 1, ?, ?, ?, NULL)",
    )
    .bind(id.to_string())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(flags.is_staff)
    .bind(flags.is_superuser)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, email, "Failed to create user"))?;

    Ok(User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        password_hash: password_hash.to_string(),
        is_active: true,
        is_staff: flags.is_staff,
        is_superuser: flags.is_superuser,
        created_at,
        last_login: None,
    })
}

/// メールアドレスでユーザーを検索
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(ServiceError)` - 検索失敗
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, ServiceError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose()
}

/// IDでユーザーを検索
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, ServiceError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose()
}

/// すべてのユーザーを取得（作成日時の昇順）
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, ServiceError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users ORDER BY created_at ASC",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to list users: {}", e)))?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// ユーザーを更新
///
/// # Returns
/// * `Ok(User)` - 更新されたユーザー
/// * `Err(ServiceError::UserNotFound)` - ユーザーが存在しない
/// * `Err(ServiceError::DuplicateEmail)` - 変更先メールアドレスが使用済み
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    changes: UserChanges<'_>,
) -> Result<User, ServiceError> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or(ServiceError::UserNotFound(id))?;

    let new_email = changes.email.unwrap_or(&current.email);
    let new_name = changes.name.unwrap_or(&current.name);
    let new_password_hash = changes.password_hash.unwrap_or(&current.password_hash);

    sqlx::query("UPDATE users SET email = ?, name = ?, password_hash = ? WHERE id = ?")
        .bind(new_email)
        .bind(new_name)
        .bind(new_password_hash)
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| map_write_error(e, new_email, "Failed to update user"))?;

    Ok(User {
        email: new_email.to_string(),
        name: new_name.to_string(),
        password_hash: new_password_hash.to_string(),
        ..current
    })
}

/// 有効フラグを変更
pub async fn set_active(pool: &SqlitePool, id: Uuid, is_active: bool) -> Result<(), ServiceError> {
    let result = sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to update user: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::UserNotFound(id));
    }
    Ok(())
}

/// 最終ログイン日時を更新
pub async fn update_last_login(pool: &SqlitePool, id: Uuid) -> Result<(), ServiceError> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to update last login: {}", e)))?;

    Ok(())
}

/// ユーザーを削除（認証トークンも削除される）
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), ServiceError> {
    // auth_tokens は ON DELETE CASCADE で同時に削除される
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to delete user: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::UserNotFound(id));
    }
    Ok(())
}

fn map_write_error(err: sqlx::Error, email: &str, context: &str) -> ServiceError {
    let is_unique = err
        .as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false);

    if is_unique {
        ServiceError::DuplicateEmail(email.to_string())
    } else {
        ServiceError::Database(format!("{}: {}", context, err))
    }
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    password_hash: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    created_at: String,
    last_login: Option<String>,
}

impl UserRow {
    fn into_user(self) -> Result<User, ServiceError> {
        let id = Uuid::parse_str(&self.id).map_err(CommonError::from)?;
        let created_at = parse_timestamp(&self.created_at)?;
        let last_login = self
            .last_login
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(User {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            created_at,
            last_login,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ServiceError> {
    let parsed = DateTime::parse_from_rfc3339(value).map_err(CommonError::from)?;
    Ok(parsed.with_timezone(&Utc))
}
