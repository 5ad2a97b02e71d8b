//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// フィールド名 → エラーメッセージ一覧
///
/// 入力検証エラーのレスポンスボディにそのまま使う。
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// 入力フィールドに紐付かないエラーのキー
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// UUID parse error
    #[error("UUID parse error: {0}")]
    UuidParse(#[from] uuid::Error),

    /// Timestamp parse error
    #[error("Timestamp parse error: {0}")]
    TimestampParse(#[from] chrono::ParseError),
}

/// Service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Input validation error
    #[error("Validation error: {}", describe_fields(.0))]
    Validation(FieldErrors),

    /// Email already registered
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Credentials did not match an active user
    #[error("Unable to authenticate with provided credentials")]
    InvalidCredentials,

    /// Missing or invalid authentication credential
    #[error("Authentication error: {0}")]
    Unauthenticated(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 単一フィールドの検証エラーを作成
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        ServiceError::Validation(errors)
    }
}

fn describe_fields(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}
