//! データベースアクセス層
//!
//! SQLite（sqlx）によるユーザー・認証トークンの永続化

/// ユーザー管理
pub mod users;

/// 認証トークン管理
pub mod auth_tokens;

/// データベースマイグレーション
pub mod migrations;
