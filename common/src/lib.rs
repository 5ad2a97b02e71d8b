//! Account API Common Library
//!
//! ユーザーモデル、メール正規化、設定、エラー型を提供

#![warn(missing_docs)]

/// 認証関連のデータモデル
pub mod auth;

/// メールアドレス正規化
pub mod email;

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;
