//! Account API Server
//!
//! メールアドレスでログインするユーザーの登録とトークン認証を提供するサーバー

#![warn(missing_docs)]

/// ユーザー管理（作成・認証・プロフィール更新）
pub mod accounts;

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
}
