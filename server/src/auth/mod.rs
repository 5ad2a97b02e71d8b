//! 認証・認可機能

/// パスワードハッシュ化（bcrypt）
pub mod password;

/// 不透明トークンの生成とハッシュ化
pub mod token;

/// トークン認証ミドルウェア
pub mod middleware;

/// スーパーユーザーの初期作成
pub mod bootstrap;
