//! 設定管理
//!
//! サーバー設定構造体。値の解決（環境変数、データディレクトリ）はサーバー側で行う。

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトのポート番号
pub const DEFAULT_PORT: u16 = 8000;

/// データディレクトリ内のSQLiteファイル名
pub const DEFAULT_DATABASE_FILE: &str = "accounts.db";

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// ホストアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベースURL
    pub database_url: String,
}

impl ServerConfig {
    /// バインドアドレス（host:port）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
