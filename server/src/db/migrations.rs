//! データベース初期化とマイグレーション実行

use account_api_common::error::ServiceError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// データベースファイルが存在しない場合は作成する。
/// インメモリDB（`sqlite::memory:`）は接続ごとに別DBになるため、
/// 単一接続のプールを使い、アイドル切断もしない。
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/accounts.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(ServiceError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, ServiceError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ServiceError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    tracing::info!("Connecting to database: {}", database_url);
    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(())` - マイグレーション成功
/// * `Err(ServiceError)` - マイグレーション失敗
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ServiceError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
