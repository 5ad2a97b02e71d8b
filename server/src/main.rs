//! Account API Server Entry Point

use account_api::{
    api, auth,
    cli::{self, Cli, Commands},
    config, db, logging, AppState,
};
use account_api_common::config::ServerConfig;
use account_api_common::error::ServiceError;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServiceError> {
    let config = config::load_server_config()?;
    let db_pool = db::migrations::initialize_database(&config.database_url).await?;

    match cli.command {
        Some(Commands::User { command }) => cli::user::execute(&db_pool, command).await,
        None => {
            // スーパーユーザーが環境変数で指定されていれば作成
            auth::bootstrap::ensure_superuser_from_env(&db_pool).await?;
            run_server(config, AppState { db_pool }).await
        }
    }
}

async fn run_server(config: ServerConfig, state: AppState) -> Result<(), ServiceError> {
    info!("Account API v{}", env!("CARGO_PKG_VERSION"));

    let router = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServiceError::Internal(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    info!("Account API listening on {}", bind_addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| ServiceError::Internal(format!("Server error: {}", e)))
}
