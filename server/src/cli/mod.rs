//! CLI module for account-api
//!
//! Provides command-line interface for server and user management.

/// User management subcommands
pub mod user;

use clap::{Parser, Subcommand};

/// Account API - User registration and token authentication service
#[derive(Parser, Debug)]
#[command(name = "account-api")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    ACCOUNT_API_HOST                 Bind address (default: 0.0.0.0)
    ACCOUNT_API_PORT                 Listen port (default: 8000)
    ACCOUNT_API_DATABASE_URL         Database URL (default: sqlite:~/.account-api/accounts.db)
    ACCOUNT_API_LOG_LEVEL            Log level (default: info)
    ACCOUNT_API_LOG_DIR              Log directory (default: ~/.account-api/logs)
    ACCOUNT_API_LOG_RETENTION_DAYS   Days to keep log files (default: 7)
    ACCOUNT_API_SUPERUSER_EMAIL      Superuser email created on startup
    ACCOUNT_API_SUPERUSER_PASSWORD   Superuser password created on startup
"#)]
pub struct Cli {
    /// Subcommand to execute (starts the server when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        /// User management subcommand
        #[command(subcommand)]
        command: user::UserCommand,
    },
}
