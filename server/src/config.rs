//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and builds the
//! [`ServerConfig`] used at startup.

use account_api_common::config::{
    ServerConfig, DEFAULT_DATABASE_FILE, DEFAULT_HOST, DEFAULT_PORT,
};
use account_api_common::error::CommonError;
use std::path::PathBuf;

/// Default data directory name under the home directory
pub const DATA_DIR: &str = ".account-api";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use account_api::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("ACCOUNT_API_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Resolve the data directory (`~/.account-api`)
pub fn data_dir() -> Result<PathBuf, CommonError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| CommonError::Config("Failed to resolve home directory".to_string()))?;

    Ok(PathBuf::from(home).join(DATA_DIR))
}

/// Build the server configuration from the environment
///
/// | field | variable | deprecated |
/// |---|---|---|
/// | host | `ACCOUNT_API_HOST` | `HOST` |
/// | port | `ACCOUNT_API_PORT` | `PORT` |
/// | database_url | `ACCOUNT_API_DATABASE_URL` | `DATABASE_URL` |
///
/// Without a database URL the SQLite file `~/.account-api/accounts.db`
/// is used and its directory is created.
pub fn load_server_config() -> Result<ServerConfig, CommonError> {
    let host = get_env_with_fallback_or("ACCOUNT_API_HOST", "HOST", DEFAULT_HOST);
    let port = get_env_with_fallback_parse("ACCOUNT_API_PORT", "PORT", DEFAULT_PORT);
    let database_url = match get_env_with_fallback("ACCOUNT_API_DATABASE_URL", "DATABASE_URL") {
        Some(url) => url,
        None => {
            let dir = data_dir()?;
            std::fs::create_dir_all(&dir).map_err(|e| {
                CommonError::Config(format!("Failed to create data directory: {}", e))
            })?;
            format!("sqlite:{}", dir.join(DEFAULT_DATABASE_FILE).display())
        }
    };

    Ok(ServerConfig {
        host,
        port,
        database_url,
    })
}
