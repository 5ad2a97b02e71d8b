//! ロギング初期化
//!
//! `tracing` のイベントを標準出力と、日次でローテーションするJSON Linesファイル
//! （`<log dir>/account-api.jsonl.YYYY-MM-DD`、日付はUTC）へ出力する。

use crate::config::{data_dir, get_env_with_fallback, get_env_with_fallback_parse};
use chrono::{Duration, Utc};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス（後ろに `.YYYY-MM-DD` が付く）
pub const LOG_FILE_BASE: &str = "account-api.jsonl";

const LOG_SUBDIR: &str = "logs";
const DEFAULT_FILTER: &str = "info";
const DEFAULT_RETENTION_DAYS: u32 = 7;

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// 環境変数から解決したログ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// 出力ディレクトリ（`ACCOUNT_API_LOG_DIR`、既定は `~/.account-api/logs`）
    pub dir: PathBuf,
    /// `EnvFilter` ディレクティブ（`ACCOUNT_API_LOG_LEVEL` > `LOG_LEVEL` > `RUST_LOG`）
    pub filter: String,
    /// 保持日数（`ACCOUNT_API_LOG_RETENTION_DAYS`、最低1日）
    pub retention_days: u32,
}

impl LogSettings {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> io::Result<Self> {
        let dir = match get_env_with_fallback("ACCOUNT_API_LOG_DIR", "LOG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => data_dir().map_err(io::Error::other)?.join(LOG_SUBDIR),
        };

        let filter = get_env_with_fallback("ACCOUNT_API_LOG_LEVEL", "LOG_LEVEL")
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let retention_days = get_env_with_fallback_parse(
            "ACCOUNT_API_LOG_RETENTION_DAYS",
            "LOG_RETENTION_DAYS",
            DEFAULT_RETENTION_DAYS,
        )
        .max(1);

        Ok(Self {
            dir,
            filter,
            retention_days,
        })
    }
}

/// ログ出力を初期化する。
///
/// 起動時に保持期間を過ぎたファイルを削除し、実行中は日付が変わるたびに
/// 新しいファイルへ切り替えて古いファイルを間引く。2回目以降の呼び出しは何もしない。
pub fn init() -> io::Result<()> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }

    let settings = LogSettings::from_env()?;
    fs::create_dir_all(&settings.dir)?;
    cleanup_old_logs(&settings.dir, settings.retention_days)?;

    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(&settings)?);

    let env_filter =
        EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_current_span(false)
        .with_span_list(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(io::Error::other)?;

    let _ = FILE_GUARD.set(guard);

    tracing::info!(
        log_dir = %settings.dir.display(),
        retention_days = settings.retention_days,
        "Logging initialized"
    );
    Ok(())
}

fn file_appender(settings: &LogSettings) -> io::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_BASE)
        .max_log_files(settings.retention_days as usize)
        .build(&settings.dir)
        .map_err(io::Error::other)
}

/// 保持期間を過ぎたログファイルを削除する。
///
/// ローテーション済みファイル名 `account-api.jsonl.YYYY-MM-DD` の日付で判定する。
fn cleanup_old_logs(log_dir: &Path, retention_days: u32) -> io::Result<()> {
    let cutoff = (Utc::now() - Duration::days(i64::from(retention_days)))
        .format("%Y-%m-%d")
        .to_string();
    let prefix = format!("{}.", LOG_FILE_BASE);

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(date) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix(&prefix))
        else {
            continue;
        };
        if date < cutoff.as_str() {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("Failed to remove old log {}: {}", path.display(), e);
            }
        }
    }
    Ok(())
}
