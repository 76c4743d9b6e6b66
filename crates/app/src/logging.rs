use crate::error::AppError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 日志文件名前缀，滚动后形如 `buzz.log.2026-03-01`
const LOG_FILE_PREFIX: &str = "buzz.log";

/// # Summary
/// 安装全局日志订阅者。
///
/// # Logic
/// 1. 过滤级别默认 `info`，可由 `RUST_LOG` 覆盖。
/// 2. 控制台输出一份。
/// 3. `log_dir` 下按日滚动写文件（非阻塞）。
///
/// # Returns
/// 文件写入器的 guard，必须在进程存活期间持有，否则尾部日志会丢失。
pub fn init(log_dir: &Path) -> Result<WorkerGuard, AppError> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
