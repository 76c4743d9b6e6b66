use buzz_core::history::error::StoreError;
use buzz_manager::error::ManagerError;
use thiserror::Error;

/// # Summary
/// 进程启动与运行阶段的错误。
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置源无法读取或字段类型不符
    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),
    /// 当前命令所需的配置缺失
    #[error("Configuration error: {0}")]
    Config(String),
    /// 外部客户端初始化失败
    #[error("Failed to initialize {0}")]
    Init(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Manager(#[from] ManagerError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
