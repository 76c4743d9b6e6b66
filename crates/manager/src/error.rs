use buzz_core::history::error::StoreError;
use buzz_core::sync::error::SyncError;
use thiserror::Error;

/// # Summary
/// Manager 层的统一错误类型。
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
    /// 当前操作所需的配置缺失
    #[error("Configuration error: {0}")]
    Config(String),
    /// 调用方输入不合法
    #[error("Bad request: {0}")]
    BadRequest(String),
}
