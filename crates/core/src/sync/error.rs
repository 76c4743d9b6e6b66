use thiserror::Error;

/// # Summary
/// 远端配置同步错误枚举。
#[derive(Error, Debug)]
pub enum SyncError {
    /// 缺少 Token 或仓库标识
    #[error("Configuration error: {0}")]
    Config(String),
    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),
    /// 远端拒绝写入 (权限不足、冲突等)
    #[error("Remote rejected write with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
    /// 远端响应无法解析
    #[error("Parse error: {0}")]
    Parse(String),
}
