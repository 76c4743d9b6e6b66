use thiserror::Error;

/// # Summary
/// 通知服务错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 网络连接或 SMTP 会话错误
    #[error("Network error: {0}")]
    Network(String),

    /// 配置错误 (如缺少账号、地址非法)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 邮件构建或服务端拒收
    #[error("Platform error: {0}")]
    Platform(String),
}
