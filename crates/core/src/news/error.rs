use thiserror::Error;

/// # Summary
/// 新闻数据源错误枚举。
#[derive(Error, Debug)]
pub enum NewsError {
    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),
    /// 响应无法解析
    #[error("Parse error: {0}")]
    Parse(String),
    /// 数据源返回的错误 (如 Key 无效、限流)
    #[error("Provider error: {0}")]
    Provider(String),
}
