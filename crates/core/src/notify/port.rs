use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 向外部投递通知的接口定义。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync`。
/// - 投递为尽力而为：失败只返回错误，不做重试。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 向指定收件人发送带主题的通知。
    ///
    /// # Logic
    /// 1. 根据目标平台要求格式化消息。
    /// 2. 通过底层传输协议发送消息。
    ///
    /// # Arguments
    /// * `to`: 收件人地址。
    /// * `subject`: 通知标题。
    /// * `content`: 通知正文。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(NotifyError)`。
    async fn notify(&self, to: &str, subject: &str, content: &str) -> Result<(), NotifyError>;
}
