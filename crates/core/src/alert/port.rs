use crate::alert::entity::AlertConfig;
use crate::history::error::StoreError;
use async_trait::async_trait;

/// # Summary
/// 报警规则的本地读取接口。
#[async_trait]
pub trait AlertConfigStore: Send + Sync {
    /// # Summary
    /// 读取报警规则。
    ///
    /// # Returns
    /// 文件不存在时返回 `Ok(None)`，内容损坏时返回 `StoreError::Corrupt`。
    async fn load(&self) -> Result<Option<AlertConfig>, StoreError>;

    /// # Summary
    /// 覆盖写入报警规则。
    async fn save(&self, config: &AlertConfig) -> Result<(), StoreError>;
}
