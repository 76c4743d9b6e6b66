use crate::history::error::StoreError;
use crate::targets::entity::TargetList;
use async_trait::async_trait;

/// # Summary
/// 目标清单的读取接口。
///
/// # Invariants
/// - 实现者在文件缺失、损坏或为空时返回默认清单，而不是错误。
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// 读取当前目标清单
    async fn load(&self) -> Result<TargetList, StoreError>;
}
