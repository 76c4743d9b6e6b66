use crate::sync::error::SyncError;
use async_trait::async_trait;

/// # Summary
/// 远端配置同步接口 (读-改-写)。
///
/// # Invariants
/// - 覆盖已存在的文件前必须先获取其当前版本标识。
/// - 除版本标识外不做冲突检测。
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// # Summary
    /// 将文本内容写入远端路径。
    ///
    /// # Logic
    /// 1. 查询远端路径当前的版本标识 (不存在则为空)。
    /// 2. 携带版本标识与提交说明提交新内容。
    ///
    /// # Arguments
    /// * `path`: 远端相对路径，如 `data/targets.csv`。
    /// * `content`: 文件完整内容。
    /// * `message`: 提交说明。
    ///
    /// # Returns
    /// 写入成功返回 `Ok(())`。
    async fn write(&self, path: &str, content: &str, message: &str) -> Result<(), SyncError>;
}
