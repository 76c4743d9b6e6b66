use super::entity::HistoryRecord;
use super::error::StoreError;
use super::merge::{self, MergeStats};
use async_trait::async_trait;

/// # Summary
/// 历史表存储接口，按 `(date, ticker)` 提供 upsert 语义。
///
/// # Invariants
/// - 任意一批写入完成后，同一键至多保留一行，值为最后写入者。
/// - 每批写入完成后整表持久化（覆盖写），而非追加日志。
/// - 底层数据损坏时视为空表，由实现者记录告警。
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// # Summary
    /// 读取全部历史记录。
    ///
    /// # Logic
    /// 1. 从持久层读取所有行。
    /// 2. 文件缺失或损坏时返回空表。
    ///
    /// # Returns
    /// 按写入顺序排列的记录列表。
    async fn load_all(&self) -> Result<Vec<HistoryRecord>, StoreError>;

    /// # Summary
    /// 批量写入记录。
    ///
    /// # Logic
    /// 1. 读取现有数据。
    /// 2. 逐条按键合并，重复键以后写入者为准。
    /// 3. 将完整结果写回持久层。
    ///
    /// # Arguments
    /// * `records`: 待写入的记录。
    ///
    /// # Returns
    /// 新增与替换的计数。
    async fn upsert_batch(&self, records: Vec<HistoryRecord>) -> Result<MergeStats, StoreError>;

    /// # Summary
    /// 写入单条记录。
    async fn upsert(&self, record: HistoryRecord) -> Result<MergeStats, StoreError> {
        self.upsert_batch(vec![record]).await
    }

    /// # Summary
    /// 读取单只股票的历史，按日期升序。
    async fn load_ticker(&self, ticker: &str) -> Result<Vec<HistoryRecord>, StoreError> {
        let all = self.load_all().await?;
        Ok(merge::for_ticker(&all, ticker))
    }

    /// # Summary
    /// 读取每只股票日期最新的一条记录。
    async fn latest_per_ticker(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let all = self.load_all().await?;
        Ok(merge::latest_per_ticker(&all))
    }

    /// # Summary
    /// 列出历史中出现过的股票代码。
    async fn tickers(&self) -> Result<Vec<String>, StoreError> {
        let all = self.load_all().await?;
        Ok(merge::tickers(&all))
    }
}
