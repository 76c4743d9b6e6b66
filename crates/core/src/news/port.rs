use crate::news::entity::{Article, SyntheticActivity};
use crate::news::error::NewsError;
use async_trait::async_trait;

/// # Summary
/// 新闻/社交提及数据源接口。
///
/// # Invariants
/// - 认证信息 (API Key) 由实现者在构造时持有，调用方只传入股票代码。
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// # Summary
    /// 拉取近期提及该股票的文章。
    ///
    /// # Arguments
    /// * `ticker`: 股票代码。
    ///
    /// # Returns
    /// 成功返回文章列表（可能为空）。
    async fn fetch_articles(&self, ticker: &str) -> Result<Vec<Article>, NewsError>;
}

/// # Summary
/// 模拟热度数据生成器。
///
/// # Invariants
/// - 生成结果只用于标记为 `DataSource::Synthetic` 的记录。
pub trait ActivitySimulator: Send + Sync {
    /// 生成一组模拟的提及量、情绪与增长率
    fn sample(&self, ticker: &str) -> SyntheticActivity;
}
