use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 报价提供者接口（原始数据源）。
///
/// # Invariants
/// - 实现者只负责单次请求，失败时直接返回错误，降级策略由调用方决定。
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// # Summary
    /// 获取指定股票的最新成交价。
    ///
    /// # Logic
    /// 1. 构建数据源请求。
    /// 2. 执行网络请求并解析最新价。
    ///
    /// # Arguments
    /// * `ticker`: 股票代码。
    ///
    /// # Returns
    /// 成功返回最新价。
    async fn latest_price(&self, ticker: &str) -> Result<f64, MarketError>;
}
