use crate::error::ManagerError;
use buzz_core::common::round2;
use buzz_core::common::time::TimeProvider;
use buzz_core::history::entity::{DataSource, HistoryRecord};
use buzz_core::history::merge::MergeStats;
use buzz_core::history::port::HistoryStore;
use buzz_core::market::port::QuoteProvider;
use buzz_core::news::port::{ActivitySimulator, NewsProvider};
use buzz_core::score::BuzzWeights;
use buzz_core::sentiment::{NEUTRAL_SENTIMENT, SentimentScorer};
use buzz_core::targets::port::TargetStore;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 采集结束后在日志中回显的行数
const TAIL_ROWS: usize = 3;

/// 没有可比基数或新闻源失败时的增长率
const NEUTRAL_GROWTH: f64 = 1.0;

/// # Summary
/// 采集器的依赖集合，由组装层一次性注入。
pub struct CollectorDeps {
    pub quotes: Arc<dyn QuoteProvider>,
    // 为 None 时使用模拟数据
    pub news: Option<Arc<dyn NewsProvider>>,
    pub scorer: SentimentScorer,
    pub simulator: Arc<dyn ActivitySimulator>,
    pub history: Arc<dyn HistoryStore>,
    pub targets: Arc<dyn TargetStore>,
    pub clock: Arc<dyn TimeProvider>,
}

/// 采集器的可调参数
#[derive(Debug, Clone)]
pub struct CollectorOptions {
    pub weights: BuzzWeights,
    pub fallback_price: f64,
    pub request_delay: Duration,
}

/// 一次采集的结果摘要
#[derive(Debug, Clone)]
pub struct CollectReport {
    pub records: Vec<HistoryRecord>,
    pub stats: MergeStats,
}

/// # Summary
/// 每日采集服务：为目标清单中的每只股票生成当天的一条历史记录。
///
/// # Invariants
/// - 股票逐只顺序处理，相邻两只之间固定等待 `request_delay`。
/// - 单只股票的报价或新闻失败只降级为中性值，不中断整批采集。
/// - 整批记录在最后一次性 upsert。
pub struct CollectorService {
    deps: CollectorDeps,
    options: CollectorOptions,
}

impl CollectorService {
    pub fn new(deps: CollectorDeps, options: CollectorOptions) -> Self {
        Self { deps, options }
    }

    /// # Summary
    /// 执行一次完整采集。
    ///
    /// # Logic
    /// 1. 读取目标清单（缺失时为默认清单）与现有历史。
    /// 2. 逐只生成记录，每只之后等待固定间隔。
    /// 3. 批量 upsert 并在日志中回显最后几行。
    ///
    /// # Returns
    /// 本次生成的记录与合并统计。
    pub async fn run(&self) -> Result<CollectReport, ManagerError> {
        let targets = self.deps.targets.load().await?;
        let existing = self.deps.history.load_all().await?;
        let today = self.deps.clock.today();
        info!("Collecting {} tickers for {}", targets.len(), today);

        let mut records = Vec::with_capacity(targets.len());
        for (i, ticker) in targets.tickers().iter().enumerate() {
            if i > 0 && !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }
            records.push(self.collect_one(ticker, today, &existing).await);
        }

        let stats = self.deps.history.upsert_batch(records.clone()).await?;
        info!(
            "Collection finished: {} inserted, {} replaced",
            stats.inserted, stats.replaced
        );

        let all = self.deps.history.load_all().await?;
        for row in all.iter().skip(all.len().saturating_sub(TAIL_ROWS)) {
            info!(
                "  {} {} price={:.2} mentions={} sentiment={:.2} growth={:.2} buzz={:.2} ({})",
                row.date,
                row.ticker,
                row.price,
                row.mentions,
                row.sentiment_avg,
                row.mentions_growth,
                row.buzz_score,
                row.source
            );
        }

        Ok(CollectReport { records, stats })
    }

    /// # Summary
    /// 生成单只股票当天的记录。
    ///
    /// # Logic
    /// 1. 获取最新价，失败时使用回退价格。
    /// 2. 配置了新闻源时用真实文章计算提及数、情绪与增长率，否则用模拟值。
    ///    新闻源失败时沿用上一次的提及数，情绪与增长率取中性值。
    /// 3. 以默认权重计算热度分。
    async fn collect_one(&self, ticker: &str, today: NaiveDate, existing: &[HistoryRecord]) -> HistoryRecord {
        let price = match self.deps.quotes.latest_price(ticker).await {
            Ok(price) => price,
            Err(e) => {
                warn!(
                    "Quote for {} failed ({}), using fallback price {}",
                    ticker, e, self.options.fallback_price
                );
                self.options.fallback_price
            }
        };

        let (mentions, sentiment_avg, mentions_growth, source) = match &self.deps.news {
            Some(news) => {
                let previous = previous_mentions(existing, ticker, today);
                match news.fetch_articles(ticker).await {
                    Ok(articles) => {
                        let texts: Vec<String> = articles.iter().map(|a| a.text()).collect();
                        let mentions = u64::try_from(articles.len()).unwrap_or(u64::MAX);
                        (
                            mentions,
                            self.deps.scorer.score(texts.as_slice()),
                            growth(mentions, previous),
                            DataSource::Real,
                        )
                    }
                    Err(e) => {
                        // 沿用上一次的提及数，避免把故障记成热度归零
                        warn!(
                            "News for {} failed ({}), carrying previous mentions with neutral sentiment",
                            ticker, e
                        );
                        (
                            previous.unwrap_or(0),
                            NEUTRAL_SENTIMENT,
                            NEUTRAL_GROWTH,
                            DataSource::Real,
                        )
                    }
                }
            }
            None => {
                let sample = self.deps.simulator.sample(ticker);
                (
                    sample.mentions,
                    sample.sentiment_avg,
                    sample.mentions_growth,
                    DataSource::Synthetic,
                )
            }
        };

        let record = HistoryRecord {
            date: today,
            ticker: ticker.to_string(),
            price,
            mentions,
            sentiment_avg,
            mentions_growth,
            buzz_score: self.options.weights.score(mentions_growth, sentiment_avg),
            source,
        };
        info!(
            "Collected {}: price={:.2} mentions={} buzz={:.2} ({})",
            ticker, record.price, record.mentions, record.buzz_score, record.source
        );
        record
    }
}

/// 当天之前该股票最近一条记录的提及数
fn previous_mentions(existing: &[HistoryRecord], ticker: &str, today: NaiveDate) -> Option<u64> {
    existing
        .iter()
        .filter(|r| r.date < today && r.ticker.eq_ignore_ascii_case(ticker))
        .max_by_key(|r| r.date)
        .map(|r| r.mentions)
}

/// 提及数增长率；没有可比基数时为 1.0
pub(crate) fn growth(current: u64, previous: Option<u64>) -> f64 {
    match previous {
        Some(prev) if prev > 0 => round2(count_as_f64(current) / count_as_f64(prev)),
        _ => NEUTRAL_GROWTH,
    }
}

/// 计数转浮点，超出 u32 的部分饱和处理
fn count_as_f64(n: u64) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, ticker: &str, mentions: u64) -> HistoryRecord {
        HistoryRecord {
            date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            ticker: ticker.to_string(),
            price: 1.0,
            mentions,
            sentiment_avg: 0.5,
            mentions_growth: 1.0,
            buzz_score: 0.7,
            source: DataSource::Real,
        }
    }

    #[test]
    fn test_growth() {
        assert_eq!(growth(60, Some(40)), 1.5);
        assert_eq!(growth(10, Some(3)), 3.33);
        assert_eq!(growth(10, Some(0)), 1.0);
        assert_eq!(growth(10, None), 1.0);
        assert_eq!(growth(0, Some(20)), 0.0);
    }

    #[test]
    fn test_previous_mentions_ignores_today_and_other_tickers() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        let rows = vec![
            row(1, "NVDA", 10),
            row(2, "NVDA", 20),
            row(2, "AAPL", 99),
            row(3, "NVDA", 500),
        ];
        assert_eq!(previous_mentions(&rows, "nvda", today), Some(20));
        assert_eq!(previous_mentions(&rows, "TSLA", today), None);
    }
}
