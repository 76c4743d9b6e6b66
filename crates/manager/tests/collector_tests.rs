use buzz_core::common::time::FakeClockProvider;
use buzz_core::history::entity::{DataSource, HistoryRecord};
use buzz_core::history::port::HistoryStore;
use buzz_core::news::entity::SyntheticActivity;
use buzz_core::news::port::NewsProvider;
use buzz_core::score::BuzzWeights;
use buzz_core::sentiment::SentimentScorer;
use buzz_core::targets::entity::TargetList;
use buzz_core::testing::{
    FixedActivitySimulator, KeywordPolarity, MemoryHistoryStore, StaticNewsProvider,
    StaticQuoteProvider, StaticTargetStore,
};
use buzz_manager::collector::{CollectorDeps, CollectorOptions, CollectorService};
use buzz_store::csv_history::CsvHistoryStore;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
}

fn options(delay_ms: u64) -> CollectorOptions {
    CollectorOptions {
        weights: BuzzWeights::default(),
        fallback_price: 185.0,
        request_delay: Duration::from_millis(delay_ms),
    }
}

fn build(
    history: Arc<dyn HistoryStore>,
    news: Option<Arc<dyn NewsProvider>>,
    targets: &[&str],
    delay_ms: u64,
) -> CollectorService {
    let deps = CollectorDeps {
        quotes: Arc::new(StaticQuoteProvider::new([("NVDA", 190.0)])),
        news,
        scorer: SentimentScorer::new(Arc::new(KeywordPolarity)),
        simulator: Arc::new(FixedActivitySimulator(SyntheticActivity {
            mentions: 1000,
            sentiment_avg: 0.6,
            mentions_growth: 1.2,
        })),
        history,
        targets: Arc::new(StaticTargetStore(TargetList::new(targets.iter().copied()))),
        clock: Arc::new(FakeClockProvider::new(day(2))),
    };
    CollectorService::new(deps, options(delay_ms))
}

/// 真实新闻路径：提及数、情绪、增长率与回退价格
#[tokio::test]
async fn test_collect_with_news() -> anyhow::Result<()> {
    let history = Arc::new(MemoryHistoryStore::with_records(vec![HistoryRecord {
        date: day(1),
        ticker: "NVDA".to_string(),
        price: 180.0,
        mentions: 2,
        sentiment_avg: 0.5,
        mentions_growth: 1.0,
        buzz_score: 0.7,
        source: DataSource::Real,
    }]));
    let news = StaticNewsProvider::new().with_titles("NVDA", &["NVDA up", "NVDA up again", "flat day"]);
    let collector = build(history.clone(), Some(Arc::new(news)), &["NVDA", "AAPL"], 0);

    let report = collector.run().await?;
    assert_eq!(report.stats.inserted, 2);

    let nvda = &report.records[0];
    assert_eq!(nvda.date, day(2));
    assert_eq!(nvda.price, 190.0);
    assert_eq!(nvda.mentions, 3);
    assert_eq!(nvda.sentiment_avg, 0.67);
    assert_eq!(nvda.mentions_growth, 1.5);
    assert_eq!(nvda.buzz_score, 1.10);
    assert_eq!(nvda.source, DataSource::Real);

    // 报价失败用回退价；新闻失败且无历史时提及数为 0，其余取中性值
    let aapl = &report.records[1];
    assert_eq!(aapl.price, 185.0);
    assert_eq!(aapl.mentions, 0);
    assert_eq!(aapl.sentiment_avg, 0.5);
    assert_eq!(aapl.mentions_growth, 1.0);
    assert_eq!(aapl.buzz_score, 0.70);

    assert_eq!(history.load_all().await?.len(), 3);
    Ok(())
}

/// 新闻源失败时沿用上一次的提及数，增长率与情绪为中性
#[tokio::test]
async fn test_news_failure_keeps_previous_baseline() -> anyhow::Result<()> {
    let history = Arc::new(MemoryHistoryStore::with_records(vec![HistoryRecord {
        date: day(1),
        ticker: "AAPL".to_string(),
        price: 230.0,
        mentions: 40,
        sentiment_avg: 0.8,
        mentions_growth: 2.0,
        buzz_score: 1.49,
        source: DataSource::Real,
    }]));
    let collector = build(history.clone(), Some(Arc::new(StaticNewsProvider::new())), &["AAPL"], 0);

    let report = collector.run().await?;
    let aapl = &report.records[0];
    assert_eq!(aapl.date, day(2));
    assert_eq!(aapl.mentions, 40);
    assert_eq!(aapl.sentiment_avg, 0.5);
    assert_eq!(aapl.mentions_growth, 1.0);
    assert_eq!(aapl.buzz_score, 0.70);
    assert_eq!(report.stats.inserted, 1);

    let stored = history.load_ticker("AAPL").await?;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].mentions, 40);
    Ok(())
}

/// 未配置新闻源时全部使用模拟数据并打上标记
#[tokio::test]
async fn test_collect_synthetic() -> anyhow::Result<()> {
    let history = Arc::new(MemoryHistoryStore::new());
    let collector = build(history.clone(), None, &["TSLA"], 0);

    let report = collector.run().await?;
    let tsla = &report.records[0];
    assert_eq!(tsla.mentions, 1000);
    assert_eq!(tsla.mentions_growth, 1.2);
    assert_eq!(tsla.buzz_score, 0.87);
    assert_eq!(tsla.source, DataSource::Synthetic);
    Ok(())
}

/// 同一天重复运行只替换，不新增
#[tokio::test]
async fn test_rerun_same_day_replaces() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let history = Arc::new(CsvHistoryStore::new(tmp.path().join("history.csv"))?);
    let collector = build(history.clone(), None, &["NVDA", "AAPL"], 0);

    let first = collector.run().await?;
    assert_eq!(first.stats.inserted, 2);
    let second = collector.run().await?;
    assert_eq!(second.stats.replaced, 2);
    assert_eq!(second.stats.inserted, 0);

    assert_eq!(history.load_all().await?.len(), 2);
    Ok(())
}

/// 相邻股票之间等待固定间隔
#[tokio::test(start_paused = true)]
async fn test_delay_between_tickers() -> anyhow::Result<()> {
    let history = Arc::new(MemoryHistoryStore::new());
    let collector = build(history, None, &["NVDA", "AAPL", "TSLA"], 1000);

    let started = tokio::time::Instant::now();
    collector.run().await?;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));
    Ok(())
}
