use buzz_core::alert::entity::AlertConfig;
use buzz_core::history::entity::{DataSource, HistoryRecord};
use buzz_core::score::BuzzWeights;
use buzz_core::testing::{MemoryHistoryStore, RecordingSync};
use buzz_manager::dashboard::DashboardService;
use buzz_manager::error::ManagerError;
use chrono::NaiveDate;
use std::sync::Arc;

fn record(d: u32, ticker: &str, price: f64, mentions: u64, growth: f64) -> HistoryRecord {
    HistoryRecord {
        date: NaiveDate::from_ymd_opt(2026, 7, d).unwrap(),
        ticker: ticker.to_string(),
        price,
        mentions,
        sentiment_avg: 0.7,
        mentions_growth: growth,
        buzz_score: 0.0,
        source: DataSource::Real,
    }
}

fn history() -> Arc<MemoryHistoryStore> {
    Arc::new(MemoryHistoryStore::with_records(vec![
        record(2, "NVDA", 190.0, 1300, 1.2),
        record(1, "NVDA", 185.0, 1000, 1.0),
        record(1, "AAPL", 230.0, 900, 1.1),
    ]))
}

#[tokio::test]
async fn test_view_recomputes_buzz_and_deltas() -> anyhow::Result<()> {
    let svc = DashboardService::new(history(), None);

    let view = svc.view("nvda", BuzzWeights::default()).await?;
    assert_eq!(view.ticker, "NVDA");
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].record.date, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
    assert_eq!(view.rows[0].buzz, 0.76);
    assert_eq!(view.rows[1].buzz, 0.90);

    let latest = view.latest.unwrap();
    assert_eq!(latest.record.price, 190.0);

    let deltas = view.deltas.unwrap();
    assert_eq!(deltas.buzz, 0.14);
    assert_eq!(deltas.price, 5.0);
    assert_eq!(deltas.mentions, 300);

    // 改变权重后热度分随之变化
    let growth_only = BuzzWeights {
        vol_weight: 1.0,
        sent_weight: 0.0,
    };
    let view = svc.view("NVDA", growth_only).await?;
    assert_eq!(view.rows[1].buzz, 1.2);
    Ok(())
}

#[tokio::test]
async fn test_view_single_row_and_unknown() -> anyhow::Result<()> {
    let svc = DashboardService::new(history(), None);

    let aapl = svc.view("AAPL", BuzzWeights::default()).await?;
    assert_eq!(aapl.rows.len(), 1);
    assert!(aapl.latest.is_some());
    assert!(aapl.deltas.is_none());

    // 前后空白与大小写不影响查找
    let padded = svc.view(" aapl ", BuzzWeights::default()).await?;
    assert_eq!(padded.ticker, "AAPL");
    assert_eq!(padded.rows.len(), 1);

    let unknown = svc.view("ZZZZ", BuzzWeights::default()).await?;
    assert!(unknown.rows.is_empty());
    assert!(unknown.latest.is_none());

    assert_eq!(svc.tickers().await?, vec!["NVDA", "AAPL"]);
    Ok(())
}

#[tokio::test]
async fn test_upload_targets_syncs_csv() -> anyhow::Result<()> {
    let sync = Arc::new(RecordingSync::new());
    let svc = DashboardService::new(history(), Some(sync.clone()));

    let list = svc.upload_targets("Symbol\nmsft\nAMD\nmsft\n").await?;
    assert_eq!(list.tickers(), &["MSFT", "AMD"]);

    let writes = sync.writes.lock().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "data/targets.csv");
    assert_eq!(writes[0].1, "Ticker\nMSFT\nAMD");
    assert_eq!(writes[0].2, "Web update targets");
    Ok(())
}

#[tokio::test]
async fn test_upload_errors() {
    let svc = DashboardService::new(history(), Some(Arc::new(RecordingSync::new())));
    assert!(matches!(
        svc.upload_targets("Ticker\n\n").await,
        Err(ManagerError::BadRequest(_))
    ));

    let svc = DashboardService::new(history(), None);
    assert!(matches!(
        svc.upload_targets("NVDA").await,
        Err(ManagerError::Config(_))
    ));

    let svc = DashboardService::new(history(), Some(Arc::new(RecordingSync::failing())));
    assert!(matches!(
        svc.upload_targets("NVDA").await,
        Err(ManagerError::Sync(_))
    ));
}

#[tokio::test]
async fn test_save_alert_config() -> anyhow::Result<()> {
    let sync = Arc::new(RecordingSync::new());
    let svc = DashboardService::new(history(), Some(sync.clone()));

    svc.save_alert_config(&AlertConfig {
        alert_threshold: 1.8,
        receiver_email: "ops@example.com".to_string(),
    })
    .await?;

    let writes = sync.writes.lock().await;
    assert_eq!(writes[0].0, "data/config.json");
    assert_eq!(
        writes[0].1,
        "{\n    \"alert_threshold\": 1.8,\n    \"receiver_email\": \"ops@example.com\"\n}"
    );
    assert_eq!(writes[0].2, "Web update config");
    drop(writes);

    let bad = svc
        .save_alert_config(&AlertConfig {
            alert_threshold: f64::NAN,
            receiver_email: "ops@example.com".to_string(),
        })
        .await;
    assert!(matches!(bad, Err(ManagerError::BadRequest(_))));
    assert_eq!(sync.writes.lock().await.len(), 1);
    Ok(())
}
