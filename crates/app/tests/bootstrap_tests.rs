use buzz_app::{bootstrap, settings};
use buzz_core::config::StoreBackend;
use buzz_core::history::entity::{DataSource, HistoryRecord};
use buzz_core::history::port::HistoryStore;
use buzz_manager::error::ManagerError;
use buzz_store::csv_history::CsvHistoryStore;
use chrono::NaiveDate;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// 环境变量覆盖配置文件
#[test]
fn test_file_then_env_layering() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let file = tmp.path().join("buzz.toml");
    std::fs::write(
        &file,
        "buzz_port = 9000\nbuzz_alert_threshold = 2.0\nrepo_name = \"me/from-file\"\nbuzz_store_backend = \"sqlite\"\n",
    )?;

    let cfg = settings::load_from(
        Some(&file),
        Some(env(&[
            ("REPO_NAME", "me/from-env"),
            ("BUZZ_VOL_WEIGHT", "0.6"),
            ("BUZZ_SENT_WEIGHT", "0.4"),
            ("RECEIVER_EMAIL", "ops@example.com"),
        ])),
    )?;

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.alert.threshold, 2.0);
    assert_eq!(cfg.sync.repo_name.as_deref(), Some("me/from-env"));
    assert_eq!(cfg.storage.backend, StoreBackend::Sqlite);
    assert_eq!(cfg.scoring.vol_weight, 0.6);
    assert_eq!(cfg.scoring.sent_weight, 0.4);
    assert_eq!(cfg.alert.receiver_email.as_deref(), Some("ops@example.com"));
    assert!(cfg.alert.email_user.is_none());
    Ok(())
}

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let cfg = settings::load_from(Some(&tmp.path().join("absent.toml")), Some(HashMap::new()))?;
    assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
    assert_eq!(cfg.collector.request_delay_ms, 1000);
    Ok(())
}

/// 未配置邮箱时报警检查以配置错误中止
#[tokio::test]
async fn test_alert_without_email_credentials() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let data_dir = tmp.path().to_string_lossy().to_string();
    let cfg = settings::load_from(
        Some(&tmp.path().join("absent.toml")),
        Some(env(&[("BUZZ_DATA_DIR", &data_dir), ("RECEIVER_EMAIL", "ops@example.com")])),
    )?;

    let history = CsvHistoryStore::new(cfg.storage.history_csv())?;
    history
        .upsert(HistoryRecord {
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            ticker: "NVDA".to_string(),
            price: 185.0,
            mentions: 1500,
            sentiment_avg: 0.8,
            mentions_growth: 2.5,
            buzz_score: 1.84,
            source: DataSource::Synthetic,
        })
        .await?;

    let service = bootstrap::alert_service(&cfg).await?;
    assert!(matches!(service.run().await, Err(ManagerError::Config(_))));
    Ok(())
}

/// 未配置远端同步时看板仍可启动
#[tokio::test]
async fn test_dashboard_state_without_sync() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let data_dir = tmp.path().to_string_lossy().to_string();
    let cfg = settings::load_from(
        Some(&tmp.path().join("absent.toml")),
        Some(env(&[("BUZZ_DATA_DIR", &data_dir)])),
    )?;

    let state = bootstrap::dashboard_state(&cfg).await?;
    assert!(state.dashboard.tickers().await?.is_empty());
    assert!(matches!(
        state.dashboard.upload_targets("NVDA").await,
        Err(ManagerError::Config(_))
    ));
    Ok(())
}
