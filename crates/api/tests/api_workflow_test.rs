use buzz_api::server::{AppState, serve};
use buzz_core::common::tls::install_crypto_provider;
use buzz_core::history::entity::{DataSource, HistoryRecord};
use buzz_core::score::BuzzWeights;
use buzz_core::testing::{MemoryHistoryStore, RecordingSync};
use buzz_core::sync::port::RemoteSync;
use buzz_manager::dashboard::DashboardService;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

fn record(d: u32, ticker: &str, price: f64, mentions: u64, growth: f64) -> HistoryRecord {
    HistoryRecord {
        date: NaiveDate::from_ymd_opt(2026, 8, d).unwrap(),
        ticker: ticker.to_string(),
        price,
        mentions,
        sentiment_avg: 0.7,
        mentions_growth: growth,
        buzz_score: 0.0,
        source: DataSource::Real,
    }
}

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server(sync: Option<Arc<dyn RemoteSync>>) -> String {
    install_crypto_provider();

    let history = Arc::new(MemoryHistoryStore::with_records(vec![
        record(1, "NVDA", 185.0, 1000, 1.0),
        record(2, "NVDA", 190.0, 1300, 1.2),
        record(2, "AAPL", 230.0, 900, 1.1),
    ]));
    let state = AppState {
        dashboard: Arc::new(DashboardService::new(history, sync)),
        default_weights: BuzzWeights::default(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_history_endpoints() -> anyhow::Result<()> {
    let base = spawn_test_server(None).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/api/v1/tickers", base)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!(["NVDA", "AAPL"]));

    let body: Value = client
        .get(format!("{}/api/v1/history/nvda", base))
        .send()
        .await?
        .json()
        .await?;
    let data = &body["data"];
    assert_eq!(data["ticker"], "NVDA");
    assert_eq!(data["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["rows"][0]["date"], "2026-08-01");
    assert_eq!(data["latest"]["buzz_score"], 0.9);
    assert_eq!(data["deltas"]["mentions"], 300);

    // 自定义权重
    let body: Value = client
        .get(format!("{}/api/v1/history/NVDA?vol_weight=1&sent_weight=0", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["latest"]["buzz_score"], 1.2);
    assert_eq!(body["data"]["sent_weight"], 0.0);

    // 未知股票返回空看板
    let body: Value = client
        .get(format!("{}/api/v1/history/ZZZZ", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["rows"], json!([]));
    assert!(body["data"]["latest"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_settings_sync_workflow() -> anyhow::Result<()> {
    let sync = Arc::new(RecordingSync::new());
    let base = spawn_test_server(Some(sync.clone())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/v1/targets", base))
        .json(&json!({ "content": "Ticker,Name\namd,AMD Inc\nmsft,Microsoft\n" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["data"]["tickers"], json!(["AMD", "MSFT"]));

    let resp = client
        .put(format!("{}/api/v1/alert-config", base))
        .json(&json!({ "alert_threshold": 1.8, "receiver_email": "ops@example.com" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let writes = sync.writes.lock().await;
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].0, "data/targets.csv");
    assert_eq!(writes[1].0, "data/config.json");
    assert_eq!(writes[1].2, "Web update config");
    drop(writes);

    // 非法收件人
    let resp = client
        .put(format!("{}/api/v1/alert-config", base))
        .json(&json!({ "alert_threshold": 1.8, "receiver_email": "" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn test_sync_errors_map_to_status() -> anyhow::Result<()> {
    let client = reqwest::Client::new();

    let base = spawn_test_server(None).await;
    let resp = client
        .post(format!("{}/api/v1/targets", base))
        .json(&json!({ "content": "NVDA" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let base = spawn_test_server(Some(Arc::new(RecordingSync::failing()))).await;
    let resp = client
        .post(format!("{}/api/v1/targets", base))
        .json(&json!({ "content": "NVDA" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await?;
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Sync failed"));

    let resp = client.get(format!("{}/api-docs/openapi.json", base)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = resp.json().await?;
    assert!(doc["paths"]["/api/v1/history/{ticker}"].is_object());
    Ok(())
}
