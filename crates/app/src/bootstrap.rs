//! # 依赖组装
//!
//! 纯粹的 DI 容器：按 `AppConfig` 实例化具体实现，通过 `Arc<dyn Trait>`
//! 注入到 `buzz-manager` 的服务中。服务层不知道任何具体实现。

use crate::error::AppError;
use buzz_api::server::AppState;
use buzz_core::common::time::RealTimeProvider;
use buzz_core::config::AppConfig;
use buzz_core::news::port::NewsProvider;
use buzz_core::notify::port::Notifier;
use buzz_core::sentiment::SentimentScorer;
use buzz_core::sync::port::RemoteSync;
use buzz_feed::newsapi::NewsApiProvider;
use buzz_feed::synthetic::RandomActivitySimulator;
use buzz_feed::vader::VaderModel;
use buzz_feed::yahoo::YahooQuoteProvider;
use buzz_manager::alert::{AlertDefaults, AlertService};
use buzz_manager::collector::{CollectorDeps, CollectorOptions, CollectorService};
use buzz_manager::dashboard::DashboardService;
use buzz_notify::email::EmailNotifier;
use buzz_store::alert_config::JsonAlertConfigStore;
use buzz_store::open_history_store;
use buzz_store::targets::CsvTargetStore;
use buzz_sync::github::GithubContentSync;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// # Summary
/// 组装采集服务。
///
/// # Logic
/// 1. 报价固定使用 Yahoo Finance。
/// 2. 配置了 `NEWS_API_KEY` 时接入 NewsAPI + VADER，否则只使用模拟数据。
/// 3. 历史表后端按 `storage.backend` 选择。
pub async fn collector(cfg: &AppConfig) -> Result<CollectorService, AppError> {
    let quotes = YahooQuoteProvider::new().map_err(|e| AppError::Init(format!("quote provider: {}", e)))?;

    let news: Option<Arc<dyn NewsProvider>> = match &cfg.collector.news_api_key {
        Some(key) => {
            info!("NEWS_API_KEY found, collecting real news activity");
            let provider =
                NewsApiProvider::new(key.clone()).map_err(|e| AppError::Init(format!("news provider: {}", e)))?;
            Some(Arc::new(provider))
        }
        None => {
            warn!("NEWS_API_KEY not set, social activity will be simulated");
            None
        }
    };

    let deps = CollectorDeps {
        quotes: Arc::new(quotes),
        news,
        scorer: SentimentScorer::new(Arc::new(VaderModel::new())),
        simulator: Arc::new(RandomActivitySimulator::new()),
        history: open_history_store(&cfg.storage).await?,
        targets: Arc::new(CsvTargetStore::new(cfg.storage.targets_csv())),
        clock: Arc::new(RealTimeProvider),
    };
    let options = CollectorOptions {
        weights: cfg.scoring,
        fallback_price: cfg.collector.fallback_price,
        request_delay: Duration::from_millis(cfg.collector.request_delay_ms),
    };

    Ok(CollectorService::new(deps, options))
}

/// # Summary
/// 组装报警检查服务。
///
/// # Logic
/// 1. `EMAIL_USER` 与 `EMAIL_PASS` 都存在时创建 SMTP 通知器，否则留空，由服务在需要投递时报错。
/// 2. 本地 `config.json` 作为阈值与收件人的覆盖来源。
pub async fn alert_service(cfg: &AppConfig) -> Result<AlertService, AppError> {
    let notifier: Option<Arc<dyn Notifier>> = match (&cfg.alert.email_user, &cfg.alert.email_pass) {
        (Some(user), Some(pass)) => {
            let email = EmailNotifier::new(&cfg.alert.smtp_host, cfg.alert.smtp_port, user, pass)
                .map_err(|e| AppError::Config(e.to_string()))?;
            Some(Arc::new(email))
        }
        _ => None,
    };

    Ok(AlertService::new(
        open_history_store(&cfg.storage).await?,
        notifier,
        Arc::new(JsonAlertConfigStore::new(cfg.storage.alert_config_json())),
        AlertDefaults {
            threshold: cfg.alert.threshold,
            receiver_email: cfg.alert.receiver_email.clone(),
            weights: cfg.scoring,
        },
    ))
}

/// # Summary
/// 组装控制面板的共享状态。
///
/// # Logic
/// 1. `GH_TOKEN` 与 `REPO_NAME` 都存在时启用远端同步，否则写操作返回 503。
pub async fn dashboard_state(cfg: &AppConfig) -> Result<AppState, AppError> {
    let sync: Option<Arc<dyn RemoteSync>> = match (&cfg.sync.gh_token, &cfg.sync.repo_name) {
        (Some(token), Some(repo)) => {
            let github = GithubContentSync::new(token.clone(), repo.clone())
                .map_err(|e| AppError::Config(e.to_string()))?;
            info!("Remote sync enabled for {}", repo);
            Some(Arc::new(github))
        }
        _ => {
            warn!("GH_TOKEN / REPO_NAME not set, target and alert edits are disabled");
            None
        }
    };

    let history = open_history_store(&cfg.storage).await?;
    Ok(AppState {
        dashboard: Arc::new(DashboardService::new(history, sync)),
        default_weights: cfg.scoring,
    })
}
