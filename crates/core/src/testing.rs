//! 内存测试替身，供下游 crate 的集成测试使用（`test-utils` feature）。

use crate::alert::entity::AlertConfig;
use crate::alert::port::AlertConfigStore;
use crate::history::entity::HistoryRecord;
use crate::history::error::StoreError;
use crate::history::merge::{self, MergeStats};
use crate::history::port::HistoryStore;
use crate::market::error::MarketError;
use crate::market::port::QuoteProvider;
use crate::news::entity::{Article, SyntheticActivity};
use crate::news::error::NewsError;
use crate::news::port::{ActivitySimulator, NewsProvider};
use crate::notify::error::NotifyError;
use crate::notify::port::Notifier;
use crate::sentiment::PolarityModel;
use crate::sync::error::SyncError;
use crate::sync::port::RemoteSync;
use crate::targets::entity::TargetList;
use crate::targets::port::TargetStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// 基于 `Vec` 的历史表，复用纯合并逻辑
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn upsert_batch(&self, records: Vec<HistoryRecord>) -> Result<MergeStats, StoreError> {
        let mut guard = self.records.lock().await;
        Ok(merge::merge_batch(&mut guard, records))
    }
}

/// 固定报价表，未登记的代码返回 `NotFound`
#[derive(Default)]
pub struct StaticQuoteProvider {
    prices: HashMap<String, f64>,
}

impl StaticQuoteProvider {
    pub fn new<I: IntoIterator<Item = (&'static str, f64)>>(prices: I) -> Self {
        Self {
            prices: prices.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

#[async_trait]
impl QuoteProvider for StaticQuoteProvider {
    async fn latest_price(&self, ticker: &str) -> Result<f64, MarketError> {
        self.prices
            .get(ticker)
            .copied()
            .ok_or_else(|| MarketError::NotFound(ticker.to_string()))
    }
}

/// 固定文章表，未登记的代码返回网络错误
#[derive(Default)]
pub struct StaticNewsProvider {
    articles: HashMap<String, Vec<Article>>,
}

impl StaticNewsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles(mut self, ticker: &str, titles: &[&str]) -> Self {
        let articles = titles
            .iter()
            .map(|t| Article {
                title: t.to_string(),
                description: None,
            })
            .collect();
        self.articles.insert(ticker.to_string(), articles);
        self
    }
}

#[async_trait]
impl NewsProvider for StaticNewsProvider {
    async fn fetch_articles(&self, ticker: &str) -> Result<Vec<Article>, NewsError> {
        self.articles
            .get(ticker)
            .cloned()
            .ok_or_else(|| NewsError::Network(format!("no route for {}", ticker)))
    }
}

/// 以关键词判断极性的简易模型：包含 `up` 为 0.5，包含 `down` 为 -0.5
pub struct KeywordPolarity;

impl PolarityModel for KeywordPolarity {
    fn compound(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        if lower.contains("up") {
            0.5
        } else if lower.contains("down") {
            -0.5
        } else {
            0.0
        }
    }
}

/// 记录投递内容的通知器，可配置为始终失败
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, to: &str, subject: &str, content: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Network("smtp unreachable".to_string()));
        }
        self.sent
            .lock()
            .await
            .push((to.to_string(), subject.to_string(), content.to_string()));
        Ok(())
    }
}

/// 记录写入内容的远端同步替身
#[derive(Default)]
pub struct RecordingSync {
    pub writes: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

impl RecordingSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl RemoteSync for RecordingSync {
    async fn write(&self, path: &str, content: &str, message: &str) -> Result<(), SyncError> {
        if self.fail {
            return Err(SyncError::Rejected {
                status: 403,
                message: "Resource not accessible by integration".to_string(),
            });
        }
        self.writes
            .lock()
            .await
            .push((path.to_string(), content.to_string(), message.to_string()));
        Ok(())
    }
}

/// 固定目标清单
pub struct StaticTargetStore(pub TargetList);

#[async_trait]
impl TargetStore for StaticTargetStore {
    async fn load(&self) -> Result<TargetList, StoreError> {
        Ok(self.0.clone())
    }
}

/// 内存报警规则
#[derive(Default)]
pub struct MemoryAlertConfigStore {
    config: Mutex<Option<AlertConfig>>,
}

impl MemoryAlertConfigStore {
    pub fn new(config: Option<AlertConfig>) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

#[async_trait]
impl AlertConfigStore for MemoryAlertConfigStore {
    async fn load(&self) -> Result<Option<AlertConfig>, StoreError> {
        Ok(self.config.lock().await.clone())
    }

    async fn save(&self, config: &AlertConfig) -> Result<(), StoreError> {
        *self.config.lock().await = Some(config.clone());
        Ok(())
    }
}

/// 返回固定值的模拟数据生成器
pub struct FixedActivitySimulator(pub SyntheticActivity);

impl ActivitySimulator for FixedActivitySimulator {
    fn sample(&self, _ticker: &str) -> SyntheticActivity {
        self.0
    }
}
