use crate::error::ManagerError;
use buzz_core::alert::entity::AlertConfig;
use buzz_core::common::{normalize_ticker, round2};
use buzz_core::history::entity::HistoryRecord;
use buzz_core::history::port::HistoryStore;
use buzz_core::score::BuzzWeights;
use buzz_core::sync::port::RemoteSync;
use buzz_core::targets::entity::TargetList;
use std::sync::Arc;
use tracing::info;

/// 远端仓库中的目标清单路径
pub const REMOTE_TARGETS_PATH: &str = "data/targets.csv";
/// 远端仓库中的报警规则路径
pub const REMOTE_CONFIG_PATH: &str = "data/config.json";

/// 带重新计算热度分的历史行
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub record: HistoryRecord,
    pub buzz: f64,
}

/// 最新一行相对前一行的变化
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deltas {
    pub buzz: f64,
    pub price: f64,
    pub mentions: i64,
}

/// # Summary
/// 单只股票的看板数据。
///
/// # Invariants
/// - `rows` 按日期升序。
/// - `deltas` 仅在至少两行时存在。
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub ticker: String,
    pub weights: BuzzWeights,
    pub rows: Vec<ScoredRow>,
    pub latest: Option<ScoredRow>,
    pub deltas: Option<Deltas>,
}

/// # Summary
/// 控制面板服务：只读查询历史，并把编辑结果同步到远端仓库。
///
/// # Invariants
/// - 每次请求都重新读取历史，不做缓存。
/// - 未配置远端同步时，写操作返回 `Config` 错误。
pub struct DashboardService {
    history: Arc<dyn HistoryStore>,
    sync: Option<Arc<dyn RemoteSync>>,
}

impl DashboardService {
    pub fn new(history: Arc<dyn HistoryStore>, sync: Option<Arc<dyn RemoteSync>>) -> Self {
        Self { history, sync }
    }

    /// 历史中出现过的股票代码
    pub async fn tickers(&self) -> Result<Vec<String>, ManagerError> {
        Ok(self.history.tickers().await?)
    }

    /// # Summary
    /// 按给定权重构建单只股票的看板数据。
    ///
    /// # Logic
    /// 1. 读取该股票的历史（升序）。
    /// 2. 对每行用给定权重重新计算热度分。
    /// 3. 至少两行时计算最新一行相对前一行的变化。
    ///
    /// # Arguments
    /// * `ticker`: 股票代码，大小写不敏感。
    /// * `weights`: 热度分权重。
    ///
    /// # Returns
    /// 未知代码返回空视图而非错误。
    pub async fn view(&self, ticker: &str, weights: BuzzWeights) -> Result<DashboardView, ManagerError> {
        let ticker = normalize_ticker(ticker).unwrap_or_default();
        let rows: Vec<ScoredRow> = self
            .history
            .load_ticker(&ticker)
            .await?
            .into_iter()
            .map(|record| ScoredRow {
                buzz: weights.score(record.mentions_growth, record.sentiment_avg),
                record,
            })
            .collect();

        let deltas = match rows.as_slice() {
            [.., prev, last] => Some(compute_deltas(prev, last)),
            _ => None,
        };

        Ok(DashboardView {
            ticker,
            weights,
            latest: rows.last().cloned(),
            rows,
            deltas,
        })
    }

    /// # Summary
    /// 上传新的目标清单并同步到远端。
    ///
    /// # Logic
    /// 1. 解析上传文本，规范化并去重。
    /// 2. 清单为空时返回 `BadRequest`。
    /// 3. 渲染为单列 CSV 写入远端。
    ///
    /// # Returns
    /// 解析得到的清单。
    pub async fn upload_targets(&self, text: &str) -> Result<TargetList, ManagerError> {
        let list = TargetList::parse_upload(text);
        if list.is_empty() {
            return Err(ManagerError::BadRequest(
                "Uploaded file contains no tickers".to_string(),
            ));
        }

        let sync = self.remote()?;
        sync.write(REMOTE_TARGETS_PATH, &list.to_csv(), "Web update targets")
            .await?;
        info!("Target list updated: {}", list.tickers().join(", "));
        Ok(list)
    }

    /// # Summary
    /// 校验并同步报警规则。
    ///
    /// # Logic
    /// 1. 阈值非有限数或收件人非法时返回 `BadRequest`。
    /// 2. 以 4 空格缩进 JSON 写入远端。
    pub async fn save_alert_config(&self, config: &AlertConfig) -> Result<(), ManagerError> {
        config.validate().map_err(ManagerError::BadRequest)?;
        let json = config
            .to_pretty_json()
            .map_err(|e| ManagerError::BadRequest(e.to_string()))?;

        let sync = self.remote()?;
        sync.write(REMOTE_CONFIG_PATH, &json, "Web update config").await?;
        info!(
            "Alert config updated: threshold {} -> {}",
            config.alert_threshold, config.receiver_email
        );
        Ok(())
    }

    fn remote(&self) -> Result<&Arc<dyn RemoteSync>, ManagerError> {
        self.sync
            .as_ref()
            .ok_or_else(|| ManagerError::Config("GH_TOKEN / REPO_NAME are not set".to_string()))
    }
}

fn compute_deltas(prev: &ScoredRow, last: &ScoredRow) -> Deltas {
    let as_i64 = |n: u64| i64::try_from(n).unwrap_or(i64::MAX);
    Deltas {
        buzz: round2(last.buzz - prev.buzz),
        price: round2(last.record.price - prev.record.price),
        mentions: as_i64(last.record.mentions).saturating_sub(as_i64(prev.record.mentions)),
    }
}
