use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// # Summary
/// 数据来源标记，区分真实抓取与模拟生成的数据。
///
/// # Invariants
/// - 旧版本文件缺少该列时按 `Real` 处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    // 来自真实新闻/社交数据源
    #[default]
    Real,
    // 未配置数据源 Key 时生成的模拟值
    Synthetic,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Real => write!(f, "real"),
            DataSource::Synthetic => write!(f, "synthetic"),
        }
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "real" => Ok(DataSource::Real),
            "synthetic" | "mock" => Ok(DataSource::Synthetic),
            other => Err(format!("Unknown DataSource: {}", other)),
        }
    }
}

/// # Summary
/// 历史记录键：(日期, 股票代码)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub date: NaiveDate,
    pub ticker: String,
}

/// # Summary
/// 单日单票的历史快照，是系统唯一的有状态数据。
///
/// # Invariants
/// - 同一 `(date, ticker)` 在存储中至多出现一次。
/// - `sentiment_avg` 位于 [0,1]，0.5 为中性。
/// - `buzz_score` 与看板展示使用同一公式计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryRecord {
    // 日历日 (YYYY-MM-DD)
    #[schema(value_type = String, example = "2026-03-02")]
    pub date: NaiveDate,
    // 股票代码
    pub ticker: String,
    // 最新成交价
    pub price: f64,
    // 提及次数
    pub mentions: u64,
    // 平均情绪 [0,1]
    pub sentiment_avg: f64,
    // 提及增长率 (当前 / 基线)
    pub mentions_growth: f64,
    // 采集时计算的热度分
    #[serde(default)]
    pub buzz_score: f64,
    // 数据来源
    #[serde(default)]
    pub source: DataSource,
}

impl HistoryRecord {
    /// 返回该记录的唯一键
    pub fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date,
            ticker: self.ticker.clone(),
        }
    }

    /// 判断两条记录是否指向同一键，避免分配
    pub fn same_key(&self, other: &HistoryRecord) -> bool {
        self.date == other.date && self.ticker == other.ticker
    }
}
