use super::entity::{AlertDecision, compose};
use crate::history::entity::HistoryRecord;
use crate::score::BuzzWeights;

/// # Summary
/// 判定单条记录是否需要报警。
///
/// # Logic
/// 1. 用给定权重重新计算热度分（与看板同一公式）。
/// 2. 严格大于阈值时触发，等于阈值不触发。
///
/// # Arguments
/// * `record`: 某只股票的最新记录。
/// * `threshold`: 报警阈值。
/// * `weights`: 热度分权重。
///
/// # Returns
/// `AlertDecision::Fire` 或 `AlertDecision::Normal`。
pub fn evaluate(record: &HistoryRecord, threshold: f64, weights: &BuzzWeights) -> AlertDecision {
    let buzz_score = weights.score(record.mentions_growth, record.sentiment_avg);
    if buzz_score > threshold {
        AlertDecision::Fire(compose(record, buzz_score, threshold))
    } else {
        AlertDecision::Normal {
            ticker: record.ticker.clone(),
            buzz_score,
        }
    }
}
