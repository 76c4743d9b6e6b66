use crate::common::round2;
use serde::{Deserialize, Serialize};

/// 默认成交热度 (提及增长) 权重
pub const DEFAULT_VOL_WEIGHT: f64 = 0.7;
/// 默认情绪权重
pub const DEFAULT_SENT_WEIGHT: f64 = 0.3;
/// 情绪中性点
const SENTIMENT_NEUTRAL: f64 = 0.5;

/// # Summary
/// 热度分权重组合。
///
/// # Invariants
/// - 不要求两个权重之和为 1，由使用者自行调参。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuzzWeights {
    // 提及增长率权重
    pub vol_weight: f64,
    // 情绪偏移权重
    pub sent_weight: f64,
}

impl Default for BuzzWeights {
    fn default() -> Self {
        Self {
            vol_weight: DEFAULT_VOL_WEIGHT,
            sent_weight: DEFAULT_SENT_WEIGHT,
        }
    }
}

impl BuzzWeights {
    /// 以当前权重计算热度分
    pub fn score(&self, growth: f64, sentiment_avg: f64) -> f64 {
        buzz(growth, sentiment_avg, self.vol_weight, self.sent_weight)
    }
}

/// # Summary
/// 计算热度分 (Buzz Score)。
///
/// # Logic
/// 1. `growth * vol_weight` 表示讨论量的放大程度。
/// 2. `(sentiment_avg - 0.5) * sent_weight` 以中性情绪为零点的偏移贡献。
/// 3. 两者求和后保留两位小数。
///
/// 采集、报警与看板均调用本函数，保证存储值与展示值一致。
///
/// # Arguments
/// * `growth`: 提及增长率 (1.0 = 持平)。
/// * `sentiment_avg`: 归一化情绪 [0,1]。
/// * `vol_weight`: 增长率权重。
/// * `sent_weight`: 情绪权重。
///
/// # Returns
/// 保留两位小数的热度分。
pub fn buzz(growth: f64, sentiment_avg: f64, vol_weight: f64, sent_weight: f64) -> f64 {
    round2(growth * vol_weight + (sentiment_avg - SENTIMENT_NEUTRAL) * sent_weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buzz_closed_form() {
        assert_eq!(buzz(1.2, 0.7, 0.7, 0.3), 0.90);
        assert_eq!(buzz(1.0, 0.5, 0.7, 0.3), 0.70);
    }

    #[test]
    fn test_buzz_negative_sentiment_pulls_down() {
        // 情绪低于中性时贡献为负
        let bearish = buzz(1.0, 0.2, 0.7, 0.3);
        let neutral = buzz(1.0, 0.5, 0.7, 0.3);
        assert!(bearish < neutral);
        assert_eq!(bearish, 0.61);
    }

    #[test]
    fn test_buzz_weights_not_normalized() {
        assert_eq!(buzz(2.0, 1.0, 1.0, 1.0), 2.5);
        assert_eq!(buzz(1.5, 0.9, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_weights_default_matches_free_function() {
        let weights = BuzzWeights::default();
        assert_eq!(weights.score(1.3, 0.62), buzz(1.3, 0.62, 0.7, 0.3));
    }
}
