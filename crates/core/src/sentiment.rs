//! 情绪打分：把若干文本的复合极性归一化到 [0,1]。

use crate::common::round2;
use std::sync::Arc;

/// 无数据时的中性情绪
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

/// # Summary
/// 词典型情绪模型接口。
///
/// # Invariants
/// - `compound` 的返回值必须位于 [-1, 1]。
/// - 对同一文本的结果必须是确定的。
pub trait PolarityModel: Send + Sync {
    /// 计算单条文本的复合极性
    fn compound(&self, text: &str) -> f64;
}

/// # Summary
/// 将复合极性 [-1,1] 映射到 [0,1]。
pub fn normalize_compound(compound: f64) -> f64 {
    (compound.clamp(-1.0, 1.0) + 1.0) / 2.0
}

/// # Summary
/// 由复合极性序列计算平均情绪。
///
/// # Logic
/// 1. 空序列直接返回 0.5。
/// 2. 求平均后映射到 [0,1] 并保留两位小数。
///
/// # Arguments
/// * `compounds`: 每条文本的复合极性。
///
/// # Returns
/// 归一化后的平均情绪。
pub fn score_compounds(compounds: &[f64]) -> f64 {
    if compounds.is_empty() {
        return NEUTRAL_SENTIMENT;
    }
    let (sum, count) = compounds
        .iter()
        .fold((0.0_f64, 0.0_f64), |(sum, count), c| (sum + c, count + 1.0));
    let avg = sum / count;
    round2(normalize_compound(avg))
}

/// # Summary
/// 情绪打分器，持有一个可替换的极性模型。
#[derive(Clone)]
pub struct SentimentScorer {
    model: Arc<dyn PolarityModel>,
}

impl SentimentScorer {
    pub fn new(model: Arc<dyn PolarityModel>) -> Self {
        Self { model }
    }

    /// # Summary
    /// 对一组文本打分。
    ///
    /// # Logic
    /// 1. 跳过空白文本。
    /// 2. 逐条求复合极性后交给 `score_compounds`。
    ///
    /// # Arguments
    /// * `texts`: 原始文本。
    ///
    /// # Returns
    /// [0,1] 之间的情绪分；无有效文本时为 0.5。
    pub fn score<S: AsRef<str>>(&self, texts: &[S]) -> f64 {
        let compounds: Vec<f64> = texts
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !t.trim().is_empty())
            .map(|t| self.model.compound(t))
            .collect();
        score_compounds(&compounds)
    }
}
