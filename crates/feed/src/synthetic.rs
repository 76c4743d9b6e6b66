use buzz_core::common::round2;
use buzz_core::news::entity::SyntheticActivity;
use buzz_core::news::port::ActivitySimulator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Mutex;

/// # Summary
/// 随机模拟热度数据，用于没有新闻 API Key 时让看板仍有可观察的波动。
///
/// # Invariants
/// - 提及量位于 [800, 1500]，情绪位于 [0.4, 0.8]，增长率位于 [0.9, 1.3]。
/// - 情绪与增长率保留两位小数。
pub struct RandomActivitySimulator {
    rng: Mutex<StdRng>,
    mentions: RangeInclusive<u64>,
    sentiment: RangeInclusive<f64>,
    growth: RangeInclusive<f64>,
}

impl RandomActivitySimulator {
    /// 以操作系统熵源初始化
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// 以固定种子初始化，结果可复现
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            mentions: 800..=1500,
            sentiment: 0.4..=0.8,
            growth: 0.9..=1.3,
        }
    }
}

impl Default for RandomActivitySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySimulator for RandomActivitySimulator {
    fn sample(&self, ticker: &str) -> SyntheticActivity {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let activity = SyntheticActivity {
            mentions: rng.random_range(self.mentions.clone()),
            sentiment_avg: round2(rng.random_range(self.sentiment.clone())),
            mentions_growth: round2(rng.random_range(self.growth.clone())),
        };
        tracing::debug!(ticker, ?activity, "generated synthetic activity");
        activity
    }
}
