use buzz_core::sentiment::PolarityModel;
use vader_sentiment::SentimentIntensityAnalyzer;

/// # Summary
/// 基于 VADER 词典的复合极性模型。
///
/// VADER 针对社交媒体与新闻短文本调校，`compound` 分值位于 [-1, 1]。
pub struct VaderModel {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderModel {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityModel for VaderModel {
    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buzz_core::sentiment::SentimentScorer;
    use std::sync::Arc;

    #[test]
    fn test_polarity_direction() {
        let model = VaderModel::new();
        assert!(model.compound("Nvidia posts great, amazing record earnings") > 0.3);
        assert!(model.compound("Terrible losses and an awful lawsuit hit the company") < -0.3);
        assert_eq!(model.compound("   "), 0.0);
    }

    #[test]
    fn test_scorer_with_vader_is_deterministic() {
        let scorer = SentimentScorer::new(Arc::new(VaderModel::new()));
        let texts = ["Apple shares rally on strong iPhone demand", "Analysts stay cautious"];

        let first = scorer.score(&texts);
        assert!((0.0..=1.0).contains(&first));
        assert_eq!(first, scorer.score(&texts));
    }
}
