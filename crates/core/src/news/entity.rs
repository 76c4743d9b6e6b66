use serde::{Deserialize, Serialize};

/// # Summary
/// 提及某只股票的一篇新闻。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    // 标题
    pub title: String,
    // 摘要 (部分数据源缺失)
    pub description: Option<String>,
}

impl Article {
    /// 用于情绪分析的文本：标题与摘要拼接
    pub fn text(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => format!("{}. {}", self.title.trim(), desc),
            _ => self.title.trim().to_string(),
        }
    }
}

/// # Summary
/// 未配置新闻数据源时使用的模拟热度数据。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticActivity {
    pub mentions: u64,
    pub sentiment_avg: f64,
    pub mentions_growth: f64,
}
