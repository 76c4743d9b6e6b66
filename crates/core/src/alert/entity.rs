use crate::history::entity::HistoryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 默认报警阈值
pub const DEFAULT_ALERT_THRESHOLD: f64 = 1.5;

/// # Summary
/// 报警规则配置，对应远端/本地的 `config.json`。
///
/// # Invariants
/// - `alert_threshold` 必须为有限数。
/// - `receiver_email` 不能为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertConfig {
    // 热度分阈值，严格大于时触发
    #[schema(example = 1.5)]
    pub alert_threshold: f64,
    // 收件人邮箱
    #[schema(example = "ops@example.com")]
    pub receiver_email: String,
}

impl AlertConfig {
    /// # Summary
    /// 校验配置合法性。
    ///
    /// # Returns
    /// 合法返回 `Ok(())`，否则返回可读的错误描述。
    pub fn validate(&self) -> Result<(), String> {
        if !self.alert_threshold.is_finite() {
            return Err("alert_threshold must be a finite number".to_string());
        }
        let email = self.receiver_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(format!("receiver_email '{}' is not a valid address", email));
        }
        Ok(())
    }

    /// 以 4 空格缩进渲染为 JSON
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// # Summary
/// 一次已触发的报警，包含待投递的标题与正文。
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub ticker: String,
    pub buzz_score: f64,
    pub subject: String,
    pub body: String,
}

/// # Summary
/// 报警判定结果。
#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    // 指标越过阈值，需要投递
    Fire(Alert),
    // 指标正常
    Normal { ticker: String, buzz_score: f64 },
}

impl AlertDecision {
    pub fn is_fire(&self) -> bool {
        matches!(self, AlertDecision::Fire(_))
    }
}

/// 组装报警正文
pub(crate) fn compose(record: &HistoryRecord, buzz_score: f64, threshold: f64) -> Alert {
    let subject = format!("Buzz alert: {} social heat is abnormal", record.ticker);
    let mut body = format!(
        "Ticker: {}\nDate: {}\nPrice: ${:.2}\nBuzz score: {:.2} (threshold {:.2})\nMentions growth: {:.2}x\nSentiment: {:.2}",
        record.ticker,
        record.date,
        record.price,
        buzz_score,
        threshold,
        record.mentions_growth,
        record.sentiment_avg,
    );
    if record.source == crate::history::entity::DataSource::Synthetic {
        body.push_str("\n[simulated data]");
    }
    Alert {
        ticker: record.ticker.clone(),
        buzz_score,
        subject,
        body,
    }
}
