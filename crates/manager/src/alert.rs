use crate::error::ManagerError;
use buzz_core::alert::entity::AlertDecision;
use buzz_core::alert::port::AlertConfigStore;
use buzz_core::alert::rule;
use buzz_core::history::port::HistoryStore;
use buzz_core::notify::port::Notifier;
use buzz_core::score::BuzzWeights;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 进程配置中的报警默认值，`config.json` 存在时被其覆盖
#[derive(Debug, Clone)]
pub struct AlertDefaults {
    pub threshold: f64,
    pub receiver_email: Option<String>,
    pub weights: BuzzWeights,
}

/// 一次检查的结果
#[derive(Debug, Clone, Default)]
pub struct AlertReport {
    pub decisions: Vec<AlertDecision>,
    pub delivered: usize,
    pub failed: usize,
}

/// # Summary
/// 报警检查服务。
///
/// # Invariants
/// - 每只股票只看日期最新的一条记录。
/// - 投递失败只记录日志，不重试，也不向上返回错误。
pub struct AlertService {
    history: Arc<dyn HistoryStore>,
    // 未配置邮箱账号时为 None
    notifier: Option<Arc<dyn Notifier>>,
    rules: Arc<dyn AlertConfigStore>,
    defaults: AlertDefaults,
}

impl AlertService {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        notifier: Option<Arc<dyn Notifier>>,
        rules: Arc<dyn AlertConfigStore>,
        defaults: AlertDefaults,
    ) -> Self {
        Self {
            history,
            notifier,
            rules,
            defaults,
        }
    }

    /// # Summary
    /// 读取生效的阈值与收件人。
    ///
    /// # Logic
    /// 1. 本地 `config.json` 可读且通过校验时以其为准。
    /// 2. 文件缺失、损坏或校验失败时回退到进程配置（后两者记告警）。
    async fn effective_rule(&self) -> (f64, Option<String>) {
        let defaults = (self.defaults.threshold, self.defaults.receiver_email.clone());
        match self.rules.load().await {
            Ok(Some(cfg)) => match cfg.validate() {
                Ok(()) => (cfg.alert_threshold, Some(cfg.receiver_email.trim().to_string())),
                Err(reason) => {
                    warn!("Alert config rejected ({}), using process defaults", reason);
                    defaults
                }
            },
            Ok(None) => defaults,
            Err(e) => {
                warn!("Alert config unreadable ({}), using process defaults", e);
                defaults
            }
        }
    }

    /// # Summary
    /// 执行一次报警检查。
    ///
    /// # Logic
    /// 1. 读取每只股票的最新记录，历史为空时直接返回。
    /// 2. 确认邮箱账号与收件人已配置，否则返回 `Config` 错误。
    /// 3. 逐只判定，触发时投递邮件。
    ///
    /// # Returns
    /// 所有判定结果与投递计数。
    pub async fn run(&self) -> Result<AlertReport, ManagerError> {
        let latest = self.history.latest_per_ticker().await?;
        if latest.is_empty() {
            info!("History is empty, nothing to check");
            return Ok(AlertReport::default());
        }

        let (threshold, receiver) = self.effective_rule().await;
        let notifier = self
            .notifier
            .as_ref()
            .ok_or_else(|| ManagerError::Config("EMAIL_USER / EMAIL_PASS are not set".to_string()))?;
        let receiver = receiver
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| ManagerError::Config("RECEIVER_EMAIL is not set".to_string()))?;

        let mut report = AlertReport::default();
        for record in &latest {
            let decision = rule::evaluate(record, threshold, &self.defaults.weights);
            match &decision {
                AlertDecision::Fire(alert) => {
                    info!(
                        "{} buzz {:.2} exceeds threshold {:.2}, sending alert",
                        alert.ticker, alert.buzz_score, threshold
                    );
                    match notifier.notify(&receiver, &alert.subject, &alert.body).await {
                        Ok(()) => report.delivered += 1,
                        Err(e) => {
                            error!("Failed to deliver alert for {}: {}", alert.ticker, e);
                            report.failed += 1;
                        }
                    }
                }
                AlertDecision::Normal { ticker, buzz_score } => {
                    info!("{} metrics within normal range (buzz {:.2})", ticker, buzz_score);
                }
            }
            report.decisions.push(decision);
        }

        Ok(report)
    }
}
