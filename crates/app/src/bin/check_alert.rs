use buzz_app::{bootstrap, logging, settings};
use tracing::info;

/// # Summary
/// 报警检查入口，通常紧跟在采集之后运行。
///
/// # Logic
/// 1. 加载配置并初始化日志。
/// 2. 检查每只股票的最新记录，越过阈值时发送邮件。
/// 3. 缺少邮箱配置时以错误退出。
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = settings::load()?;
    let _guard = logging::init(&cfg.storage.log_dir())?;

    let service = bootstrap::alert_service(&cfg).await?;
    let report = service.run().await?;

    info!(
        "Alert check finished: {} checked, {} delivered, {} failed",
        report.decisions.len(),
        report.delivered,
        report.failed
    );
    Ok(())
}
