use buzz_app::{bootstrap, logging, settings};
use tracing::info;

/// # Summary
/// 每日采集入口，由定时任务调用一次后退出。
///
/// # Logic
/// 1. 加载配置并初始化日志。
/// 2. 组装采集服务并执行一次完整采集。
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = settings::load()?;
    let _guard = logging::init(&cfg.storage.log_dir())?;
    info!("Buzz collector starting (data dir: {})", cfg.storage.data_dir.display());

    let collector = bootstrap::collector(&cfg).await?;
    let report = collector.run().await?;

    info!("Collected {} records", report.records.len());
    Ok(())
}
