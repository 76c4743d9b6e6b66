use buzz_app::{bootstrap, logging, settings};
use tracing::info;

/// # Summary
/// 控制面板 HTTP 服务入口。
///
/// # Logic
/// 1. 加载配置并初始化日志。
/// 2. 组装看板状态并启动 API，收到 Ctrl-C 后退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = settings::load()?;
    let _guard = logging::init(&cfg.storage.log_dir())?;

    let state = bootstrap::dashboard_state(&cfg).await?;
    let bind_addr = cfg.server.bind_addr();

    tokio::select! {
        result = buzz_api::server::start_server(state, &bind_addr) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received. Exiting..."),
    }
    Ok(())
}
