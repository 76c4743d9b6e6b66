//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 组装依赖后调用。

use std::sync::Arc;

use axum::Router;
use buzz_core::score::BuzzWeights;
use buzz_manager::dashboard::DashboardService;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::{alert, history, targets};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
#[derive(Clone)]
pub struct AppState {
    /// 看板服务 (Facade)
    pub dashboard: Arc<DashboardService>,
    /// 查询参数缺省时使用的热度分权重
    pub default_weights: BuzzWeights,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Buzz Monitor API",
        version = "0.1.0",
        description = "股票社交热度监控的控制面板 API：历史热度查询、目标清单与报警规则维护。",
        license(name = "MIT")
    ),
    tags(
        (name = "看板 (Dashboard)", description = "历史热度与价格查询"),
        (name = "配置 (Settings)", description = "目标清单与报警规则，修改后同步到远端仓库")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树（含 Swagger UI 与 CORS）。
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(history::list_tickers))
        .routes(routes!(history::get_history))
        .routes(routes!(targets::upload_targets))
        .routes(routes!(alert::update_alert_config))
        .with_state(state)
        .split_for_parts();

    // 控制面板无鉴权，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 在已绑定的监听器上提供服务，直到进程退出。
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state)).await
}

/// 绑定地址并启动 HTTP 服务。
///
/// # Arguments
/// * `state` - 由 `crates/app` 组装的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Buzz dashboard API listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await?;
    Ok(())
}
