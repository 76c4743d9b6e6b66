//! # 历史看板路由控制器
//!
//! 实现 `/api/v1/tickers` 与 `/api/v1/history/{ticker}` 两个只读接口。
//! 每次请求都重新读取历史表，不做缓存。

use axum::Json;
use axum::extract::{Path, Query, State};
use buzz_core::score::BuzzWeights;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, DashboardResponse, WeightsQuery};

/// 列出历史表中出现过的股票代码
#[utoipa::path(
    get,
    path = "/api/v1/tickers",
    tag = "看板 (Dashboard)",
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<Vec<String>>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn list_tickers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let tickers = state.dashboard.tickers().await?;
    Ok(Json(ApiResponse::ok(tickers)))
}

/// 获取单只股票的热度看板
///
/// 热度分按查询参数中的权重重新计算；未提供的权重使用服务端默认值。
/// 未知股票返回空看板而非 404。
#[utoipa::path(
    get,
    path = "/api/v1/history/{ticker}",
    tag = "看板 (Dashboard)",
    params(
        ("ticker" = String, Path, description = "股票代码"),
        WeightsQuery
    ),
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<DashboardResponse>),
        (status = 400, description = "权重非法"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<WeightsQuery>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let weights = BuzzWeights {
        vol_weight: query.vol_weight.unwrap_or(state.default_weights.vol_weight),
        sent_weight: query.sent_weight.unwrap_or(state.default_weights.sent_weight),
    };
    if !weights.vol_weight.is_finite() || !weights.sent_weight.is_finite() {
        return Err(ApiError::BadRequest("weights must be finite numbers".to_string()));
    }

    let view = state.dashboard.view(&ticker, weights).await?;
    Ok(Json(ApiResponse::ok(view.into())))
}
