use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, TargetsResponse, UploadTargetsRequest};

/// 上传新的目标清单
///
/// 解析上传文本（可带 `Ticker`/`Symbol` 表头），规范化去重后提交到远端仓库的
/// `data/targets.csv`，下一次定时采集生效。
#[utoipa::path(
    post,
    path = "/api/v1/targets",
    tag = "配置 (Settings)",
    request_body = UploadTargetsRequest,
    responses(
        (status = 200, description = "同步成功", body = ApiResponse<TargetsResponse>),
        (status = 400, description = "清单为空"),
        (status = 502, description = "远端仓库拒绝写入"),
        (status = 503, description = "未配置远端同步")
    )
)]
pub async fn upload_targets(
    State(state): State<AppState>,
    Json(req): Json<UploadTargetsRequest>,
) -> Result<Json<ApiResponse<TargetsResponse>>, ApiError> {
    let list = state.dashboard.upload_targets(&req.content).await?;
    Ok(Json(ApiResponse::ok(TargetsResponse {
        tickers: list.tickers().to_vec(),
    })))
}
