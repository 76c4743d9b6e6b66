use axum::Json;
use axum::extract::State;
use buzz_core::alert::entity::AlertConfig;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::ApiResponse;

/// 修改报警规则
///
/// 校验后以 4 空格缩进 JSON 提交到远端仓库的 `data/config.json`。
#[utoipa::path(
    put,
    path = "/api/v1/alert-config",
    tag = "配置 (Settings)",
    request_body = AlertConfig,
    responses(
        (status = 200, description = "同步成功", body = ApiResponse<AlertConfig>),
        (status = 400, description = "阈值或收件人非法"),
        (status = 502, description = "远端仓库拒绝写入"),
        (status = 503, description = "未配置远端同步")
    )
)]
pub async fn update_alert_config(
    State(state): State<AppState>,
    Json(config): Json<AlertConfig>,
) -> Result<Json<ApiResponse<AlertConfig>>, ApiError> {
    state.dashboard.save_alert_config(&config).await?;
    Ok(Json(ApiResponse::ok(config)))
}
