//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use buzz_manager::error::ManagerError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 服务端缺少执行该操作所需的配置 (503)
    #[error("Service not configured: {0}")]
    NotConfigured(String),

    /// 远端仓库拒绝或无法访问 (502)
    #[error("Remote sync failed: {0}")]
    BadGateway(String),

    /// 下层业务错误 (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotConfigured(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::BadGateway(msg) => {
                tracing::warn!("Remote sync failed: {}", msg);
                (StatusCode::BAD_GATEWAY, format!("Sync failed: {}", msg))
            }
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `ManagerError` 转换
impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::BadRequest(msg) => ApiError::BadRequest(msg),
            ManagerError::Config(msg) => ApiError::NotConfigured(msg),
            ManagerError::Sync(e) => ApiError::BadGateway(e.to_string()),
            ManagerError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}
