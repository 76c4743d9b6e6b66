//! # `buzz-api` - 控制面板 HTTP API
//!
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 查询历史表中的股票列表与单只股票的热度曲线（权重可由查询参数调整）
//! - 接收目标清单上传与报警规则修改，并经由 `DashboardService` 同步到远端仓库
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
