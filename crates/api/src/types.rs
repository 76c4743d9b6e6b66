//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use buzz_manager::dashboard::{DashboardView, Deltas, ScoredRow};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================
//  历史看板 DTO
// ============================================================

/// 单日历史行 DTO，`buzz_score` 为按请求权重重新计算的值
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryRowResponse {
    /// 日期 (YYYY-MM-DD)
    #[schema(example = "2026-03-01")]
    pub date: String,
    #[schema(example = "NVDA")]
    pub ticker: String,
    #[schema(example = 185.0)]
    pub price: f64,
    #[schema(example = 1200)]
    pub mentions: u64,
    #[schema(example = 0.63)]
    pub sentiment_avg: f64,
    #[schema(example = 1.12)]
    pub mentions_growth: f64,
    #[schema(example = 0.82)]
    pub buzz_score: f64,
    /// 数据来源 (real / synthetic)
    #[schema(example = "real")]
    pub source: String,
}

impl From<ScoredRow> for HistoryRowResponse {
    fn from(row: ScoredRow) -> Self {
        let r = row.record;
        Self {
            date: r.date.to_string(),
            ticker: r.ticker,
            price: r.price,
            mentions: r.mentions,
            sentiment_avg: r.sentiment_avg,
            mentions_growth: r.mentions_growth,
            buzz_score: row.buzz,
            source: r.source.to_string(),
        }
    }
}

/// 最新一天相对前一天的变化
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeltasResponse {
    #[schema(example = 0.14)]
    pub buzz: f64,
    #[schema(example = 5.0)]
    pub price: f64,
    #[schema(example = 300)]
    pub mentions: i64,
}

impl From<Deltas> for DeltasResponse {
    fn from(d: Deltas) -> Self {
        Self {
            buzz: d.buzz,
            price: d.price,
            mentions: d.mentions,
        }
    }
}

/// 单只股票看板 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = "NVDA")]
    pub ticker: String,
    /// 本次使用的提及增长权重
    #[schema(example = 0.7)]
    pub vol_weight: f64,
    /// 本次使用的情绪权重
    #[schema(example = 0.3)]
    pub sent_weight: f64,
    /// 按日期升序
    pub rows: Vec<HistoryRowResponse>,
    /// 最新一行；无数据时为 null
    pub latest: Option<HistoryRowResponse>,
    /// 少于两行时为 null
    pub deltas: Option<DeltasResponse>,
}

impl From<DashboardView> for DashboardResponse {
    fn from(view: DashboardView) -> Self {
        Self {
            ticker: view.ticker,
            vol_weight: view.weights.vol_weight,
            sent_weight: view.weights.sent_weight,
            rows: view.rows.into_iter().map(Into::into).collect(),
            latest: view.latest.map(Into::into),
            deltas: view.deltas.map(Into::into),
        }
    }
}

/// 看板查询参数，缺省时使用服务端默认权重
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeightsQuery {
    /// 提及增长权重
    pub vol_weight: Option<f64>,
    /// 情绪权重
    pub sent_weight: Option<f64>,
}

// ============================================================
//  目标清单 DTO
// ============================================================

/// 目标清单上传请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadTargetsRequest {
    /// 上传文件的完整文本 (CSV 或换行/逗号分隔)
    #[schema(example = "Ticker\nNVDA\nAMD")]
    pub content: String,
}

/// 已同步的目标清单
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TargetsResponse {
    #[schema(example = json!(["NVDA", "AMD"]))]
    pub tickers: Vec<String>,
}

// ============================================================
//  通用响应包装
// ============================================================

/// 统一成功响应包装
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
