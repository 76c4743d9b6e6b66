//! # 路由控制器
//!
//! - `history`: 股票列表与单只股票的热度看板。
//! - `targets`: 目标清单上传。
//! - `alert`: 报警规则修改。

pub mod alert;
pub mod history;
pub mod targets;
