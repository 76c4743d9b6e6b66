//! # `buzz-manager` - 应用服务层
//!
//! 把各端口组合为三个用例：采集 (`collector`)、报警检查 (`alert`)
//! 与控制面板 (`dashboard`)。编译期只依赖 `buzz-core` 中的接口，
//! 具体实现由 `buzz-app` 注入。

pub mod alert;
pub mod collector;
pub mod dashboard;
pub mod error;
