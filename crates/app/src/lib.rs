//! # `buzz-app` - 进程入口与依赖组装
//!
//! 三个二进制共享的启动逻辑：
//! - `settings`: 从 `buzz.toml` 与环境变量构建 `AppConfig`。
//! - `logging`: 控制台 + 按日滚动文件日志。
//! - `bootstrap`: 按配置实例化具体实现并注入服务层。

pub mod bootstrap;
pub mod error;
pub mod logging;
pub mod settings;
