//! # `buzz-core` - 领域核心
//!
//! 定义热度监控系统的实体、端口 (Port) 与纯函数逻辑。
//! 本 crate 不做任何 I/O，所有外部协作者均以 `async_trait` 接口形式出现，
//! 具体实现位于 `buzz-feed` / `buzz-store` / `buzz-notify` / `buzz-sync`。

pub mod alert;
pub mod common;
pub mod config;
pub mod history;
pub mod market;
pub mod news;
pub mod notify;
pub mod score;
pub mod sentiment;
pub mod sync;
pub mod targets;

#[cfg(feature = "test-utils")]
pub mod testing;
