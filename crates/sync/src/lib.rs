//! # `buzz-sync` - 远端配置同步
//!
//! 把控制面板修改的目标清单与报警规则提交回 GitHub 仓库，
//! 供下一次定时采集/检查读取。

pub mod github;
