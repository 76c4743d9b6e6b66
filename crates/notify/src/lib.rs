//! # `buzz-notify` - 通知适配器
//!
//! 目前只有 SMTP 邮件一种投递方式。

pub mod email;
