//! # `buzz-feed` - 外部数据源适配器
//!
//! 报价 (Yahoo Finance)、新闻 (NewsAPI)、词典情绪模型 (VADER) 与模拟数据生成器。

pub mod newsapi;
pub mod synthetic;
pub mod vader;
pub mod yahoo;
