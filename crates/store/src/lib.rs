//! # `buzz-store` - 持久化适配器
//!
//! - `csv_history`: 默认的平面 CSV 历史表。
//! - `sqlite_history`: 可选的 SQLite 历史表。
//! - `targets`: 单列 CSV 目标清单。
//! - `alert_config`: JSON 报警规则。

pub mod alert_config;
pub mod csv_history;
pub mod sqlite_history;
pub mod targets;

use buzz_core::config::{StorageConfig, StoreBackend};
use buzz_core::history::error::StoreError;
use buzz_core::history::port::HistoryStore;
use std::sync::Arc;

/// # Summary
/// 按配置打开历史表存储。
///
/// # Logic
/// 1. `csv` 后端：`{data_dir}/history.csv`。
/// 2. `sqlite` 后端：`{data_dir}/history.db`。
///
/// # Arguments
/// * `config`: 存储配置。
///
/// # Returns
/// 以 trait object 形式返回的存储实例。
pub async fn open_history_store(config: &StorageConfig) -> Result<Arc<dyn HistoryStore>, StoreError> {
    match config.backend {
        StoreBackend::Csv => Ok(Arc::new(csv_history::CsvHistoryStore::new(
            config.history_csv(),
        )?)),
        StoreBackend::Sqlite => Ok(Arc::new(
            sqlite_history::SqliteHistoryStore::open(config.history_db()).await?,
        )),
    }
}
