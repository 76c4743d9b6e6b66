use async_trait::async_trait;
use buzz_core::history::error::StoreError;
use buzz_core::targets::entity::TargetList;
use buzz_core::targets::port::TargetStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// TargetStore 的单列 CSV 实现 (`Ticker` 表头)。
///
/// # Invariants
/// * 文件缺失、不可读或没有任何有效代码时回退到默认清单。
pub struct CsvTargetStore {
    path: PathBuf,
}

impl CsvTargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TargetStore for CsvTargetStore {
    async fn load(&self) -> Result<TargetList, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No target list at {}, using defaults", self.path.display());
                return Ok(TargetList::default());
            }
            Err(e) => {
                warn!("Target list {} unreadable ({}), using defaults", self.path.display(), e);
                return Ok(TargetList::default());
            }
        };

        let list = TargetList::parse_upload(&text);
        if list.is_empty() {
            warn!("Target list {} has no tickers, using defaults", self.path.display());
            return Ok(TargetList::default());
        }
        Ok(list)
    }
}
