use async_trait::async_trait;
use buzz_core::history::entity::HistoryRecord;
use buzz_core::history::error::StoreError;
use buzz_core::history::merge::{self, MergeStats};
use buzz_core::history::port::HistoryStore;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// HistoryStore 的平面 CSV 实现。
///
/// # Summary
/// 整张历史表保存在单个 CSV 文件中，每批写入后整体覆盖。
///
/// # Invariants
/// * 列顺序：`date,ticker,price,mentions,sentiment_avg,mentions_growth,buzz_score,source`。
/// * 缺少 `buzz_score` / `source` 列的旧文件可以正常读取。
/// * 文件损坏时视为空表并记录告警，下一次写入会重建文件。
/// * 同一进程内的写入通过互斥锁串行化；跨进程不加锁。
pub struct CsvHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvHistoryStore {
    /// 创建 CsvHistoryStore。
    ///
    /// # Logic
    /// 1. 确保父目录存在（文件本身在首次写入时创建）。
    ///
    /// # Arguments
    /// * `path` - CSV 文件路径。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 目录无法创建时返回 `Io`。
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_rows(&path))
            .await
            .map_err(|e| StoreError::Io(format!("read task failed: {}", e)))
    }
}

/// 读取全部行；缺失、为空或损坏时返回空表
fn read_rows(path: &Path) -> Vec<HistoryRecord> {
    let is_empty = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    if is_empty {
        info!("History file {} missing or empty, starting fresh", path.display());
        return Vec::new();
    }

    match parse_rows(path) {
        Ok(rows) => merge::dedup_last_wins(rows),
        Err(e) => {
            warn!(
                "History file {} is unreadable ({}), treating as empty; it will be rebuilt on next write",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

fn parse_rows(path: &Path) -> Result<Vec<HistoryRecord>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| StoreError::Io(e.to_string()))?;

    reader
        .deserialize::<HistoryRecord>()
        .map(|row| row.map_err(|e| StoreError::Corrupt(e.to_string())))
        .collect()
}

/// 先写临时文件再重命名，避免写到一半留下残缺文件
fn write_rows(path: &Path, rows: &[HistoryRecord]) -> Result<(), StoreError> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp).map_err(|e| StoreError::Io(e.to_string()))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| StoreError::Serialize(e.to_string()))?;
        }
        writer.flush().map_err(|e| StoreError::Io(e.to_string()))?;
    }
    fs::rename(&tmp, path).map_err(|e| StoreError::Io(e.to_string()))
}

#[async_trait]
impl HistoryStore for CsvHistoryStore {
    async fn load_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        self.read().await
    }

    /// # Summary
    /// 批量 upsert 并整体覆盖写回。
    ///
    /// # Logic
    /// 1. 获取进程内写锁。
    /// 2. 读取现有表（损坏则为空表）。
    /// 3. 调用纯合并逻辑。
    /// 4. 写回文件。
    async fn upsert_batch(&self, records: Vec<HistoryRecord>) -> Result<MergeStats, StoreError> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let mut rows = read_rows(&path);
            let stats = merge::merge_batch(&mut rows, records);
            write_rows(&path, &rows)?;
            info!(
                "History saved to {} ({} rows, {} inserted, {} replaced)",
                path.display(),
                rows.len(),
                stats.inserted,
                stats.replaced
            );
            Ok(stats)
        })
        .await
        .map_err(|e| StoreError::Io(format!("write task failed: {}", e)))?
    }
}
