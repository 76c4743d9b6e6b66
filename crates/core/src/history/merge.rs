//! 历史表的合并逻辑，与任何存储介质无关。

use super::entity::{HistoryRecord, RecordKey};
use std::collections::HashMap;

/// # Summary
/// 单次 upsert 的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    // 新键，追加到末尾
    Inserted,
    // 已存在的键，原位替换
    Replaced,
}

/// # Summary
/// 批量合并的统计信息，用于日志输出。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub replaced: usize,
}

/// # Summary
/// 将单条记录写入内存表。
///
/// # Logic
/// 1. 查找相同 `(date, ticker)` 的记录。
/// 2. 找到则原位替换全部字段，否则追加。
///
/// # Arguments
/// * `records`: 内存中的历史表。
/// * `record`: 待写入记录。
///
/// # Returns
/// 写入结果 `UpsertOutcome`。
pub fn upsert_into(records: &mut Vec<HistoryRecord>, record: HistoryRecord) -> UpsertOutcome {
    match records.iter_mut().find(|existing| existing.same_key(&record)) {
        Some(existing) => {
            *existing = record;
            UpsertOutcome::Replaced
        }
        None => {
            records.push(record);
            UpsertOutcome::Inserted
        }
    }
}

/// # Summary
/// 按顺序把一批记录合并进内存表。
///
/// # Logic
/// 1. 先执行 `dedup_last_wins`，清理历史文件中可能残留的重复行。
/// 2. 逐条调用 `upsert_into`，同批内的重复键以后写入者为准。
///
/// # Arguments
/// * `records`: 内存中的历史表。
/// * `batch`: 本次写入的记录。
///
/// # Returns
/// 新增与替换的计数。
pub fn merge_batch(records: &mut Vec<HistoryRecord>, batch: Vec<HistoryRecord>) -> MergeStats {
    let mut merged = dedup_last_wins(std::mem::take(records));
    let mut stats = MergeStats::default();
    for record in batch {
        match upsert_into(&mut merged, record) {
            UpsertOutcome::Inserted => stats.inserted += 1,
            UpsertOutcome::Replaced => stats.replaced += 1,
        }
    }
    *records = merged;
    stats
}

/// # Summary
/// 消除重复键，保留最后写入的值。
///
/// # Logic
/// 1. 记录每个键首次出现的位置。
/// 2. 后续重复行覆盖该位置的值，行本身被丢弃。
///
/// # Arguments
/// * `records`: 可能含重复键的记录序列（按写入顺序）。
///
/// # Returns
/// 每个键仅一行的记录序列，保持首次出现的顺序。
pub fn dedup_last_wins(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let mut index: HashMap<RecordKey, usize> = HashMap::with_capacity(records.len());
    let mut result: Vec<HistoryRecord> = Vec::with_capacity(records.len());

    for record in records {
        match index.get(&record.key()) {
            Some(&pos) => result[pos] = record,
            None => {
                index.insert(record.key(), result.len());
                result.push(record);
            }
        }
    }
    result
}

/// # Summary
/// 取出指定股票的全部记录，按日期升序排列。
pub fn for_ticker(records: &[HistoryRecord], ticker: &str) -> Vec<HistoryRecord> {
    let mut rows: Vec<HistoryRecord> = records
        .iter()
        .filter(|r| r.ticker.eq_ignore_ascii_case(ticker))
        .cloned()
        .collect();
    rows.sort_by_key(|r| r.date);
    rows
}

/// # Summary
/// 取出每只股票日期最新的一条记录。
///
/// # Logic
/// 1. 以股票首次出现的顺序输出。
/// 2. 日期相同时以后出现的记录为准。
pub fn latest_per_ticker(records: &[HistoryRecord]) -> Vec<HistoryRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<HistoryRecord> = Vec::new();

    for record in records {
        match index.get(record.ticker.as_str()) {
            Some(&pos) => {
                if record.date >= latest[pos].date {
                    latest[pos] = record.clone();
                }
            }
            None => {
                index.insert(record.ticker.as_str(), latest.len());
                latest.push(record.clone());
            }
        }
    }
    latest
}

/// # Summary
/// 历史表中出现过的股票代码（按首次出现顺序，去重）。
pub fn tickers(records: &[HistoryRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.iter().any(|t| t == &record.ticker) {
            seen.push(record.ticker.clone());
        }
    }
    seen
}
