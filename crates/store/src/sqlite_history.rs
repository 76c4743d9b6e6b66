use async_trait::async_trait;
use buzz_core::history::entity::{DataSource, HistoryRecord};
use buzz_core::history::error::StoreError;
use buzz_core::history::merge::MergeStats;
use buzz_core::history::port::HistoryStore;
use chrono::NaiveDate;
use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 日期列的存储格式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 无法打开的数据库文件被移走时追加的后缀
const CORRUPT_SUFFIX: &str = ".corrupt";

/// HistoryStore 的 SQLite 实现。
///
/// # Summary
/// 以 `(date, ticker)` 为主键的单表，用 `ON CONFLICT DO UPDATE` 实现原位替换。
///
/// # Invariants
/// * 表结构在存储实例创建时初始化。
/// * 替换不改变 rowid，读取时按 rowid 返回写入顺序。
/// * 无法打开的数据库被移到 `*.corrupt` 后重建；无法解码的行在读取时跳过。
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// 打开（或创建）数据库并初始化表结构。
    ///
    /// # Logic
    /// 1. 确保父目录存在。
    /// 2. 连接并执行 DDL。
    /// 3. 若已有文件无法打开，将其移到 `*.corrupt` 并以空库重建。
    ///
    /// # Arguments
    /// * `db_path` - 数据库文件路径。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或数据库错误。
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        match connect(&db_path).await {
            Ok(pool) => Ok(Self { pool }),
            Err(e) if db_path.exists() => {
                let moved = quarantine(&db_path)?;
                warn!(
                    "History database {} is unreadable ({}), moved to {} and starting empty",
                    db_path.display(),
                    e,
                    moved.display()
                );
                Ok(Self {
                    pool: connect(&db_path).await?,
                })
            }
            Err(e) => Err(e),
        }
    }
}

async fn connect(db_path: &Path) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

    let ddl = sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            date TEXT NOT NULL,
            ticker TEXT NOT NULL,
            price REAL NOT NULL,
            mentions INTEGER NOT NULL,
            sentiment_avg REAL NOT NULL,
            mentions_growth REAL NOT NULL,
            buzz_score REAL NOT NULL DEFAULT 0,
            source TEXT NOT NULL DEFAULT 'real',
            PRIMARY KEY (date, ticker)
        );
        "#,
    )
    .execute(&pool)
    .await;

    match ddl {
        Ok(_) => Ok(pool),
        Err(e) => {
            pool.close().await;
            Err(StoreError::Database(e.to_string()))
        }
    }
}

/// 在原路径后追加后缀，得到同目录下的兄弟文件
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// # Summary
/// 将损坏的数据库文件移走，并清理残留的 WAL/SHM 文件。
///
/// # Returns
/// 移动后的文件路径。
fn quarantine(db_path: &Path) -> Result<PathBuf, StoreError> {
    let moved = sibling(db_path, CORRUPT_SUFFIX);
    std::fs::rename(db_path, &moved).map_err(|e| StoreError::Io(e.to_string()))?;
    for suffix in ["-wal", "-shm"] {
        match std::fs::remove_file(sibling(db_path, suffix)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::Io(e.to_string())),
        }
    }
    Ok(moved)
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get::<T, _>(name)
        .map_err(|e| StoreError::Corrupt(format!("column {}: {}", name, e)))
}

fn from_row(row: &SqliteRow) -> Result<HistoryRecord, StoreError> {
    let date: String = column(row, "date")?;
    let mentions: i64 = column(row, "mentions")?;
    let source: String = column(row, "source")?;
    Ok(HistoryRecord {
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| StoreError::Corrupt(format!("bad date '{}': {}", date, e)))?,
        ticker: column(row, "ticker")?,
        price: column(row, "price")?,
        mentions: u64::try_from(mentions)
            .map_err(|_| StoreError::Corrupt(format!("negative mentions {}", mentions)))?,
        sentiment_avg: column(row, "sentiment_avg")?,
        mentions_growth: column(row, "mentions_growth")?,
        buzz_score: column(row, "buzz_score")?,
        source: source.parse::<DataSource>().map_err(StoreError::Corrupt)?,
    })
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    /// # Summary
    /// 按写入顺序读取全表。
    ///
    /// # Logic
    /// 1. 查询失败时视为空表并告警。
    /// 2. 无法解码的行逐条跳过并告警。
    async fn load_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let rows = match sqlx::query(
            "SELECT date, ticker, price, mentions, sentiment_avg, mentions_growth, buzz_score, source FROM history ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("History table is unreadable ({}), treating as empty", e);
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            match from_row(row) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping undecodable history row: {}", e),
            }
        }
        Ok(records)
    }

    /// # Summary
    /// 在单个事务内逐条 upsert。
    ///
    /// # Logic
    /// 1. 查询键是否存在，用于统计新增/替换。
    /// 2. 执行 `INSERT ... ON CONFLICT(date, ticker) DO UPDATE`。
    /// 3. 提交事务。
    async fn upsert_batch(&self, records: Vec<HistoryRecord>) -> Result<MergeStats, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let mut stats = MergeStats::default();

        for record in records {
            let date = record.date.format(DATE_FORMAT).to_string();
            let mentions = i64::try_from(record.mentions)
                .map_err(|_| StoreError::Serialize(format!("mentions overflow: {}", record.mentions)))?;

            let existing = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM history WHERE date = ? AND ticker = ?",
            )
            .bind(&date)
            .bind(&record.ticker)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO history (date, ticker, price, mentions, sentiment_avg, mentions_growth, buzz_score, source)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(date, ticker) DO UPDATE SET
                    price = excluded.price,
                    mentions = excluded.mentions,
                    sentiment_avg = excluded.sentiment_avg,
                    mentions_growth = excluded.mentions_growth,
                    buzz_score = excluded.buzz_score,
                    source = excluded.source
                "#,
            )
            .bind(&date)
            .bind(&record.ticker)
            .bind(record.price)
            .bind(mentions)
            .bind(record.sentiment_avg)
            .bind(record.mentions_growth)
            .bind(record.buzz_score)
            .bind(record.source.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

            if existing > 0 {
                stats.replaced += 1;
            } else {
                stats.inserted += 1;
            }
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ticker: &str, price: f64) -> HistoryRecord {
        HistoryRecord {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ticker: ticker.to_string(),
            price,
            mentions: 10,
            sentiment_avg: 0.5,
            mentions_growth: 1.0,
            buzz_score: 0.7,
            source: DataSource::Real,
        }
    }

    #[tokio::test]
    async fn test_undecodable_rows_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SqliteHistoryStore::open(tmp.path().join("history.db")).await.unwrap();
        store.upsert(record("NVDA", 190.0)).await.unwrap();

        sqlx::query(
            "INSERT INTO history (date, ticker, price, mentions, sentiment_avg, mentions_growth) VALUES ('garbage', 'AAPL', 1.0, 1, 0.5, 1.0)",
        )
        .execute(&store.pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO history (date, ticker, price, mentions, sentiment_avg, mentions_growth) VALUES ('2026-03-01', 'TSLA', 1.0, -4, 0.5, 1.0)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let rows = store.load_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "NVDA");
    }

    #[test]
    fn test_sibling_appends_suffix() {
        let path = Path::new("/data/history.db");
        assert_eq!(sibling(path, ".corrupt"), PathBuf::from("/data/history.db.corrupt"));
        assert_eq!(sibling(path, "-wal"), PathBuf::from("/data/history.db-wal"));
    }
}
