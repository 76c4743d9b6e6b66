use thiserror::Error;

/// # Summary
/// 存储层错误枚举，处理文件与数据库的读写失败。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 文件系统读写失败
    #[error("IO error: {0}")]
    Io(String),
    /// 数据库操作失败
    #[error("Database error: {0}")]
    Database(String),
    /// 文件内容无法解析
    #[error("Corrupt data: {0}")]
    Corrupt(String),
    /// 序列化失败
    #[error("Serialize error: {0}")]
    Serialize(String),
}
