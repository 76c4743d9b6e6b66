use chrono::{Local, NaiveDate};
use std::sync::RwLock;

/// # Summary
/// 日期供给器接口，隔离系统时钟。
/// 采集器通过此接口决定当日记录的日期键。
pub trait TimeProvider: Send + Sync {
    /// 获取当前日历日
    fn today(&self) -> NaiveDate;
}

/// # Summary
/// 真实时钟，返回本地时区的当前日期。
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// # Summary
/// 测试专用的虚拟时钟，允许手动拨动日期。
///
/// # Invariants
/// - 并发安全：内部利用 `RwLock` 保护当前日期。
pub struct FakeClockProvider {
    current_date: RwLock<NaiveDate>,
}

impl FakeClockProvider {
    /// 使用指定的初始日期创建虚拟时钟
    pub fn new(initial_date: NaiveDate) -> Self {
        Self {
            current_date: RwLock::new(initial_date),
        }
    }

    /// 强制修改时钟的当前日期
    pub fn set_date(&self, new_date: NaiveDate) {
        let mut date = self
            .current_date
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *date = new_date;
    }
}

impl TimeProvider for FakeClockProvider {
    fn today(&self) -> NaiveDate {
        *self
            .current_date
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
