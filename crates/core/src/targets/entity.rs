use crate::common::normalize_ticker;
use serde::{Deserialize, Serialize};

/// 目标清单缺失时使用的默认股票
pub const DEFAULT_TARGETS: [&str; 3] = ["NVDA", "AAPL", "TSLA"];
/// 清单文件表头
pub const TARGETS_HEADER: &str = "Ticker";

/// # Summary
/// 采集器需要处理的股票清单。
///
/// # Invariants
/// - 代码已规范化（大写、去空白）且不重复，保持输入顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetList {
    tickers: Vec<String>,
}

impl Default for TargetList {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl TargetList {
    /// # Summary
    /// 由任意代码序列构建清单。
    ///
    /// # Logic
    /// 1. 规范化每个代码，丢弃非法项。
    /// 2. 按首次出现顺序去重。
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tickers: Vec<String> = Vec::new();
        for symbol in raw.into_iter().filter_map(|s| normalize_ticker(s.as_ref())) {
            if !tickers.contains(&symbol) {
                tickers.push(symbol);
            }
        }
        Self { tickers }
    }

    /// # Summary
    /// 解析用户上传的清单文本。
    ///
    /// # Logic
    /// 1. 支持换行、逗号、分号分隔。
    /// 2. 忽略 `Ticker` / `Symbol` 表头（不区分大小写）。
    /// 3. 多列 CSV 只取每行第一列。
    ///
    /// # Arguments
    /// * `text`: 上传文件的完整文本。
    ///
    /// # Returns
    /// 解析得到的清单（可能为空）。
    pub fn parse_upload(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim().trim_start_matches('\u{feff}'))
            .filter(|l| !l.is_empty())
            .collect();

        // 首行为带表头的多列 CSV 时，只取每行第一列
        let table_mode = lines
            .first()
            .map(|header| header.contains(',') && header.split(',').next().is_some_and(is_header))
            .unwrap_or(false);

        let cells: Vec<&str> = if table_mode {
            lines.iter().filter_map(|l| l.split(',').next()).collect()
        } else {
            lines.iter().flat_map(|l| l.split([',', ';'])).collect()
        };
        Self::new(cells.into_iter().filter(|c| !is_header(c)))
    }

    /// 渲染为单列 CSV：`Ticker\n...`
    pub fn to_csv(&self) -> String {
        let mut out = String::from(TARGETS_HEADER);
        for ticker in &self.tickers {
            out.push('\n');
            out.push_str(ticker);
        }
        out
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }
}

fn is_header(cell: &str) -> bool {
    let cell = cell.trim().trim_matches('"');
    cell.eq_ignore_ascii_case("ticker") || cell.eq_ignore_ascii_case("symbol")
}
