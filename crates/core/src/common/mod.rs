pub mod time;
pub mod tls;

/// # Summary
/// 将浮点数四舍五入到小数点后两位（远离零方向）。
///
/// # Arguments
/// * `value`: 原始数值。
///
/// # Returns
/// 保留两位小数的数值。
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// # Summary
/// 规范化股票代码。
///
/// # Logic
/// 1. 去除首尾空白与引号。
/// 2. 统一转为大写。
/// 3. 空字符串视为无效。
///
/// # Arguments
/// * `raw`: 用户输入或文件中的原始代码。
///
/// # Returns
/// 合法时返回 `Some(代码)`，否则返回 `None`。
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let symbol = raw.trim().trim_matches('"').trim().to_uppercase();
    if symbol.is_empty() || symbol.chars().any(char::is_whitespace) {
        return None;
    }
    Some(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.899_999_9), 0.9);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(-0.456), -0.46);
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker(" nvda "), Some("NVDA".to_string()));
        assert_eq!(normalize_ticker("\"tsla\""), Some("TSLA".to_string()));
        assert_eq!(normalize_ticker("   "), None);
        assert_eq!(normalize_ticker("BRK B"), None);
    }
}
