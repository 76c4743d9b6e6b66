use async_trait::async_trait;
use buzz_core::common::tls::install_crypto_provider;
use buzz_core::market::error::MarketError;
use buzz_core::market::port::QuoteProvider;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const CHART_ENDPOINT: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// # Summary
/// Yahoo Finance 报价提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，超时 10 秒。
#[derive(Clone)]
pub struct YahooQuoteProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 接口地址，测试时可替换
    endpoint: String,
}

impl YahooQuoteProvider {
    /// # Summary
    /// 创建一个新的 YahooQuoteProvider 实例。
    ///
    /// # Logic
    /// 1. 确保 rustls 加密后端已安装。
    /// 2. 配置 10 秒超时与浏览器 User-Agent 以减少被拦截风险。
    ///
    /// # Returns
    /// 成功返回 Provider，HTTP 客户端构建失败时返回 `MarketError::Network`。
    pub fn new() -> Result<Self, MarketError> {
        Self::with_endpoint(CHART_ENDPOINT)
    }

    /// 指定接口地址创建实例
    pub fn with_endpoint(endpoint: &str) -> Result<Self, MarketError> {
        install_crypto_provider();
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(BROWSER_UA)
            .build()
            .map_err(|e| MarketError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
pub(crate) struct YahooResponse {
    chart: YahooChart,
}

#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Deserialize, Debug)]
struct YahooError {
    description: String,
}

#[derive(Deserialize, Debug)]
struct YahooResult {
    meta: YahooMeta,
    indicators: Option<YahooIndicators>,
}

/// # Summary
/// 图表元数据，`regularMarketPrice` 即最新成交价。
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    regular_market_price: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Deserialize, Debug)]
struct YahooQuote {
    // 收盘价列表
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// # Summary
/// 从 chart 响应中提取最新价。
///
/// # Logic
/// 1. 数据源报错时返回 `Provider`。
/// 2. 优先取 `meta.regularMarketPrice`。
/// 3. 缺失时退回到最后一个非空收盘价。
pub(crate) fn extract_price(ticker: &str, resp: YahooResponse) -> Result<f64, MarketError> {
    if let Some(err) = resp.chart.error {
        return Err(MarketError::Provider(err.description));
    }

    let result = resp
        .chart
        .result
        .and_then(|mut r| r.pop())
        .ok_or_else(|| MarketError::NotFound(ticker.to_string()))?;

    if let Some(price) = result.meta.regular_market_price.filter(|p| p.is_finite()) {
        return Ok(price);
    }

    result
        .indicators
        .as_ref()
        .and_then(|ind| ind.quote.first())
        .and_then(|q| q.close.iter().rev().find_map(|c| *c))
        .ok_or_else(|| MarketError::NotFound(ticker.to_string()))
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取最新成交价。
    ///
    /// # Logic
    /// 1. 请求当日日线 chart 数据。
    /// 2. 非 2xx 状态码视为网络错误。
    /// 3. 解析 JSON 并提取最新价。
    async fn latest_price(&self, ticker: &str) -> Result<f64, MarketError> {
        let url = format!("{}/{}", self.endpoint, ticker);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        extract_price(ticker, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> YahooResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_regular_market_price() {
        let resp = parse(
            r#"{"chart":{"result":[{"meta":{"currency":"USD","symbol":"NVDA","regularMarketPrice":181.42},
            "timestamp":[1760000000],"indicators":{"quote":[{"close":[180.1]}]}}],"error":null}}"#,
        );
        assert_eq!(extract_price("NVDA", resp).unwrap(), 181.42);
    }

    #[test]
    fn test_falls_back_to_last_close() {
        let resp = parse(
            r#"{"chart":{"result":[{"meta":{"symbol":"AAPL"},
            "indicators":{"quote":[{"close":[230.5, 231.25, null]}]}}],"error":null}}"#,
        );
        assert_eq!(extract_price("AAPL", resp).unwrap(), 231.25);
    }

    #[test]
    fn test_provider_error_is_reported() {
        let resp = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        );
        match extract_price("ZZZZ", resp) {
            Err(MarketError::Provider(msg)) => assert!(msg.contains("delisted")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let resp = parse(r#"{"chart":{"result":[],"error":null}}"#);
        assert!(matches!(
            extract_price("NVDA", resp),
            Err(MarketError::NotFound(_))
        ));
    }
}
