use async_trait::async_trait;
use buzz_core::common::tls::install_crypto_provider;
use buzz_core::news::entity::Article;
use buzz_core::news::error::NewsError;
use buzz_core::news::port::NewsProvider;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const EVERYTHING_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// # Summary
/// NewsAPI `everything` 接口的新闻提供者。
///
/// # Invariants
/// - API Key 在构造时注入，进程内不再读取环境变量。
pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl NewsApiProvider {
    /// # Summary
    /// 创建提供者。
    ///
    /// # Arguments
    /// * `api_key`: NewsAPI 密钥。
    ///
    /// # Returns
    /// HTTP 客户端构建失败时返回 `NewsError::Network`。
    pub fn new(api_key: impl Into<String>) -> Result<Self, NewsError> {
        Self::with_endpoint(api_key, EVERYTHING_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: &str) -> Result<Self, NewsError> {
        install_crypto_provider();
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("buzz-monitor/0.1")
            .build()
            .map_err(|e| NewsError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.to_string(),
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(crate) enum NewsApiResponse {
    Ok {
        #[serde(default)]
        articles: Vec<NewsApiArticle>,
    },
    Error {
        code: Option<String>,
        message: Option<String>,
    },
}

#[derive(Deserialize, Debug)]
pub(crate) struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
}

/// 把接口响应转换为领域文章，丢弃无标题的条目
pub(crate) fn into_articles(resp: NewsApiResponse) -> Result<Vec<Article>, NewsError> {
    match resp {
        NewsApiResponse::Ok { articles } => Ok(articles
            .into_iter()
            .filter_map(|a| {
                let title = a.title?.trim().to_string();
                (!title.is_empty()).then_some(Article {
                    title,
                    description: a.description,
                })
            })
            .collect()),
        NewsApiResponse::Error { code, message } => Err(NewsError::Provider(format!(
            "{}: {}",
            code.unwrap_or_else(|| "unknown".to_string()),
            message.unwrap_or_default()
        ))),
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    /// # Summary
    /// 查询提及该股票的文章。
    ///
    /// # Logic
    /// 1. 以股票代码为关键词请求 `everything` 接口。
    /// 2. `status = error` 时返回 `Provider` 错误（Key 无效、限流等）。
    async fn fetch_articles(&self, ticker: &str) -> Result<Vec<Article>, NewsError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", ticker),
                ("apiKey", self.api_key.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", "100"),
            ])
            .send()
            .await
            .map_err(|e| NewsError::Network(e.to_string()))?;

        // NewsAPI 在 4xx 时同样返回 JSON 错误体，先尝试解析
        let status = resp.status();
        let body: NewsApiResponse = resp
            .json()
            .await
            .map_err(|e| NewsError::Parse(format!("HTTP {}: {}", status, e)))?;

        into_articles(body)
    }
}
