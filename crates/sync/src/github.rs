use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use buzz_core::common::tls::install_crypto_provider;
use buzz_core::sync::error::SyncError;
use buzz_core::sync::port::RemoteSync;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

const API_BASE: &str = "https://api.github.com";
const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// # Summary
/// 基于 GitHub Contents API 的远端同步实现。
///
/// # Invariants
/// - 覆盖已存在文件时必须携带其当前 `sha`。
/// - 只在默认分支上提交。
pub struct GithubContentSync {
    client: Client,
    token: String,
    // 形如 `owner/repo`
    repo: String,
    api_base: String,
}

#[derive(Deserialize, Debug)]
struct ContentMeta {
    sha: String,
}

/// PUT 请求体；`sha` 为空表示新建文件
#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct PutContentRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct GithubErrorBody {
    #[serde(default)]
    message: String,
}

/// 组装提交请求，正文按标准 base64 编码
pub(crate) fn build_payload(content: &str, message: &str, sha: Option<String>) -> PutContentRequest {
    PutContentRequest {
        message: message.to_string(),
        content: STANDARD.encode(content.as_bytes()),
        sha,
    }
}

impl GithubContentSync {
    /// # Summary
    /// 创建同步器。
    ///
    /// # Arguments
    /// * `token`: 具备 contents 写权限的访问令牌。
    /// * `repo`: 目标仓库 `owner/repo`。
    ///
    /// # Returns
    /// 令牌或仓库为空时返回 `SyncError::Config`。
    pub fn new(token: impl Into<String>, repo: impl Into<String>) -> Result<Self, SyncError> {
        Self::with_api_base(token, repo, API_BASE)
    }

    pub fn with_api_base(
        token: impl Into<String>,
        repo: impl Into<String>,
        api_base: &str,
    ) -> Result<Self, SyncError> {
        let token = token.into();
        let repo = repo.into();
        if token.trim().is_empty() {
            return Err(SyncError::Config("GH_TOKEN is empty".to_string()));
        }
        if !repo.contains('/') {
            return Err(SyncError::Config(format!(
                "REPO_NAME must look like owner/repo, got '{}'",
                repo
            )));
        }

        install_crypto_provider();
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("buzz-monitor/0.1")
            .build()
            .map_err(|e| SyncError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token,
            repo,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn content_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_base,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    /// # Summary
    /// 查询文件当前 `sha`。
    ///
    /// # Logic
    /// 1. 200 返回 `Some(sha)`。
    /// 2. 其他状态（含 404）视为文件不存在。
    async fn current_sha(&self, url: &str) -> Result<Option<String>, SyncError> {
        let resp = self
            .client
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT_V3)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if resp.status() != StatusCode::OK {
            return Ok(None);
        }

        let meta: ContentMeta = resp
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))?;
        Ok(Some(meta.sha))
    }
}

#[async_trait]
impl RemoteSync for GithubContentSync {
    /// # Summary
    /// 读-改-写一次文件提交。
    ///
    /// # Logic
    /// 1. 获取当前 `sha`。
    /// 2. 以 base64 正文 PUT 到 Contents API。
    /// 3. 200/201 视为成功，其余状态返回 `Rejected`。
    async fn write(&self, path: &str, content: &str, message: &str) -> Result<(), SyncError> {
        let url = self.content_url(path);
        let sha = self.current_sha(&url).await?;
        let payload = build_payload(content, message, sha);

        let resp = self
            .client
            .put(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT_V3)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            info!("Synced {} to {} ({})", path, self.repo, message);
            return Ok(());
        }

        let body: GithubErrorBody = resp.json().await.unwrap_or_default();
        warn!("GitHub rejected write of {}: HTTP {} {}", path, status, body.message);
        Err(SyncError::Rejected {
            status: status.as_u16(),
            message: body.message,
        })
    }
}
