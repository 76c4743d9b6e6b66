use crate::alert::entity::DEFAULT_ALERT_THRESHOLD;
use crate::score::BuzzWeights;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 报价失败时的回退价格
pub const DEFAULT_FALLBACK_PRICE: f64 = 185.0;

/// 全局应用配置
///
/// 由 `buzz-app` 在进程启动时构建一次并注入各组件，组件内部不读取环境变量。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub collector: CollectorConfig,
    pub scoring: BuzzWeights,
    pub alert: AlertSettings,
    pub sync: SyncConfig,
    pub server: ServerConfig,
}

/// 历史表存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Csv,
    Sqlite,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(StoreBackend::Csv),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub backend: StoreBackend,
}

impl StorageConfig {
    pub fn history_csv(&self) -> PathBuf {
        self.data_dir.join("history.csv")
    }

    pub fn history_db(&self) -> PathBuf {
        self.data_dir.join("history.db")
    }

    pub fn targets_csv(&self) -> PathBuf {
        self.data_dir.join("targets.csv")
    }

    pub fn alert_config_json(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            backend: StoreBackend::Csv,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    // 未配置时采集器使用模拟数据
    pub news_api_key: Option<String>,
    // 相邻两只股票之间的固定等待
    pub request_delay_ms: u64,
    pub fallback_price: f64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            request_delay_ms: 1000,
            fallback_price: DEFAULT_FALLBACK_PRICE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSettings {
    pub threshold: f64,
    pub receiver_email: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub email_user: Option<String>,
    pub email_pass: Option<String>,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ALERT_THRESHOLD,
            receiver_email: None,
            smtp_host: "smtp.qq.com".to_string(),
            smtp_port: 465,
            email_user: None,
            email_pass: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    pub gh_token: Option<String>,
    // 形如 `owner/repo`
    pub repo_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
