use buzz_core::config::{AppConfig, StoreBackend};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 可选配置文件名（不含扩展名），在工作目录中查找
const SETTINGS_FILE: &str = "buzz";

/// # Summary
/// 扁平的原始配置，键名与环境变量一一对应（小写）。
///
/// # Invariants
/// - 所有字段可缺省，缺省值来自 `AppConfig::default()`。
/// - `buzz.toml` 使用同样的小写键名，例如 `repo_name`、`buzz_port`。
#[derive(Debug, Default, Deserialize)]
pub struct RawSettings {
    pub gh_token: Option<String>,
    pub repo_name: Option<String>,
    pub news_api_key: Option<String>,
    pub email_user: Option<String>,
    pub email_pass: Option<String>,
    pub receiver_email: Option<String>,
    pub buzz_data_dir: Option<PathBuf>,
    pub buzz_store_backend: Option<String>,
    pub buzz_smtp_host: Option<String>,
    pub buzz_smtp_port: Option<u16>,
    pub buzz_vol_weight: Option<f64>,
    pub buzz_sent_weight: Option<f64>,
    pub buzz_alert_threshold: Option<f64>,
    pub buzz_host: Option<String>,
    pub buzz_port: Option<u16>,
    pub buzz_request_delay_ms: Option<u64>,
}

/// 空字符串视为未设置
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl RawSettings {
    /// # Summary
    /// 叠加到默认配置之上。
    ///
    /// # Returns
    /// 存储后端名称非法时返回 `ConfigError::Message`。
    pub fn into_app_config(self) -> Result<AppConfig, ConfigError> {
        let mut cfg = AppConfig::default();

        if let Some(dir) = self.buzz_data_dir {
            cfg.storage.data_dir = dir;
        }
        if let Some(backend) = non_empty(self.buzz_store_backend) {
            cfg.storage.backend = backend.parse::<StoreBackend>().map_err(ConfigError::Message)?;
        }

        cfg.collector.news_api_key = non_empty(self.news_api_key);
        if let Some(delay) = self.buzz_request_delay_ms {
            cfg.collector.request_delay_ms = delay;
        }

        if let Some(w) = self.buzz_vol_weight {
            cfg.scoring.vol_weight = w;
        }
        if let Some(w) = self.buzz_sent_weight {
            cfg.scoring.sent_weight = w;
        }

        if let Some(threshold) = self.buzz_alert_threshold {
            cfg.alert.threshold = threshold;
        }
        cfg.alert.receiver_email = non_empty(self.receiver_email);
        cfg.alert.email_user = non_empty(self.email_user);
        cfg.alert.email_pass = non_empty(self.email_pass);
        if let Some(host) = non_empty(self.buzz_smtp_host) {
            cfg.alert.smtp_host = host;
        }
        if let Some(port) = self.buzz_smtp_port {
            cfg.alert.smtp_port = port;
        }

        cfg.sync.gh_token = non_empty(self.gh_token);
        cfg.sync.repo_name = non_empty(self.repo_name);

        if let Some(host) = non_empty(self.buzz_host) {
            cfg.server.host = host;
        }
        if let Some(port) = self.buzz_port {
            cfg.server.port = port;
        }

        Ok(cfg)
    }
}

/// # Summary
/// 从指定来源构建配置，环境变量优先于文件。
///
/// # Arguments
/// * `file`: 配置文件路径；`None` 时在工作目录查找可选的 `buzz.toml`。
/// * `env`: 替代进程环境的键值表，测试时使用；`None` 时读取真实环境。
pub fn load_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<AppConfig, ConfigError> {
    let file_source = match file {
        Some(path) => File::from(path).required(false),
        None => File::with_name(SETTINGS_FILE).required(false),
    };

    let raw: RawSettings = Config::builder()
        .add_source(file_source)
        .add_source(Environment::default().try_parsing(true).source(env))
        .build()?
        .try_deserialize()?;

    raw.into_app_config()
}

/// # Summary
/// 进程启动时加载配置。
///
/// # Logic
/// 1. 若存在 `.env` 则先载入进程环境。
/// 2. 叠加 `buzz.toml`（可选）与环境变量。
pub fn load() -> Result<AppConfig, ConfigError> {
    // .env 不存在是正常情况
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => {
            return Err(ConfigError::Message(format!("Failed to load .env: {}", e)));
        }
        _ => {}
    }
    load_from(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_defaults() {
        let cfg = RawSettings::default().into_app_config().unwrap();
        assert_eq!(cfg.storage.backend, StoreBackend::Csv);
        assert_eq!(cfg.alert.smtp_host, "smtp.qq.com");
        assert!(cfg.collector.news_api_key.is_none());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let raw = RawSettings {
            news_api_key: Some("   ".to_string()),
            gh_token: Some(String::new()),
            ..Default::default()
        };
        let cfg = raw.into_app_config().unwrap();
        assert!(cfg.collector.news_api_key.is_none());
        assert!(cfg.sync.gh_token.is_none());
    }

    #[test]
    fn test_bad_backend() {
        let raw = RawSettings {
            buzz_store_backend: Some("parquet".to_string()),
            ..Default::default()
        };
        assert!(raw.into_app_config().is_err());
    }
}
