use async_trait::async_trait;
use buzz_core::alert::entity::AlertConfig;
use buzz_core::alert::port::AlertConfigStore;
use buzz_core::history::error::StoreError;
use std::path::PathBuf;

/// AlertConfigStore 的 JSON 文件实现 (`config.json`)。
///
/// # Invariants
/// * 写入格式为 4 空格缩进的 JSON，与看板同步到远端的内容一致。
pub struct JsonAlertConfigStore {
    path: PathBuf,
}

impl JsonAlertConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AlertConfigStore for JsonAlertConfigStore {
    async fn load(&self) -> Result<Option<AlertConfig>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    async fn save(&self, config: &AlertConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let json = config
            .to_pretty_json()
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}
