use crate::error::{FoodScanError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ローカルLLMサーバーのベースURL
    pub ollama_url: String,
    /// チャットに使うモデル名
    pub model: String,
    /// 死活確認の再試行間隔（秒）
    pub probe_interval_seconds: u64,
    /// 死活確認の再試行回数上限
    pub probe_max_attempts: u32,
    /// HTTPタイムアウト（秒）
    pub timeout_seconds: u64,
    /// OCRコマンド
    pub tesseract_command: String,
    /// OCR言語
    pub ocr_language: String,
    /// OCR前に縮小する画像サイズ上限（px）
    pub max_image_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".into(),
            model: "llama3.2:3b".into(),
            probe_interval_seconds: 5,
            probe_max_attempts: 5,
            timeout_seconds: 120,
            tesseract_command: "tesseract".into(),
            ocr_language: "eng".into(),
            max_image_size: 2000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FoodScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("food-scan").join("config.json"))
    }

    /// チャットサーバーURL（環境変数を優先）
    pub fn chat_base_url(&self) -> String {
        match std::env::var(OLLAMA_HOST_ENV) {
            Ok(host) if !host.trim().is_empty() => normalize_base_url(&host),
            _ => normalize_base_url(&self.ollama_url),
        }
    }

    pub fn set_model(&mut self, model: String) -> Result<()> {
        if model.trim().is_empty() {
            return Err(FoodScanError::Config("モデル名が空です".into()));
        }
        self.model = model;
        self.save()
    }

    pub fn set_ollama_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FoodScanError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.ollama_url = url;
        self.save()
    }

    pub fn set_tesseract_command(&mut self, command: String) -> Result<()> {
        self.tesseract_command = command;
        self.save()
    }
}

/// 末尾スラッシュを除去し、スキームがなければ http:// を補う
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
