//! Ollama HTTP API連携
//!
//! - 死活確認: GET /api/tags
//! - チャット: POST /api/chat（stream: false）

use super::{ChatBackend, Liveness};
use crate::error::{FoodScanError, Result};
use food_scan_common::{ChatRequest, ChatResponse};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FoodScanError::ApiCall(format!("HTTPクライアント生成エラー: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

impl ChatBackend for OllamaClient {
    async fn probe(&self) -> Liveness {
        match self.http.get(self.tags_url()).send().await {
            Ok(resp) if resp.status().is_success() => Liveness::Available,
            Ok(resp) => Liveness::ServerError(resp.status().as_u16()),
            Err(e) => {
                log::debug!("死活確認失敗: {}", e);
                Liveness::Unreachable
            }
        }
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        log::debug!(
            "POST {} (model={}, messages={})",
            self.chat_url(),
            request.model,
            request.messages.len()
        );

        let resp = self
            .http
            .post(self.chat_url())
            .json(request)
            .send()
            .await
            .map_err(|e| FoodScanError::ChatUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FoodScanError::ChatStatus(status.as_u16()));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| FoodScanError::ApiCall(format!("チャット応答のパースに失敗: {}", e)))?;

        Ok(body.reply_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = OllamaClient::new("http://localhost:11434/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.tags_url(), "http://localhost:11434/api/tags");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
    }

    #[tokio::test]
    async fn test_probe_unreachable() {
        // ポート1は通常どのサービスも待ち受けていない
        let client = OllamaClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        assert_eq!(client.probe().await, Liveness::Unreachable);
    }
}
