//! チャットのワイヤ型と会話履歴
//!
//! ローカルLLMサーバー（Ollama互換）の `/api/chat` に送るリクエストと、
//! そのレスポンスの型。HTTP呼び出し自体は持たない。

use serde::{Deserialize, Serialize};

/// サーバー停止・到達不能時の応答
pub const FALLBACK_UNAVAILABLE: &str = "AI under maintenance. Please try again later.";
/// サーバーは応答するがチャットが失敗した時の応答
pub const FALLBACK_MODEL_ERROR: &str =
    "There was an error getting a response. The model might not be loaded.";
/// 応答本文が空の時の応答
pub const FALLBACK_EMPTY_ANSWER: &str = "No answer from AI.";

/// 発話者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// 1発話
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// `/api/chat` リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

/// `/api/chat` レスポンス（必要なフィールドのみ）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// 応答テキスト（空ならフォールバック文）
    pub fn reply_text(&self) -> String {
        self.message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .filter(|c| !c.is_empty())
            .unwrap_or(FALLBACK_EMPTY_ANSWER)
            .to_string()
    }
}

/// 会話履歴の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub message: ChatMessage,
    /// フォールバック応答（モデルには再送しない）
    pub fallback: bool,
}

/// 会話履歴
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            message: ChatMessage::user(content),
            fallback: false,
        });
    }

    pub fn push_reply(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            message: ChatMessage::assistant(content),
            fallback: false,
        });
    }

    pub fn push_fallback(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            message: ChatMessage::assistant(content),
            fallback: true,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// モデルに送る履歴（フォールバック応答を除く）
    pub fn history(&self) -> Vec<ChatMessage> {
        self.entries
            .iter()
            .filter(|e| !e.fallback)
            .map(|e| e.message.clone())
            .collect()
    }

    /// 既存の履歴 + 新しい質問でリクエストを組み立てる
    pub fn build_request(&self, model: &str, question: &str) -> ChatRequest {
        let mut messages = self.history();
        messages.push(ChatMessage::user(question));
        ChatRequest {
            model: model.to_string(),
            messages,
            stream: false,
        }
    }
}
