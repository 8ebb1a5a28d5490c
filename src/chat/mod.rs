//! ローカルLLMチャット連携モジュール
//!
//! - 入力を受け付ける前に死活確認を行う
//! - 失敗時は一定間隔で再確認（回数上限あり）
//! - 質問には過去の履歴すべてを付けて送る
//! - サーバー停止・エラー時はフォールバック文を返し、致命的エラーにしない

mod ollama;

pub use ollama::OllamaClient;

use crate::config::Config;
use crate::error::{FoodScanError, Result};
use food_scan_common::chat::{FALLBACK_MODEL_ERROR, FALLBACK_UNAVAILABLE};
use food_scan_common::{ChatRequest, Transcript};
use std::time::Duration;

/// 死活確認の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Available,
    /// 応答はあるが成功ステータスでない
    ServerError(u16),
    /// 接続できない
    Unreachable,
}

impl Liveness {
    pub fn is_available(&self) -> bool {
        matches!(self, Liveness::Available)
    }

    /// ユーザー向けメッセージ（利用可能時はNone）
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Liveness::Available => None,
            Liveness::ServerError(_) => Some("Ollama server responded with an error."),
            Liveness::Unreachable => Some("Ollama is not running or unavailable."),
        }
    }
}

/// チャットサーバーとの通信
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    /// 死活確認
    async fn probe(&self) -> Liveness;

    /// チャット補完。非成功ステータスは `ChatStatus`、接続失敗は `ChatUnavailable`
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// 再確認の間隔と回数
#[derive(Debug, Clone, Copy)]
pub struct ProbePolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl ProbePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: Duration::from_secs(config.probe_interval_seconds),
            max_attempts: config.probe_max_attempts,
        }
    }
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 5,
        }
    }
}

/// 1往復の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub reply: String,
    /// フォールバック応答か
    pub fallback: bool,
}

/// チャットセッション
///
/// `ask` は `&mut self` を取るため、応答待ちの間に次の質問は送れない。
pub struct ChatSession<B: ChatBackend> {
    backend: B,
    model: String,
    policy: ProbePolicy,
    transcript: Transcript,
    liveness: Liveness,
    attempts: u32,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B, model: impl Into<String>, policy: ProbePolicy) -> Self {
        Self {
            backend,
            model: model.into(),
            policy,
            transcript: Transcript::new(),
            // 初回確認まで入力不可
            liveness: Liveness::Unreachable,
            attempts: 0,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn is_available(&self) -> bool {
        self.liveness.is_available()
    }

    /// 自動再確認の回数
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// 1回だけ死活確認
    pub async fn check(&mut self) -> Liveness {
        let liveness = self.backend.probe().await;
        match liveness.message() {
            None => log::debug!("チャットサーバー: 利用可能"),
            Some(msg) => log::warn!("チャットサーバー: {}", msg),
        }
        self.liveness = liveness;
        liveness
    }

    /// 利用可能になるまで再確認（上限回数まで）
    pub async fn wait_until_available(&mut self) -> Result<()> {
        if self.check().await.is_available() {
            return Ok(());
        }

        while self.attempts < self.policy.max_attempts {
            tokio::time::sleep(self.policy.interval).await;
            self.attempts += 1;
            log::info!(
                "チャットサーバー再確認 {}/{}",
                self.attempts,
                self.policy.max_attempts
            );
            if self.check().await.is_available() {
                return Ok(());
            }
        }

        Err(FoodScanError::ChatUnavailable(
            self.liveness
                .message()
                .unwrap_or(FALLBACK_UNAVAILABLE)
                .to_string(),
        ))
    }

    /// 手動の再確認（回数をリセット）
    pub async fn retry(&mut self) -> Result<()> {
        self.attempts = 0;
        self.wait_until_available().await
    }

    /// 質問を送って応答を得る
    ///
    /// 空の質問は送信しない。サーバー利用不可なら先に再確認し、
    /// 復帰しなければ送信せずにエラーを返す。
    /// 送信後の失敗はフォールバック応答として返す。
    pub async fn ask(&mut self, question: &str) -> Result<ChatTurn> {
        if question.trim().is_empty() {
            return Err(FoodScanError::EmptyQuestion);
        }
        if !self.is_available() {
            self.wait_until_available().await?;
        }

        let request = self.transcript.build_request(&self.model, question);
        self.transcript.push_user(question);

        let turn = match self.backend.complete(&request).await {
            Ok(reply) => {
                self.transcript.push_reply(reply.clone());
                return Ok(ChatTurn {
                    reply,
                    fallback: false,
                });
            }
            Err(FoodScanError::ChatStatus(status)) => {
                log::warn!("チャット失敗 (status {})", status);
                // サーバーが生きていればモデル未ロードの可能性
                if self.check().await.is_available() {
                    FALLBACK_MODEL_ERROR
                } else {
                    FALLBACK_UNAVAILABLE
                }
            }
            Err(e) => {
                log::warn!("チャット失敗: {}", e);
                self.check().await;
                FALLBACK_UNAVAILABLE
            }
        };

        // 新たな障害ごとに再確認の回数を数え直す
        if !self.is_available() {
            self.attempts = 0;
        }

        self.transcript.push_fallback(turn);
        Ok(ChatTurn {
            reply: turn.to_string(),
            fallback: true,
        })
    }

    /// 会話履歴を消去
    pub fn clear(&mut self) {
        self.transcript.clear();
    }
}

/// 設定からOllamaセッションを作成
pub fn session_from_config(config: &Config) -> Result<ChatSession<OllamaClient>> {
    let client = OllamaClient::new(
        &config.chat_base_url(),
        Duration::from_secs(config.timeout_seconds),
    )?;
    Ok(ChatSession::new(
        client,
        config.model.clone(),
        ProbePolicy::from_config(config),
    ))
}
