//! エラー型定義
//!
//! 解析ロジック自体は失敗しない（成分なしは空の結果）。
//! エラーになるのはプロフィールの読み込みのみ。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("profile read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSONとしては正しいがプロフィールの形をしていない
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}

pub type Result<T> = std::result::Result<T, Error>;
