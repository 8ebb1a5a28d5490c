//! 成分解析の型定義
//!
//! CLIと対話セッションで共有される型:
//! - IngredientToken: 原材料表示から切り出した1成分
//! - SeverityTier: プロフィールと照合した危険度
//! - ClassifiedIngredient: 成分 + 危険度
//! - Extraction: 抽出結果（宣言行なし / マーカーなし / 成分リスト）
//! - ExtractionStatus: レポートに載せる抽出状態

use serde::{Deserialize, Serialize};
use std::fmt;

/// 原材料表示から切り出した1成分
///
/// 前後の空白を除去済みで、空文字列にはならない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientToken(String);

impl IngredientToken {
    /// トリムして空でなければトークンを生成
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl AsRef<str> for IngredientToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 危険度
///
/// 並び順は Safe < Caution < Danger（Dangerが上限）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Safe,
    Caution,
    Danger,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 3] = [SeverityTier::Danger, SeverityTier::Caution, SeverityTier::Safe];

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Danger => "Danger",
            SeverityTier::Caution => "Caution",
            SeverityTier::Safe => "Safe",
        }
    }

    /// 表示色名
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::Danger => "red",
            SeverityTier::Caution => "yellow",
            SeverityTier::Safe => "green",
        }
    }

    /// 端末表示用のANSI SGRコード（`color()` の色に対応）
    pub fn ansi_code(&self) -> &'static str {
        match self.color() {
            "red" => "\x1b[1;31m",
            "yellow" => "\x1b[1;33m",
            _ => "\x1b[32m",
        }
    }

    /// 一覧表示用の記号
    pub fn symbol(&self) -> &'static str {
        match self {
            SeverityTier::Danger => "✖",
            SeverityTier::Caution => "!",
            SeverityTier::Safe => "✔",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 危険度判定済みの成分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIngredient {
    pub ingredient: IngredientToken,
    pub severity: SeverityTier,
}

/// 原材料抽出の結果
///
/// どれもエラーではない。呼び出し側は「成分が見つからない」状態として表示する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// "ingredient" を含む行がない
    NoDeclaration,
    /// 宣言行はあるが "ingredients:" マーカーがない
    NoMarker { line: String },
    /// マーカー以降を分割した成分（空の場合あり）
    Ingredients(Vec<IngredientToken>),
}

impl Extraction {
    /// 成分スライス（成分リスト以外は空）
    pub fn tokens(&self) -> &[IngredientToken] {
        match self {
            Extraction::Ingredients(tokens) => tokens,
            _ => &[],
        }
    }

    pub fn into_tokens(self) -> Vec<IngredientToken> {
        match self {
            Extraction::Ingredients(tokens) => tokens,
            _ => Vec::new(),
        }
    }

    /// 成分が1つも得られなかったか
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    /// レポート用の状態
    pub fn status(&self) -> ExtractionStatus {
        match self {
            Extraction::NoDeclaration => ExtractionStatus::NoDeclaration,
            Extraction::NoMarker { .. } => ExtractionStatus::NoMarker,
            Extraction::Ingredients(tokens) if tokens.is_empty() => ExtractionStatus::Empty,
            Extraction::Ingredients(_) => ExtractionStatus::Found,
        }
    }
}

/// 抽出状態（JSONでは snake_case）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Found,
    /// マーカーの後に何もない
    Empty,
    NoDeclaration,
    NoMarker,
}

impl ExtractionStatus {
    /// 成分が得られなかった理由（Foundならなし）
    pub fn miss_reason(&self) -> Option<&'static str> {
        match self {
            ExtractionStatus::Found => None,
            ExtractionStatus::Empty => Some("nothing follows the \"Ingredients:\" marker"),
            ExtractionStatus::NoDeclaration => Some("no line mentions \"ingredients\""),
            ExtractionStatus::NoMarker => Some("the ingredients line has no \"Ingredients:\" marker"),
        }
    }
}
