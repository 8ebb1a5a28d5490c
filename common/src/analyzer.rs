//! 解析ロジック（CLI/対話セッション共通）
//!
//! OCRテキスト → 正規化 → 原材料抽出 → 危険度判定 を1回で行う。
//! 入力が同じなら結果も同じ（内部状態を持たない）。

use crate::classifier::{classify_all, worst_severity};
use crate::normalizer::normalize_lines;
use crate::parser::{extract_declaration, find_declaration_line};
use crate::profile::UserProfile;
use crate::types::{ClassifiedIngredient, Extraction, SeverityTier};
use serde::Serialize;

/// 危険度ごとの件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeveritySummary {
    pub danger: usize,
    pub caution: usize,
    pub safe: usize,
}

impl SeveritySummary {
    pub fn from_classified(classified: &[ClassifiedIngredient]) -> Self {
        let mut summary = Self::default();
        for c in classified {
            match c.severity {
                SeverityTier::Danger => summary.danger += 1,
                SeverityTier::Caution => summary.caution += 1,
                SeverityTier::Safe => summary.safe += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.danger + self.caution + self.safe
    }
}

/// 1テキスト分の解析結果
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientAnalysis {
    /// 正規化済みの宣言行（見つからなければNone）
    pub declaration_line: Option<String>,
    pub extraction: Extraction,
    pub classified: Vec<ClassifiedIngredient>,
    pub summary: SeveritySummary,
}

impl IngredientAnalysis {
    /// 最も重い危険度（成分なしはNone）
    pub fn worst(&self) -> Option<SeverityTier> {
        worst_severity(&self.classified)
    }

    /// 成分が1つも見つからなかったか
    pub fn is_empty(&self) -> bool {
        self.classified.is_empty()
    }
}

/// OCRテキストを解析
pub fn analyze_text(raw: &str, profile: Option<&UserProfile>) -> IngredientAnalysis {
    let lines = normalize_lines(raw);
    let declaration_line = find_declaration_line(&lines).map(str::to_string);
    let extraction = extract_declaration(&lines);
    let classified = classify_all(extraction.tokens(), profile);
    let summary = SeveritySummary::from_classified(&classified);

    IngredientAnalysis {
        declaration_line,
        extraction,
        classified,
        summary,
    }
}

/// プロフィール変更後に判定だけやり直す（抽出結果はそのまま）
pub fn reclassify(analysis: &IngredientAnalysis, profile: Option<&UserProfile>) -> IngredientAnalysis {
    let classified = classify_all(analysis.extraction.tokens(), profile);
    let summary = SeveritySummary::from_classified(&classified);

    IngredientAnalysis {
        declaration_line: analysis.declaration_line.clone(),
        extraction: analysis.extraction.clone(),
        classified,
        summary,
    }
}
