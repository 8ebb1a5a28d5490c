//! スキャン結果レポート
//!
//! 判定結果を端末表示用テキストとJSONに変換する。
//! 危険度 → 表示（色・ラベル・記号）の対応は `SeverityTier` 側に集約している。

use crate::error::Result;
use chrono::{DateTime, Local};
use food_scan_common::encyclopedia;
use food_scan_common::{
    ClassifiedIngredient, ExtractionStatus, IngredientAnalysis, SeveritySummary, SeverityTier,
};
use serde::Serialize;

/// 成分が見つからなかった時の表示
pub const NO_INGREDIENTS_MESSAGE: &str =
    "No ingredients found – try correcting the text and re-analyzing.";

const ANSI_RESET: &str = "\x1b[0m";

/// 1スキャン分のレポート
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// 画像ファイル名など入力元
    pub source: String,
    /// 画像のEXIF撮影日時
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    pub scanned_at: DateTime<Local>,
    pub status: ExtractionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration_line: Option<String>,
    pub ingredients: Vec<ClassifiedIngredient>,
    pub summary: SeveritySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst: Option<SeverityTier>,
}

impl ScanReport {
    /// 解析済みの結果からレポートを作成
    pub fn from_analysis(source: &str, analysis: &IngredientAnalysis) -> Self {
        Self {
            source: source.to_string(),
            captured_at: None,
            scanned_at: Local::now(),
            status: analysis.extraction.status(),
            declaration_line: analysis.declaration_line.clone(),
            ingredients: analysis.classified.clone(),
            summary: analysis.summary,
            worst: analysis.worst(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// 抽出できなかった理由（成分ありならNone）
    pub fn miss_reason(&self) -> Option<&'static str> {
        self.status.miss_reason()
    }
}

/// 表示オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// ANSIカラーを使う
    pub color: bool,
    /// 成分ごとの説明を添える
    pub details: bool,
}

/// 危険度ラベルを整形
pub fn tier_badge(tier: SeverityTier, color: bool) -> String {
    if color {
        format!("{}{} {}{}", tier.ansi_code(), tier.symbol(), tier.label(), ANSI_RESET)
    } else {
        format!("{} {}", tier.symbol(), tier.label())
    }
}

/// レポートを端末表示用テキストに変換
pub fn render_text(report: &ScanReport, options: RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("📄 {}\n", report.source));
    if let Some(date) = &report.captured_at {
        out.push_str(&format!("  撮影: {}\n", date));
    }

    if let Some(line) = &report.declaration_line {
        out.push_str(&format!("  原材料表示: {}\n", line));
    }

    if report.is_empty() {
        out.push_str(&format!("  {}\n", NO_INGREDIENTS_MESSAGE));
        if let Some(reason) = report.miss_reason() {
            out.push_str(&format!("  ({})\n", reason));
        }
        return out;
    }

    let width = report
        .ingredients
        .iter()
        .map(|c| c.ingredient.as_str().chars().count())
        .max()
        .unwrap_or(0);

    for (i, c) in report.ingredients.iter().enumerate() {
        let name = c.ingredient.as_str();
        let pad = width.saturating_sub(name.chars().count());
        out.push_str(&format!(
            "  {:>2}. {}{}  {}\n",
            i + 1,
            name,
            " ".repeat(pad),
            tier_badge(c.severity, options.color)
        ));
        if options.details {
            out.push_str(&format!("      {}\n", encyclopedia::describe(name)));
        }
    }

    out.push_str(&format!(
        "  Danger {} / Caution {} / Safe {}\n",
        report.summary.danger, report.summary.caution, report.summary.safe
    ));
    out
}

/// 抽出状態を含めた結果をJSONに変換
pub fn to_json(reports: &[ScanReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_scan_common::{analyze_text, reclassify, UserProfile};

    fn report_for(source: &str, raw: &str, profile: Option<&UserProfile>) -> ScanReport {
        ScanReport::from_analysis(source, &analyze_text(raw, profile))
    }

    fn profile() -> UserProfile {
        UserProfile::from_entries("peanut", "sugar")
    }

    #[test]
    fn test_report_from_analysis() {
        let report = report_for(
            "bar.jpg",
            "Choco Bar\nIngredients: Sugar, Peanuts, Salt.",
            Some(&profile()),
        );

        assert_eq!(report.status, ExtractionStatus::Found);
        assert_eq!(report.declaration_line.as_deref(), Some("Ingredients: Sugar, Peanuts, Salt."));
        assert_eq!(report.ingredients.len(), 3);
        assert_eq!(report.worst, Some(SeverityTier::Danger));
        assert_eq!(report.summary.caution, 1);
    }

    #[test]
    fn test_render_plain_text() {
        let report = report_for("bar.jpg", "Ingredients: Sugar, Peanuts", Some(&profile()));
        let text = render_text(&report, RenderOptions::default());

        assert!(text.contains("bar.jpg"));
        assert!(text.contains("Sugar"));
        assert!(text.contains("! Caution"));
        assert!(text.contains("✖ Danger"));
        assert!(text.contains("Danger 1 / Caution 1 / Safe 0"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_render_color() {
        let report = report_for("x", "Ingredients: Salt", None);
        let text = render_text(&report, RenderOptions { color: true, details: false });
        assert!(text.contains(SeverityTier::Safe.ansi_code()));
        assert!(text.contains(ANSI_RESET));
    }

    #[test]
    fn test_render_details() {
        let report = report_for("x", "Ingredients: Salt", None);
        let text = render_text(&report, RenderOptions { color: false, details: true });
        assert!(text.contains("blood pressure"));
    }

    #[test]
    fn test_render_no_ingredients() {
        let report = report_for("blank.png", "Best before 2026", None);
        let text = render_text(&report, RenderOptions::default());

        assert!(report.is_empty());
        assert!(text.contains(NO_INGREDIENTS_MESSAGE));
        assert!(text.contains("no line mentions"));
    }

    #[test]
    fn test_marker_missing_keeps_declaration_line() {
        let report = report_for("x", "Made with natural ingredients", None);
        let text = render_text(&report, RenderOptions::default());

        assert_eq!(report.status, ExtractionStatus::NoMarker);
        assert_eq!(report.declaration_line.as_deref(), Some("Made with natural ingredients"));
        assert!(text.contains("no \"Ingredients:\" marker"));
    }

    #[test]
    fn test_report_from_reclassified_analysis() {
        let analysis = analyze_text("Ingredients: Sugar, Salt", None);
        let updated = reclassify(&analysis, Some(&profile()));
        let report = ScanReport::from_analysis("bar.jpg", &updated);

        assert_eq!(report.status, ExtractionStatus::Found);
        assert_eq!(report.declaration_line.as_deref(), Some("Ingredients: Sugar, Salt"));
        assert_eq!(report.worst, Some(SeverityTier::Caution));
        assert_eq!(report.summary, SeveritySummary { danger: 0, caution: 1, safe: 1 });
    }

    #[test]
    fn test_json_output() {
        let report = report_for("a.png", "Ingredients: Peanut Oil", Some(&profile()));
        let json = to_json(&[report]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["source"], "a.png");
        assert_eq!(value[0]["status"], "found");
        assert_eq!(value[0]["declarationLine"], "Ingredients: Peanut Oil");
        assert_eq!(value[0]["ingredients"][0]["ingredient"], "Peanut Oil");
        assert_eq!(value[0]["ingredients"][0]["severity"], "danger");
        assert_eq!(value[0]["worst"], "danger");
        assert!(value[0]["scannedAt"].is_string());
    }

    #[test]
    fn test_json_status_for_missing_declaration() {
        let report = report_for("b.png", "Net wt 100g", None);
        let value: serde_json::Value = serde_json::from_str(&to_json(&[report]).unwrap()).unwrap();

        assert_eq!(value[0]["status"], "no_declaration");
        assert!(value[0].get("declarationLine").is_none());
        assert!(value[0].get("worst").is_none());
    }
}
