//! 原材料表示パーサー
//!
//! 正規化済みの行リストから原材料の宣言行を探し、成分トークンに分割する。
//!
//! 抽出手順:
//! 1. "ingredient" を含む最初の行を宣言行とする（大文字小文字を区別しない）
//! 2. 宣言行内の最初の "ingredient:" / "ingredients:" マーカー以降を取り出す
//! 3. カンマ・セミコロン・ピリオドで分割
//! 4. 各断片をトリムし空の断片を捨てる
//!
//! 宣言行は1行のみ参照する。OCRで折り返された2行目以降の成分は拾わない。

use crate::types::{Extraction, IngredientToken};
use regex::Regex;

lazy_static::lazy_static! {
    /// 宣言行の判定キーワード
    static ref DECLARATION_RE: Regex = Regex::new(r"(?i)ingredient").unwrap();
    /// 成分リスト開始マーカー
    static ref MARKER_RE: Regex = Regex::new(r"(?i)ingredients?:").unwrap();
}

/// 成分の区切り文字
const DELIMITERS: [char; 3] = [',', ';', '.'];

/// 宣言行（"ingredient" を含む最初の行）を探す
pub fn find_declaration_line<S: AsRef<str>>(lines: &[S]) -> Option<&str> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .find(|line| DECLARATION_RE.is_match(line))
}

/// 宣言行からマーカー以降の成分部分を取り出す
///
/// 同じ行に2つ目のマーカーがある場合はその手前までを返す。
pub fn declaration_body(line: &str) -> Option<&str> {
    let mut markers = MARKER_RE.find_iter(line);
    let first = markers.next()?;
    let end = markers.next().map(|m| m.start()).unwrap_or(line.len());
    Some(&line[first.end()..end])
}

/// 成分部分を区切り文字で分割してトークン化
pub fn split_ingredients(body: &str) -> Vec<IngredientToken> {
    body.split(DELIMITERS)
        .filter_map(IngredientToken::new)
        .collect()
}

/// 行リストから原材料を抽出（状態付き）
pub fn extract_declaration<S: AsRef<str>>(lines: &[S]) -> Extraction {
    let Some(line) = find_declaration_line(lines) else {
        return Extraction::NoDeclaration;
    };

    match declaration_body(line) {
        Some(body) => Extraction::Ingredients(split_ingredients(body)),
        None => Extraction::NoMarker {
            line: line.to_string(),
        },
    }
}

/// 行リストから原材料トークンを抽出
///
/// 宣言行やマーカーが見つからない場合は空リストを返す。
pub fn extract_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<IngredientToken> {
    extract_declaration(lines).into_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_lines;
    use crate::types::ExtractionStatus;

    fn names(tokens: &[IngredientToken]) -> Vec<&str> {
        tokens.iter().map(IngredientToken::as_str).collect()
    }

    // =============================================
    // 宣言行の検出
    // =============================================

    #[test]
    fn test_no_declaration_line() {
        let lines = normalize_lines("NET WT 100g\nBest before: 2026-01-01\nMade in Spain");
        assert!(find_declaration_line(&lines).is_none());
        assert_eq!(extract_declaration(&lines), Extraction::NoDeclaration);
        assert!(extract_ingredients(&lines).is_empty());
    }

    #[test]
    fn test_first_declaration_line_wins() {
        let lines = vec![
            "INGREDIENTS: Oats, Honey",
            "Ingredients: Sugar, Salt",
        ];
        assert_eq!(find_declaration_line(&lines), Some("INGREDIENTS: Oats, Honey"));
        assert_eq!(names(&extract_ingredients(&lines)), vec!["Oats", "Honey"]);
    }

    #[test]
    fn test_declaration_without_marker_is_empty() {
        // キーワードはあるがコロンがない → 後続行は見ない
        let lines = vec!["Made with natural ingredients", "Ingredients: Sugar"];
        assert_eq!(
            extract_declaration(&lines),
            Extraction::NoMarker {
                line: "Made with natural ingredients".to_string()
            }
        );
        assert!(extract_ingredients(&lines).is_empty());
    }

    #[test]
    fn test_marker_requires_colon_directly_after_keyword() {
        let lines = vec!["Ingredients : Sugar, Salt"];
        assert!(extract_ingredients(&lines).is_empty());
    }

    // =============================================
    // 分割
    // =============================================

    #[test]
    fn test_basic_declaration() {
        let lines = vec!["Ingredients: Sugar, Salt; Palm Oil."];
        assert_eq!(
            names(&extract_ingredients(&lines)),
            vec!["Sugar", "Salt", "Palm Oil"]
        );
    }

    #[test]
    fn test_singular_marker_and_case() {
        let lines = vec!["iNgReDiEnT: Water"];
        assert_eq!(names(&extract_ingredients(&lines)), vec!["Water"]);
    }

    #[test]
    fn test_text_before_marker_is_ignored() {
        let lines = vec!["Chocolate bar. Ingredients: Cocoa Solids, Sugar"];
        assert_eq!(
            names(&extract_ingredients(&lines)),
            vec!["Cocoa Solids", "Sugar"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let lines = vec!["Ingredients: Salt, Sugar, Salt"];
        assert_eq!(
            names(&extract_ingredients(&lines)),
            vec!["Salt", "Sugar", "Salt"]
        );
    }

    #[test]
    fn test_empty_fragments_are_dropped() {
        let lines = vec!["Ingredients: ,, Sugar ;; . Salt ,"];
        assert_eq!(names(&extract_ingredients(&lines)), vec!["Sugar", "Salt"]);
    }

    #[test]
    fn test_marker_with_nothing_after() {
        let lines = vec!["Ingredients:   "];
        let extraction = extract_declaration(&lines);
        assert_eq!(extraction, Extraction::Ingredients(vec![]));
        assert_eq!(extraction.status(), ExtractionStatus::Empty);
    }

    #[test]
    fn test_second_marker_ends_body() {
        let lines = vec!["Ingredients: Sugar, Salt. Filling ingredients: Cream"];
        assert_eq!(names(&extract_ingredients(&lines)), vec!["Sugar", "Salt", "Filling"]);
    }

    #[test]
    fn test_decimal_point_splits_token() {
        // ピリオドも区切り文字なので "2.5%" は分割される
        let lines = vec!["Ingredients: Salt 2.5%, Water"];
        assert_eq!(names(&extract_ingredients(&lines)), vec!["Salt 2", "5%", "Water"]);
    }

    // =============================================
    // 折り返し（既知の制限）
    // =============================================

    #[test]
    fn test_wrapped_declaration_is_truncated() {
        let raw = "Ingredients: Wheat Flour, Sugar,\nPalm Oil, Salt, Yeast.\nAllergy advice: see bold";
        let lines = normalize_lines(raw);
        assert_eq!(
            names(&extract_ingredients(&lines)),
            vec!["Wheat Flour", "Sugar"]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let raw = "Snack\nIngredients: Corn, Sunflower Oil; Salt.\n";
        let first = extract_ingredients(&normalize_lines(raw));
        let second = extract_ingredients(&normalize_lines(raw));
        assert_eq!(first, second);
    }
}
