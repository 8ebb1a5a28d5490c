//! 危険度判定
//!
//! 成分名（小文字化）に申告文字列（小文字化・トリム）が部分一致するかで判定する。
//! 優先順位: アレルギー一致 → Danger、制限一致 → Caution、それ以外 → Safe。
//!
//! 部分一致のため "egg" は "eggplant" にも一致する（既知の制限）。

use crate::profile::UserProfile;
use crate::types::{ClassifiedIngredient, IngredientToken, SeverityTier};

/// 成分1つの危険度を判定
pub fn classify<A, R>(ingredient: &str, allergies: A, restrictions: R) -> SeverityTier
where
    A: IntoIterator,
    A::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let lowered = ingredient.to_lowercase();

    if matches_any(&lowered, allergies) {
        return SeverityTier::Danger;
    }
    if matches_any(&lowered, restrictions) {
        return SeverityTier::Caution;
    }
    SeverityTier::Safe
}

/// プロフィールを使って判定（未設定は空プロフィール扱い）
pub fn classify_with_profile(ingredient: &str, profile: Option<&UserProfile>) -> SeverityTier {
    match profile {
        Some(p) => classify(ingredient, &p.allergies, &p.restrictions),
        None => SeverityTier::Safe,
    }
}

/// 成分リストをまとめて判定（順序を保持）
pub fn classify_all(
    tokens: &[IngredientToken],
    profile: Option<&UserProfile>,
) -> Vec<ClassifiedIngredient> {
    tokens
        .iter()
        .map(|token| ClassifiedIngredient {
            ingredient: token.clone(),
            severity: classify_with_profile(token.as_str(), profile),
        })
        .collect()
}

/// 判定結果の中で最も重い危険度
pub fn worst_severity(classified: &[ClassifiedIngredient]) -> Option<SeverityTier> {
    classified.iter().map(|c| c.severity).max()
}

fn matches_any<I>(lowered_ingredient: &str, entries: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries.into_iter().any(|entry| {
        let needle = entry.as_ref().trim().to_lowercase();
        !needle.is_empty() && lowered_ingredient.contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_allergy_substring_is_danger() {
        assert_eq!(classify("Peanut Oil", ["peanut"], NONE), SeverityTier::Danger);
    }

    #[test]
    fn test_restriction_without_substring_is_safe() {
        // "vegan" は "gelatin" の部分文字列ではない
        assert_eq!(classify("Gelatin", NONE, ["vegan"]), SeverityTier::Safe);
    }

    #[test]
    fn test_restriction_substring_is_caution() {
        assert_eq!(classify("Wheat Gluten", NONE, ["gluten"]), SeverityTier::Caution);
    }

    #[test]
    fn test_allergy_dominates_restriction() {
        assert_eq!(classify("Soy Lecithin", ["soy"], ["gluten"]), SeverityTier::Danger);
        assert_eq!(classify("Soy Lecithin", ["soy"], ["lecithin"]), SeverityTier::Danger);
    }

    #[test]
    fn test_empty_sets_are_safe() {
        for name in ["Sugar", "Peanut Oil", "Gelatin"] {
            assert_eq!(classify(name, NONE, NONE), SeverityTier::Safe);
        }
    }

    #[test]
    fn test_blank_entries_never_match() {
        assert_eq!(classify("Sugar", ["", "   "], ["\t"]), SeverityTier::Safe);
    }

    #[test]
    fn test_entries_are_trimmed_and_lowercased() {
        assert_eq!(classify("skimmed milk powder", ["  MILK "], NONE), SeverityTier::Danger);
    }

    #[test]
    fn test_coincidental_substring_false_positive() {
        assert_eq!(classify("Eggplant", ["egg"], NONE), SeverityTier::Danger);
    }

    #[test]
    fn test_missing_profile_is_safe() {
        assert_eq!(classify_with_profile("Peanut", None), SeverityTier::Safe);
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let profile = UserProfile::from_entries("peanut", "sugar");
        let tokens: Vec<IngredientToken> = ["Sugar", "Salt", "Peanut Oil", "Sugar"]
            .iter()
            .filter_map(|s| IngredientToken::new(s))
            .collect();

        let classified = classify_all(&tokens, Some(&profile));
        let tiers: Vec<SeverityTier> = classified.iter().map(|c| c.severity).collect();
        assert_eq!(
            tiers,
            vec![
                SeverityTier::Caution,
                SeverityTier::Safe,
                SeverityTier::Danger,
                SeverityTier::Caution,
            ]
        );
        assert_eq!(worst_severity(&classified), Some(SeverityTier::Danger));
    }

    #[test]
    fn test_worst_severity_empty() {
        assert_eq!(worst_severity(&[]), None);
    }
}
