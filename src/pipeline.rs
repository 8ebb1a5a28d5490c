//! スキャンセッション
//!
//! 1枚の画像について OCR → テキスト修正 → 解析 の流れを管理する。
//! 新しいスキャンを開始すると、それ以前のOCR結果は届いても破棄される。

use crate::error::Result;
use crate::ocr::OcrEngine;
use crate::report::ScanReport;
use food_scan_common::{analyze_text, reclassify, Generation, IngredientAnalysis, ProfileStore, Ticket};
use std::path::Path;

/// スキャンの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    /// OCR実行中
    Recognizing,
    /// OCR完了（テキスト編集可能）
    Recognized,
    /// OCR失敗（再試行可能）
    Failed(String),
    /// 解析済み
    Analyzed,
}

#[derive(Debug)]
pub struct ScanSession {
    generation: Generation,
    state: ScanState,
    source: String,
    text: String,
    /// 直近の抽出・判定結果（プロフィール変更時の再判定に使う）
    analysis: Option<IngredientAnalysis>,
    report: Option<ScanReport>,
    /// 解析時点のプロフィール変更回数
    analyzed_revision: Option<u64>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            generation: Generation::new(),
            state: ScanState::Idle,
            source: String::new(),
            text: String::new(),
            analysis: None,
            report: None,
            analyzed_revision: None,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 現在のテキスト（OCR結果または手動修正後）
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 直近の解析結果。未解析ならNone（「成分なし」とは区別する）
    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    /// 新しいスキャンを開始。以前の結果・テキストは破棄される
    pub fn begin(&mut self, source: impl Into<String>) -> Ticket {
        let ticket = self.generation.next();
        self.source = source.into();
        self.text.clear();
        self.analysis = None;
        self.report = None;
        self.analyzed_revision = None;
        self.state = ScanState::Recognizing;
        log::debug!("スキャン開始 #{}: {}", ticket.value(), self.source);
        ticket
    }

    /// OCR結果を受け取る。古いチケットの結果は捨ててfalseを返す
    pub fn complete(&mut self, ticket: Ticket, result: Result<String>) -> bool {
        if !self.generation.is_current(ticket) {
            log::debug!("古いOCR結果を破棄 #{}", ticket.value());
            return false;
        }

        match result {
            Ok(text) => {
                self.text = text;
                self.state = ScanState::Recognized;
            }
            Err(e) => {
                log::warn!("OCR失敗: {}", e);
                self.state = ScanState::Failed(e.to_string());
            }
        }
        true
    }

    /// 画像を認識してセッションに取り込む
    pub async fn recognize<E: OcrEngine>(&mut self, engine: &E, image: &Path) -> Result<&str> {
        let source = image
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| image.display().to_string());

        let ticket = self.begin(source);
        match engine.recognize(image).await {
            Ok(text) => {
                self.complete(ticket, Ok(text));
                Ok(&self.text)
            }
            Err(e) => {
                log::warn!("OCR失敗: {}", e);
                self.state = ScanState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// OCRを経ずにテキストを読み込む
    pub fn load_text(&mut self, source: impl Into<String>, text: impl Into<String>) {
        let ticket = self.begin(source);
        self.complete(ticket, Ok(text.into()));
    }

    /// テキストを手動修正（解析結果は次の解析まで保持）
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if matches!(self.state, ScanState::Idle | ScanState::Failed(_)) {
            self.state = ScanState::Recognized;
        }
    }

    /// 現在のテキストを解析
    pub fn analyze(&mut self, profiles: &ProfileStore) -> &ScanReport {
        let analysis = analyze_text(&self.text, profiles.profile());
        log::debug!(
            "解析: status={:?} ingredients={}",
            analysis.extraction.status(),
            analysis.classified.len()
        );
        self.state = ScanState::Analyzed;
        self.store(analysis, profiles.revision())
    }

    /// 直近の抽出結果を現在のプロフィールで判定し直す
    ///
    /// テキストは再解析しない。未解析ならNone。
    pub fn reclassify(&mut self, profiles: &ProfileStore) -> Option<&ScanReport> {
        let analysis = reclassify(self.analysis.as_ref()?, profiles.profile());
        log::debug!("再判定: revision={}", profiles.revision());
        Some(self.store(analysis, profiles.revision()))
    }

    fn store(&mut self, analysis: IngredientAnalysis, revision: u64) -> &ScanReport {
        let mut report = ScanReport::from_analysis(&self.source, &analysis);
        report.captured_at = self.report.as_ref().and_then(|r| r.captured_at.clone());
        self.analysis = Some(analysis);
        self.analyzed_revision = Some(revision);
        self.report.insert(report)
    }

    /// プロフィール変更後で再解析が必要か
    pub fn is_stale(&self, profiles: &ProfileStore) -> bool {
        matches!(self.analyzed_revision, Some(rev) if rev != profiles.revision())
    }

    /// 進行中のスキャンを取り消して初期状態に戻す
    pub fn reset(&mut self) {
        self.generation.invalidate();
        self.state = ScanState::Idle;
        self.source.clear();
        self.text.clear();
        self.analysis = None;
        self.report = None;
        self.analyzed_revision = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FoodScanError;
    use food_scan_common::{ExtractionStatus, SeverityTier, UserProfile};

    // ========================================
    // 状態遷移
    // ========================================

    #[test]
    fn test_initial_state() {
        let session = ScanSession::new();
        assert_eq!(session.state(), &ScanState::Idle);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_begin_and_complete() {
        let mut session = ScanSession::new();
        let ticket = session.begin("label.jpg");
        assert_eq!(session.state(), &ScanState::Recognizing);

        assert!(session.complete(ticket, Ok("Ingredients: Salt".to_string())));
        assert_eq!(session.state(), &ScanState::Recognized);
        assert_eq!(session.text(), "Ingredients: Salt");
        assert_eq!(session.source(), "label.jpg");
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut session = ScanSession::new();
        let first = session.begin("old.jpg");
        let second = session.begin("new.jpg");

        assert!(!session.complete(first, Ok("Ingredients: Old".to_string())));
        assert_eq!(session.state(), &ScanState::Recognizing);
        assert_eq!(session.text(), "");

        assert!(session.complete(second, Ok("Ingredients: New".to_string())));
        assert_eq!(session.text(), "Ingredients: New");
    }

    #[test]
    fn test_reset_discards_in_flight_scan() {
        let mut session = ScanSession::new();
        let ticket = session.begin("a.jpg");
        session.reset();

        assert!(!session.complete(ticket, Ok("Ingredients: Salt".to_string())));
        assert_eq!(session.state(), &ScanState::Idle);
    }

    #[test]
    fn test_failed_ocr() {
        let mut session = ScanSession::new();
        let ticket = session.begin("a.jpg");
        session.complete(ticket, Err(FoodScanError::OcrFailed("boom".to_string())));

        assert!(matches!(session.state(), ScanState::Failed(msg) if msg.contains("boom")));
    }

    // ========================================
    // 解析
    // ========================================

    #[test]
    fn test_edit_then_analyze() {
        let store = ProfileStore::with_profile(UserProfile::from_entries("peanut", ""));
        let mut session = ScanSession::new();
        session.load_text("label.jpg", "Ingredlents Sugar, Peanuts");

        // 誤認識を手で直してから解析
        assert!(session.analyze(&store).is_empty());
        session.edit_text("Ingredients: Sugar, Peanuts");
        let report = session.analyze(&store);

        assert_eq!(report.ingredients.len(), 2);
        assert_eq!(report.worst, Some(SeverityTier::Danger));
        assert_eq!(session.state(), &ScanState::Analyzed);
    }

    #[test]
    fn test_not_analyzed_vs_no_ingredients() {
        let store = ProfileStore::new();
        let mut session = ScanSession::new();
        session.load_text("blank.png", "Net wt 100g");
        assert!(session.report().is_none());

        session.analyze(&store);
        let report = session.report().unwrap();
        assert!(report.is_empty());
        assert_eq!(report.status, ExtractionStatus::NoDeclaration);
    }

    #[test]
    fn test_profile_change_marks_report_stale() {
        let mut store = ProfileStore::new();
        let mut session = ScanSession::new();
        session.load_text("a.png", "Ingredients: Soy Lecithin");

        let report = session.analyze(&store);
        assert_eq!(report.worst, Some(SeverityTier::Safe));
        assert!(!session.is_stale(&store));

        store.update(|p| {
            p.allergies.insert("soy".to_string());
        });
        assert!(session.is_stale(&store));
        assert_eq!(session.analyze(&store).worst, Some(SeverityTier::Danger));
    }

    #[test]
    fn test_reclassify_keeps_analyzed_text() {
        let mut store = ProfileStore::new();
        let mut session = ScanSession::new();
        session.load_text("a.png", "Ingredients: Milk Powder, Sugar");
        session.analyze(&store);

        // 未解析の修正は再判定に含めない
        session.edit_text("Ingredients: Salt");
        store.update(|p| {
            p.allergies.insert("milk".to_string());
        });
        assert!(session.is_stale(&store));

        let report = session.reclassify(&store).unwrap();
        assert_eq!(report.ingredients.len(), 2);
        assert_eq!(report.ingredients[0].severity, SeverityTier::Danger);
        assert_eq!(report.summary.danger, 1);
        assert_eq!(report.declaration_line.as_deref(), Some("Ingredients: Milk Powder, Sugar"));
        assert!(!session.is_stale(&store));
        assert_eq!(session.text(), "Ingredients: Salt");
    }

    #[test]
    fn test_reclassify_before_analysis() {
        let store = ProfileStore::new();
        let mut session = ScanSession::new();
        session.load_text("a.png", "Ingredients: Salt");

        assert!(session.reclassify(&store).is_none());
        assert!(session.report().is_none());
    }

    #[test]
    fn test_new_scan_clears_previous_report() {
        let store = ProfileStore::new();
        let mut session = ScanSession::new();
        session.load_text("a.png", "Ingredients: Salt");
        session.analyze(&store);

        session.begin("b.png");
        assert!(session.report().is_none());
    }
}
