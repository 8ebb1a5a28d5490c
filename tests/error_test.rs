//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use food_scan_common::UserProfile;
use food_scan_rust::error::FoodScanError;
use food_scan_rust::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, FoodScanError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_path(dir.path());

    // 空フォルダはエラーではなく空のVecを返す（NoImagesFoundはCLI側で判断）
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像以外のファイルを直接指定した場合
#[test]
fn test_scan_non_image_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "Ingredients: Salt").unwrap();

    let result = scanner::scan_path(&path);
    assert!(matches!(result, Err(FoodScanError::ImageLoad(_))));
}

/// FoodScanErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FoodScanError::Config("テスト設定エラー".to_string()),
        FoodScanError::FileNotFound("label.jpg".to_string()),
        FoodScanError::FolderNotFound("/path/to/folder".to_string()),
        FoodScanError::NoImagesFound("フォルダ".to_string()),
        FoodScanError::ImageLoad("壊れた画像".to_string()),
        FoodScanError::OcrFailed("exit 1".to_string()),
        FoodScanError::ApiCall("API呼び出し失敗".to_string()),
        FoodScanError::ChatStatus(500),
        FoodScanError::ChatUnavailable("connection refused".to_string()),
        FoodScanError::EmptyQuestion,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// OCRエンジン未導入のメッセージ確認
#[test]
fn test_ocr_engine_missing_message() {
    let err = FoodScanError::OcrEngineMissing("tesseract".to_string());
    let display = format!("{}", err);

    assert!(display.contains("tesseract"));
    assert!(display.contains("food-scan config"));
}

/// OCR・チャット境界のエラーは再試行可能
#[test]
fn test_recoverable_errors() {
    assert!(FoodScanError::OcrFailed("x".into()).is_recoverable());
    assert!(FoodScanError::ImageLoad("x".into()).is_recoverable());
    assert!(FoodScanError::ChatStatus(503).is_recoverable());
    assert!(FoodScanError::ChatUnavailable("x".into()).is_recoverable());

    assert!(!FoodScanError::Config("x".into()).is_recoverable());
    assert!(!FoodScanError::OcrEngineMissing("x".into()).is_recoverable());
    assert!(!FoodScanError::EmptyQuestion.is_recoverable());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FoodScanError = io_err.into();

    assert!(matches!(err, FoodScanError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: FoodScanError = json_err.into();

    assert!(matches!(err, FoodScanError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = food_scan_common::Error::InvalidProfile("expected a JSON object".to_string());
    let err: FoodScanError = common_err.into();

    assert!(matches!(err, FoodScanError::Common(_)));
    assert_eq!(format!("{}", err), "invalid profile: expected a JSON object");
}

/// 不正なプロフィールファイル
#[test]
fn test_invalid_profile_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("profile.json");
    std::fs::write(&path, "[\"peanut\"]").unwrap();

    let err: FoodScanError = UserProfile::from_file(&path).unwrap_err().into();
    assert!(matches!(err, FoodScanError::Common(food_scan_common::Error::InvalidProfile(_))));
}
