use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("OCRエンジンが見つかりません: `{0}` をインストールするか `food-scan config --set-tesseract PATH` で指定してください")]
    OcrEngineMissing(String),

    #[error("OCR実行エラー: {0}")]
    OcrFailed(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("チャットサーバーがエラーを返しました (status {0})")]
    ChatStatus(u16),

    #[error("チャットサーバーに接続できません: {0}")]
    ChatUnavailable(String),

    #[error("質問が空です")]
    EmptyQuestion,

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] food_scan_common::Error),
}

impl FoodScanError {
    /// ユーザーが再試行で回復できるエラーか（OCR・チャット境界）
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FoodScanError::ImageLoad(_)
                | FoodScanError::OcrFailed(_)
                | FoodScanError::ApiCall(_)
                | FoodScanError::ChatStatus(_)
                | FoodScanError::ChatUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FoodScanError>;
