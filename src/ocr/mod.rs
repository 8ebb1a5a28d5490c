//! OCRエンジン連携モジュール
//!
//! 画像 → テキスト の変換は外部エンジンに任せる。パイプラインはテキスト出力のみを受け取る。

mod prepare;
mod tesseract;

pub use prepare::{prepare_image, PreparedImage};
pub use tesseract::TesseractCli;

use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// 画像からテキストを認識するエンジン
#[allow(async_fn_in_trait)]
pub trait OcrEngine {
    /// 画像を認識してUTF-8テキストを返す（0行以上）
    async fn recognize(&self, image: &Path) -> Result<String>;
}

/// 設定からOCRエンジンを作成
pub fn from_config(config: &Config) -> TesseractCli {
    TesseractCli::new(&config.tesseract_command, &config.ocr_language)
        .with_max_image_size(config.max_image_size)
}
