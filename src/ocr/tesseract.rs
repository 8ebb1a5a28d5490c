//! Tesseract CLI連携
//!
//! `tesseract <image> stdout -l <lang>` を子プロセスで実行し、標準出力をテキストとして受け取る。

use super::prepare::prepare_image;
use super::OcrEngine;
use crate::error::{FoodScanError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    language: String,
    max_image_size: u32,
}

impl TesseractCli {
    pub fn new(command: &str, language: &str) -> Self {
        Self {
            command: command.to_string(),
            language: language.to_string(),
            max_image_size: 0,
        }
    }

    pub fn with_max_image_size(mut self, max_image_size: u32) -> Self {
        self.max_image_size = max_image_size;
        self
    }

    async fn run(&self, image: &Path) -> Result<String> {
        log::debug!("{} {} stdout -l {}", self.command, image.display(), self.language);

        let output = Command::new(&self.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FoodScanError::OcrEngineMissing(self.command.clone()),
                _ => FoodScanError::OcrFailed(format!("{} の実行に失敗: {}", self.command, e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FoodScanError::OcrFailed(format!(
                "{} failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        log::debug!("OCR結果: {} chars", text.len());
        Ok(text)
    }
}

impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &Path) -> Result<String> {
        let source: PathBuf = image.to_path_buf();
        let max_size = self.max_image_size;

        // 画像のデコード・縮小はブロッキング処理
        let prepared = tokio::task::spawn_blocking(move || prepare_image(&source, max_size))
            .await
            .map_err(|e| FoodScanError::OcrFailed(format!("画像前処理タスクが異常終了: {}", e)))??;

        self.run(prepared.path()).await
    }
}
