//! OCR前の画像チェックと縮小
//!
//! 読めない画像はここで弾く。長辺が上限を超える画像はグレースケール化して一時ファイルに縮小保存する。

use crate::error::{FoodScanError, Result};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// OCRに渡す画像
#[derive(Debug)]
pub struct PreparedImage {
    path: PathBuf,
    temporary: bool,
}

impl PreparedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 縮小した一時ファイルか
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }
}

impl Drop for PreparedImage {
    fn drop(&mut self) {
        if self.temporary {
            if let Err(e) = std::fs::remove_file(&self.path) {
                log::debug!("一時画像の削除に失敗: {}: {}", self.path.display(), e);
            }
        }
    }
}

/// 画像を検査し、必要なら縮小する
pub fn prepare_image(path: &Path, max_size: u32) -> Result<PreparedImage> {
    if !path.exists() {
        return Err(FoodScanError::FileNotFound(path.display().to_string()));
    }

    let (width, height) = image::image_dimensions(path)
        .map_err(|e| FoodScanError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    if max_size == 0 || (width <= max_size && height <= max_size) {
        return Ok(PreparedImage {
            path: path.to_path_buf(),
            temporary: false,
        });
    }

    log::debug!(
        "OCR前に縮小: {} ({}x{} → 上限{}px)",
        path.display(),
        width,
        height,
        max_size
    );

    let img = image::open(path)
        .map_err(|e| FoodScanError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    let resized = img.resize(max_size, max_size, FilterType::Triangle).grayscale();

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".into());
    let temp_path = std::env::temp_dir().join(format!(
        "food-scan-{}-{}.png",
        std::process::id(),
        stem
    ));

    resized
        .save(&temp_path)
        .map_err(|e| FoodScanError::ImageLoad(format!("縮小画像の保存に失敗: {}", e)))?;

    Ok(PreparedImage {
        path: temp_path,
        temporary: true,
    })
}
