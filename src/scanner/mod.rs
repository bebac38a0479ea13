mod exif;

use crate::error::{HairScanError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// EXIF 撮影日時
    pub date: Option<String>,
}

impl ImageInfo {
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            date: exif::extract_date(path),
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 直下の画像を列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    scan_folder_with_options(folder, false)
}

/// 画像を列挙（`recursive` でサブフォルダも対象）
pub fn scan_folder_with_options(folder: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(HairScanError::FolderNotFound(folder.display().to_string()));
    }

    let walker = if recursive {
        WalkDir::new(folder)
    } else {
        WalkDir::new(folder).max_depth(1)
    };

    let mut images: Vec<ImageInfo> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
        .map(|e| ImageInfo::from_path(e.path()))
        .collect();

    // ファイル名でソート（同名はパス順）
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));

    tracing::debug!(folder = %folder.display(), count = images.len(), recursive, "画像スキャン");
    Ok(images)
}

/// 対応する画像拡張子か（大文字小文字を区別しない）
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
