//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use hair_scan::analyzer;
use hair_scan::error::HairScanError;
use hair_scan::extractor::extract_features;
use hair_scan::scanner;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(HairScanError::FolderNotFound(_))));
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.unwrap().is_empty());
}

/// 存在しない画像ファイル
#[test]
fn test_analyze_missing_file() {
    let result = analyzer::analyze_file(Path::new("/nonexistent/scan.jpg"), None);
    assert!(matches!(result, Err(HairScanError::FileNotFound(_))));
}

/// デコードできないファイル
#[test]
fn test_analyze_undecodable_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"\xff\xd8 definitely not a jpeg").unwrap();

    let result = analyzer::analyze_file(&path, None);
    assert!(matches!(result, Err(HairScanError::ImageDecode(_))));
}

/// 幅または高さが0の画像
#[test]
fn test_zero_area_image() {
    let image = DynamicImage::ImageRgb8(RgbImage::new(10, 0));
    let result = extract_features(&image);
    assert!(matches!(result, Err(HairScanError::InvalidImage { width: 10, height: 0 })));

    let result = analyzer::analyze_image(&image, None);
    assert!(result.is_err());
}

/// HairScanErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        HairScanError::Config("テスト設定エラー".to_string()),
        HairScanError::FileNotFound("scan.jpg".to_string()),
        HairScanError::FolderNotFound("/path/to/folder".to_string()),
        HairScanError::ImageDecode("unknown format".to_string()),
        HairScanError::InvalidImage { width: 0, height: 0 },
        HairScanError::Catalog("不正なカタログ".to_string()),
        HairScanError::ExcelGeneration("Excel生成エラー".to_string()),
        HairScanError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 共通ライブラリのエラーはそのまま表示される
#[test]
fn test_common_error_is_transparent() {
    let inner = hair_scan_common::Error::Catalog("Product 列がありません".into());
    let expected = inner.to_string();
    let err: HairScanError = inner.into();
    assert_eq!(err.to_string(), expected);
}
