//! 解析パイプラインテスト
//!
//! フォルダ一括解析・カタログ照合・出力を検証

mod common;

use common::{noise_image, stripe_image, uniform_image, write_catalog_xlsx};
use hair_scan::catalog_store::CatalogStore;
use hair_scan::error::HairScanError;
use hair_scan::export::export_reports;
use hair_scan::{analyzer, scanner};
use hair_scan_common::AnalysisReport;
use tempfile::tempdir;

#[test]
fn test_batch_analysis_in_file_name_order() {
    let dir = tempdir().unwrap();
    stripe_image(48, 48).save(dir.path().join("c_stripes.png")).unwrap();
    uniform_image(32, 32, [120, 90, 60]).save(dir.path().join("a_flat.png")).unwrap();
    noise_image(40, 40, 3).save(dir.path().join("b_noise.png")).unwrap();
    std::fs::write(dir.path().join("d_broken.jpg"), b"garbage").unwrap();

    let images = scanner::scan_folder(dir.path()).unwrap();
    assert_eq!(images.len(), 4);

    let outcome = analyzer::analyze_images(&images, None, false);
    let names: Vec<&str> = outcome.reports.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["a_flat.png", "b_noise.png", "c_stripes.png"]);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, "d_broken.jpg");
    assert!(matches!(outcome.failures[0].1, HairScanError::ImageDecode(_)));

    for report in &outcome.reports {
        assert!((0.0..=10.0).contains(&report.score));
        assert!(report.product_fallback);
        assert_eq!(report.confidence, 92);
    }
}

/// 並列解析と逐次解析の結果は一致
#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for seed in 0..6u64 {
        noise_image(24, 20, seed).save(dir.path().join(format!("scan_{}.png", seed))).unwrap();
    }
    let images = scanner::scan_folder(dir.path()).unwrap();

    let parallel = analyzer::analyze_images(&images, None, false).reports;
    let sequential: Vec<AnalysisReport> = images
        .iter()
        .map(|info| analyzer::analyze_file(&info.path, None).unwrap())
        .collect();
    assert_eq!(parallel, sequential);
}

/// カタログありなら照合結果で信頼度 95
#[test]
fn test_catalog_match_raises_confidence() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.xlsx");
    write_catalog_xlsx(&catalog_path);
    let image_path = dir.path().join("scan.png");
    stripe_image(64, 64).save(&image_path).unwrap();

    let store = CatalogStore::new(&catalog_path);
    let shared = store.get();
    let report = analyzer::analyze_file(&image_path, shared.as_deref()).unwrap();

    assert_eq!(report.file_name, "scan.png");
    assert!(!report.product_fallback);
    assert_eq!(report.confidence, 95);
    assert!(!report.key_ingredients.is_empty());
}

#[test]
fn test_export_reports_by_extension() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("scan.png");
    noise_image(16, 16, 11).save(&image_path).unwrap();
    let reports = vec![analyzer::analyze_file(&image_path, None).unwrap()];

    let json_path = dir.path().join("out.json");
    export_reports(&reports, &json_path).unwrap();
    let loaded: Vec<AnalysisReport> =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(loaded, reports);

    let xlsx_path = dir.path().join("out.xlsx");
    export_reports(&reports, &xlsx_path).unwrap();
    assert!(xlsx_path.exists());

    assert!(export_reports(&reports, &dir.path().join("out.pdf")).is_err());
}
