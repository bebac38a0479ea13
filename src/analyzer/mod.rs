//! 解析パイプライン
//!
//! 特徴量抽出 → スコア → 分類 → FilterStrategy 照合 → AnalysisReport

use crate::error::{HairScanError, Result};
use crate::extractor::{decode_image, extract_features, load_image};
use crate::scanner::ImageInfo;
use hair_scan_common::{assess, AnalysisReport, FeatureVector, ProductCatalog, ProductMatcher};
use image::DynamicImage;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;

/// 特徴量から評価と商品照合を行う（カタログなしはデフォルト商品）
pub fn evaluate(features: &FeatureVector, catalog: Option<&ProductCatalog>) -> AnalysisReport {
    let assessment = assess(features);
    let product = ProductMatcher::new(catalog).recommend_for_assessment(&assessment);
    let assessment = assessment.with_fallback(product.fallback);

    tracing::debug!(
        score = assessment.score,
        level = %assessment.level,
        product = %product.entry.product,
        fallback = product.fallback,
        "評価完了"
    );
    AnalysisReport::new(features, &assessment, &product)
}

/// デコード済み画像を解析
pub fn analyze_image(image: &DynamicImage, catalog: Option<&ProductCatalog>) -> Result<AnalysisReport> {
    let features = extract_features(image)?;
    Ok(evaluate(&features, catalog))
}

/// 画像のバイト列を解析
pub fn analyze_bytes(bytes: &[u8], catalog: Option<&ProductCatalog>) -> Result<AnalysisReport> {
    let image = decode_image(bytes)?;
    analyze_image(&image, catalog)
}

/// 画像ファイルを解析
pub fn analyze_file(path: &Path, catalog: Option<&ProductCatalog>) -> Result<AnalysisReport> {
    let image = load_image(path)?;
    let mut report = analyze_image(&image, catalog)?;
    report.file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(report)
}

/// 一括解析の結果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// 成功分（入力順）
    pub reports: Vec<AnalysisReport>,
    /// 失敗したファイル名とエラー
    pub failures: Vec<(String, HairScanError)>,
}

/// 複数画像を並列に解析（結果は入力順）
pub fn analyze_images(
    images: &[ImageInfo],
    catalog: Option<&ProductCatalog>,
    show_progress: bool,
) -> BatchOutcome {
    let progress = if show_progress {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<(&ImageInfo, Result<AnalysisReport>)> = images
        .par_iter()
        .map(|info| {
            let result = analyze_file(&info.path, catalog).map(|mut report| {
                report.file_name = info.file_name.clone();
                report.date = info.date.clone().unwrap_or_default();
                report
            });
            progress.inc(1);
            (info, result)
        })
        .collect();
    progress.finish_and_clear();

    let mut outcome = BatchOutcome::default();
    for (info, result) in results {
        match result {
            Ok(report) => outcome.reports.push(report),
            Err(e) => {
                tracing::warn!(file = %info.file_name, error = %e, "解析失敗");
                outcome.failures.push((info.file_name.clone(), e));
            }
        }
    }
    outcome
}
