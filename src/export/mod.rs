pub mod excel;

use crate::error::{HairScanError, Result};
use hair_scan_common::AnalysisReport;
use std::path::Path;

/// 拡張子で出力形式を選ぶ（json / xlsx）
pub fn export_reports(reports: &[AnalysisReport], output: &Path) -> Result<()> {
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(reports)?;
            std::fs::write(output, json)?;
        }
        "xlsx" => excel::generate_report_excel(reports, output)?,
        _ => {
            return Err(HairScanError::Config(format!(
                "出力形式は .json か .xlsx を指定してください: {}",
                output.display()
            )))
        }
    }
    Ok(())
}
