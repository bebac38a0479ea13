//! Excel出力（rust_xlsxwriter）

use crate::error::Result;
use hair_scan_common::{AnalysisReport, ScanRecord};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

const HISTORY_HEADERS: &[&str] = &[
    "Timestamp",
    "Damage Score",
    "Level",
    "Detected Texture",
    "Recommended Product",
    "Primary Concern",
    "Care Level",
];

const REPORT_HEADERS: &[&str] = &[
    "File",
    "Date",
    "Score",
    "Level",
    "Confidence",
    "Texture",
    "Hair Type",
    "Primary Concern",
    "Care Level",
    "Recommended Product",
    "Key Ingredients",
    "Benefit",
    "Fallback",
    "Texture Score",
    "Edge Density",
    "Brightness",
    "Saturation Std",
    "Highlight Ratio",
    "Color Std",
];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA))
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
        worksheet.set_column_width(col as u16, (header.len() as f64 + 4.0).max(12.0))?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// スキャン履歴を1シートに出力
pub fn generate_history_excel(records: &[ScanRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Scan History")?;
    write_headers(worksheet, HISTORY_HEADERS)?;

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, record.timestamp.to_rfc3339())?;
        worksheet.write_number(row, 1, record.damage_score)?;
        worksheet.write_string(row, 2, record.level.as_str())?;
        worksheet.write_string(row, 3, record.detected_texture.as_str())?;
        worksheet.write_string(row, 4, &record.recommended_product)?;
        worksheet.write_string(row, 5, &record.primary_concern)?;
        worksheet.write_string(row, 6, record.care_level.as_str())?;
    }

    workbook.save(output_path)?;
    Ok(())
}

/// 解析結果を1シートに出力
pub fn generate_report_excel(reports: &[AnalysisReport], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Analysis")?;
    write_headers(worksheet, REPORT_HEADERS)?;

    for (i, r) in reports.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &r.file_name)?;
        worksheet.write_string(row, 1, &r.date)?;
        worksheet.write_number(row, 2, r.score)?;
        worksheet.write_string(row, 3, r.level.as_str())?;
        worksheet.write_number(row, 4, r.confidence as f64)?;
        worksheet.write_string(row, 5, r.detected_texture.as_str())?;
        worksheet.write_string(row, 6, &r.hair_type)?;
        worksheet.write_string(row, 7, &r.primary_concern)?;
        worksheet.write_string(row, 8, r.care_level.as_str())?;
        worksheet.write_string(row, 9, &r.recommended_product)?;
        worksheet.write_string(row, 10, &r.key_ingredients)?;
        worksheet.write_string(row, 11, &r.benefit)?;
        worksheet.write_boolean(row, 12, r.product_fallback)?;

        let features = [
            r.texture_score,
            r.edge_density,
            r.brightness,
            r.saturation_std,
            r.highlight_ratio,
            r.color_std,
        ];
        for (offset, value) in features.iter().enumerate() {
            worksheet.write_number(row, 13 + offset as u16, *value)?;
        }
    }

    workbook.save(output_path)?;
    Ok(())
}
