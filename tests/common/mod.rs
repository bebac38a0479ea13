//! テスト用の合成画像とカタログ

#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use std::path::Path;

pub const HEADERS: &[&str] = &[
    "Product",
    "Product Type",
    "Care Level Code",
    "Care Level",
    "Hair Texture",
    "Hair Type",
    "Primary Concern",
    "Secondary Concern",
    "Key Ingredients",
    "Benefit from Ingredient",
    "Need State",
    "Size",
    "Goal",
    "Fragrance",
    "Magnesium",
];

/// (Product, Type, Code, Care Level, Texture, Hair Type, Primary, Secondary, Ingredients, Benefit, Magnesium)
pub const ROWS: &[[&str; 11]] = &[
    ["Aqua Revive", "Shampoo", "1", "Gentle", "Fine", "Normal & Fine", "Moisture", "Dullness", "Marine Algae", "Seals Moisture", "yes"],
    ["Aqua Revive", "Conditioner", "1", "Gentle", "Fine", "Normal & Fine", "Moisture", "Dullness", "Marine Algae", "Seals Moisture", "YES"],
    ["Oil Nutritive", "Shampoo", "2", "Medium", "Medium", "Dry, Damaged", "Nourishment", "Split ends", "Marula Oil", "Controls Water Loss", "no"],
    ["Oil Nutritive", "Conditioner", "2", "Medium", "Medium", "Dry, Damaged", "Dryness", "Frizz", "Marula Oil", "Controls Water Loss", ""],
    ["Ultimate Repair", "Shampoo", "3", "Deep Care", "Coarse", "Heavily Damaged & Dry", "Breakage", "Repair", "Black Pearl", "Repairing Damage", "no"],
    ["Ultimate Repair", "Conditioner", "3", "Deep Care", "Coarse", "Heavily Damaged & Dry", "Breakage", "Split ends", "Black Pearl", "Repairing Damage", "no"],
];

/// カタログをxlsxで書き出し（Care Level Code は数値セル）
pub fn write_catalog_xlsx(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (i, row) in ROWS.iter().enumerate() {
        let r = i as u32 + 1;
        let cells = catalog_cells(row);
        for (col, value) in cells.iter().enumerate() {
            if col == 2 {
                sheet.write_number(r, col as u16, value.parse::<f64>().unwrap()).unwrap();
            } else if !value.is_empty() {
                sheet.write_string(r, col as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

/// カタログをcsvで書き出し
pub fn write_catalog_csv(path: &Path) {
    let mut content = HEADERS.join(",");
    content.push('\n');
    for row in ROWS {
        let line: Vec<String> = catalog_cells(row)
            .iter()
            .map(|v| if v.contains(',') { format!("\"{}\"", v) } else { v.to_string() })
            .collect();
        content.push_str(&line.join(","));
        content.push('\n');
    }
    std::fs::write(path, content).unwrap();
}

fn catalog_cells<'a>(row: &'a [&'a str; 11]) -> Vec<&'a str> {
    let mut cells = row[..10].to_vec();
    cells.extend(["Moisture", "250ml", "Hydrate", "Fresh", row[10]]);
    cells
}

/// 単色画像
pub fn uniform_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// 幅2pxの縦縞（黒/白）
pub fn stripe_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        if (x / 2) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    }))
}

/// 線形合同法による決定的ノイズ画像
pub fn noise_image(width: u32, height: u32, seed: u64) -> DynamicImage {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as u8
    };
    let mut img = RgbImage::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = Rgb([next(), next(), next()]);
    }
    DynamicImage::ImageRgb8(img)
}

/// PNGエンコード
pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
