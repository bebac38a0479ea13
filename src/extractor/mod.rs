//! 画像特徴量の抽出
//!
//! 1. 輝度（BT.601）と HSV の S/V を算出
//! 2. 輝度に CLAHE を適用
//! 3. Sobel 勾配強度から texture_score / edge_density を計算

mod clahe;
mod gradient;

use crate::error::{HairScanError, Result};
use hair_scan_common::FeatureVector;
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use std::path::Path;

/// 勾配分散の正規化係数
const TEXTURE_SCALE: f64 = 15000.0;
/// エッジとみなす勾配強度
const EDGE_THRESHOLD: f64 = 50.0;
/// ハイライトとみなす正規化輝度
const HIGHLIGHT_THRESHOLD: u8 = 200;
/// 標準偏差の正規化係数
const STD_SCALE: f64 = 128.0;

/// reflect-101 境界の添字（gfedcb|abcdefgh|gfedcba）
pub(crate) fn reflect_101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let i = i.rem_euclid(period);
    if i >= n as isize {
        (period - i) as usize
    } else {
        i as usize
    }
}

/// 上下左右を reflect-101 で拡張した画像
pub(crate) fn pad_reflect_101(src: &GrayImage, left: u32, top: u32, right: u32, bottom: u32) -> GrayImage {
    let (w, h) = src.dimensions();
    GrayImage::from_fn(w + left + right, h + top + bottom, |x, y| {
        let sx = reflect_101(x as isize - left as isize, w as usize);
        let sy = reflect_101(y as isize - top as isize, h as usize);
        *src.get_pixel(sx as u32, sy as u32)
    })
}

/// 画像ファイルを読み込み（形式は内容から判定）
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(HairScanError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// バイト列をデコード
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// 特徴量を抽出
pub fn extract_features(image: &DynamicImage) -> Result<FeatureVector> {
    extract_from_rgb(&image.to_rgb8())
}

pub fn extract_from_rgb(rgb: &RgbImage) -> Result<FeatureVector> {
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(HairScanError::InvalidImage { width, height });
    }

    let pixel_count = (width as usize) * (height as usize);
    let mut saturation = Vec::with_capacity(pixel_count);
    let mut value = Vec::with_capacity(pixel_count);
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        let (s, v) = saturation_value(r, g, b);
        saturation.push(s as f64);
        value.push(v as f64);
    }

    let gray = GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luminance(r, g, b)])
    });
    let normalized = clahe::equalize(&gray);
    let magnitude = gradient::sobel_magnitude(&normalized);

    let (mean_luma, _) = mean_variance(normalized.iter().map(|&v| v as f64));
    let (_, magnitude_var) = mean_variance(magnitude.iter().copied());
    let (_, saturation_var) = mean_variance(saturation.iter().copied());
    let (_, value_var) = mean_variance(value.iter().copied());

    let edges = magnitude.iter().filter(|&&m| m > EDGE_THRESHOLD).count();
    let highlights = normalized
        .iter()
        .filter(|&&v| v > HIGHLIGHT_THRESHOLD)
        .count();

    let features = FeatureVector {
        texture_score: magnitude_var / TEXTURE_SCALE,
        edge_density: 100.0 * edges as f64 / pixel_count as f64,
        brightness: mean_luma / 255.0,
        saturation_std: saturation_var.sqrt() / STD_SCALE,
        highlight_ratio: highlights as f64 / pixel_count as f64,
        color_std: value_var.sqrt() / STD_SCALE,
    };
    tracing::debug!(?features, width, height, "特徴量抽出");
    Ok(features)
}

/// BT.601 輝度
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// HSV の (S, V)（8bit 表現）
fn saturation_value(r: u8, g: u8, b: u8) -> (u8, u8) {
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    if v == 0 {
        return (0, 0);
    }
    let s = (255.0 * (v - min) as f64 / v as f64).round() as u8;
    (s, v)
}

/// 平均と母分散
fn mean_variance(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let var = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    (mean, var)
}
