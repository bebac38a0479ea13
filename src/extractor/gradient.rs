//! 3×3 Sobel 勾配強度

use super::pad_reflect_101;
use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// 各画素の勾配強度 sqrt(gx² + gy²)（境界は reflect-101）
pub fn sobel_magnitude(gray: &GrayImage) -> Vec<f64> {
    let (w, h) = gray.dimensions();
    // imageproc は端の画素を複製するので、1px 外側を reflect-101 で埋めてから掛ける
    let padded = pad_reflect_101(gray, 1, 1, 1, 1);
    let gx = horizontal_sobel(&padded);
    let gy = vertical_sobel(&padded);

    let mut magnitude = Vec::with_capacity((w as usize) * (h as usize));
    for y in 1..=h {
        for x in 1..=w {
            let dx = gx.get_pixel(x, y)[0] as f64;
            let dy = gy.get_pixel(x, y)[0] as f64;
            magnitude.push((dx * dx + dy * dy).sqrt());
        }
    }
    magnitude
}
