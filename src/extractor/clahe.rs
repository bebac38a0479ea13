//! CLAHE（コントラスト制限付き適応ヒストグラム平坦化）
//!
//! 8×8 タイル、クリップ上限 2.0。

use super::pad_reflect_101;
use image::{imageops, GrayImage, Luma};
use imageproc::stats::histogram;

const TILES: u32 = 8;
const CLIP_LIMIT: f64 = 2.0;
const BINS: usize = 256;

type Lut = [u8; BINS];

/// 輝度画像に CLAHE を適用
pub fn equalize(src: &GrayImage) -> GrayImage {
    let (width, height) = src.dimensions();
    // タイルで割り切れない場合は右端・下端を reflect-101 で拡張
    let padded_w = width.div_ceil(TILES) * TILES;
    let padded_h = height.div_ceil(TILES) * TILES;
    let padded = pad_reflect_101(src, 0, 0, padded_w - width, padded_h - height);
    let tile_w = padded_w / TILES;
    let tile_h = padded_h / TILES;
    let tile_area = tile_w * tile_h;

    let clip = ((CLIP_LIMIT * tile_area as f64 / BINS as f64).floor() as u32).max(1);

    let mut luts: Vec<Lut> = Vec::with_capacity((TILES * TILES) as usize);
    for ty in 0..TILES {
        for tx in 0..TILES {
            let tile = imageops::crop_imm(&padded, tx * tile_w, ty * tile_h, tile_w, tile_h).to_image();
            let mut hist = histogram(&tile).channels[0];
            clip_histogram(&mut hist, clip);
            luts.push(build_lut(&hist, tile_area));
        }
    }

    interpolate(src, &luts, tile_w, tile_h)
}

/// 上限を超えた分を全ビンへ均等に、余りは等間隔に再分配
fn clip_histogram(hist: &mut [u32; BINS], limit: u32) {
    let mut clipped = 0;
    for count in hist.iter_mut() {
        if *count > limit {
            clipped += *count - limit;
            *count = limit;
        }
    }

    let bins = BINS as u32;
    let batch = clipped / bins;
    let mut residual = clipped - batch * bins;
    for count in hist.iter_mut() {
        *count += batch;
    }

    if residual > 0 {
        let step = (BINS / residual as usize).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

fn build_lut(hist: &[u32; BINS], tile_area: u32) -> Lut {
    let scale = (BINS - 1) as f64 / tile_area as f64;
    let mut lut = [0u8; BINS];
    let mut sum = 0u32;
    for (value, count) in lut.iter_mut().zip(hist.iter()) {
        sum += count;
        *value = (sum as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// 近傍4タイルの LUT を双線形補間
fn interpolate(src: &GrayImage, luts: &[Lut], tile_w: u32, tile_h: u32) -> GrayImage {
    let columns: Vec<(usize, usize, f64)> = (0..src.width())
        .map(|x| neighbours(x, tile_w))
        .collect();
    let tiles = TILES as usize;

    let mut out = GrayImage::new(src.width(), src.height());
    for (y, row) in out.enumerate_rows_mut() {
        let (ty1, ty2, ya) = neighbours(y, tile_h);
        let row1 = &luts[ty1 * tiles..(ty1 + 1) * tiles];
        let row2 = &luts[ty2 * tiles..(ty2 + 1) * tiles];

        for (x, _, pixel) in row {
            let (tx1, tx2, xa) = columns[x as usize];
            let v = src.get_pixel(x, y)[0] as usize;
            let top = row1[tx1][v] as f64 * (1.0 - xa) + row1[tx2][v] as f64 * xa;
            let bottom = row2[tx1][v] as f64 * (1.0 - xa) + row2[tx2][v] as f64 * xa;
            let res = top * (1.0 - ya) + bottom * ya;
            *pixel = Luma([res.round().clamp(0.0, 255.0) as u8]);
        }
    }
    out
}

/// 画素位置 → (左/上タイル, 右/下タイル, 後者の重み)
fn neighbours(pos: u32, tile_size: u32) -> (usize, usize, f64) {
    let tf = pos as f64 / tile_size as f64 - 0.5;
    let t1 = tf.floor();
    let weight = tf - t1;
    let t1 = t1 as isize;
    let lo = t1.max(0) as usize;
    let hi = ((t1 + 1) as usize).min(TILES as usize - 1);
    (lo, hi, weight)
}
