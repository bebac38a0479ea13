//! ダメージスコア算出
//!
//! 特徴量の重み付き和を 0〜10 にクリップし、照明補正後に再クリップする。

use crate::types::FeatureVector;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

const TEXTURE_WEIGHT: f64 = 0.3;
const DARKNESS_WEIGHT: f64 = 0.2;
const SATURATION_WEIGHT: f64 = 0.15;
const COLOR_WEIGHT: f64 = 0.1;
const HIGHLIGHT_WEIGHT: f64 = 0.25;

/// これ未満は暗所撮影として減衰
const DARK_BRIGHTNESS: f64 = 0.4;
/// これを超えると明所撮影として増幅
const BRIGHT_BRIGHTNESS: f64 = 0.75;
const DARK_FACTOR: f64 = 0.9;
const BRIGHT_FACTOR: f64 = 1.1;

/// 重み付き和（クリップ前）
pub fn raw_score(features: &FeatureVector) -> f64 {
    10.0 * (TEXTURE_WEIGHT * features.texture_score
        + DARKNESS_WEIGHT * (1.0 - features.brightness)
        + SATURATION_WEIGHT * features.saturation_std
        + COLOR_WEIGHT * features.color_std
        - HIGHLIGHT_WEIGHT * features.highlight_ratio)
}

/// 照明補正
pub fn lighting_correction(score: f64, brightness: f64) -> f64 {
    if brightness < DARK_BRIGHTNESS {
        score * DARK_FACTOR
    } else if brightness > BRIGHT_BRIGHTNESS {
        score * BRIGHT_FACTOR
    } else {
        score
    }
}

/// 最終ダメージスコア（0.0〜10.0）
pub fn damage_score(features: &FeatureVector) -> f64 {
    let score = clip(raw_score(features));
    clip(lighting_correction(score, features.brightness))
}

fn clip(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(brightness: f64) -> FeatureVector {
        FeatureVector {
            brightness,
            ..Default::default()
        }
    }

    #[test]
    fn test_raw_score_formula() {
        let f = FeatureVector {
            texture_score: 1.0,
            edge_density: 12.0,
            brightness: 0.5,
            saturation_std: 0.4,
            highlight_ratio: 0.2,
            color_std: 0.3,
        };
        // 10 * (0.3 + 0.1 + 0.06 + 0.03 - 0.05) = 4.4
        assert!((raw_score(&f) - 4.4).abs() < 1e-9);
        assert!((damage_score(&f) - 4.4).abs() < 1e-9);
    }

    #[test]
    fn test_dark_image_is_damped() {
        // raw = 10 * 0.2 * (1 - 0.3) = 1.4 → 1.26
        let score = damage_score(&features(0.3));
        assert!((score - 1.26).abs() < 1e-9);
    }

    #[test]
    fn test_bright_image_is_amplified() {
        let f = FeatureVector {
            texture_score: 2.0,
            brightness: 0.8,
            ..Default::default()
        };
        // raw = 10 * (0.6 + 0.04) = 6.4 → 7.04
        assert!((damage_score(&f) - 7.04).abs() < 1e-9);
    }

    #[test]
    fn test_lighting_boundaries_are_exclusive() {
        assert_eq!(lighting_correction(5.0, 0.4), 5.0);
        assert_eq!(lighting_correction(5.0, 0.75), 5.0);
    }

    #[test]
    fn test_score_clipped_after_raw_formula() {
        let f = FeatureVector {
            brightness: 0.5,
            highlight_ratio: 1.0,
            ..Default::default()
        };
        assert!(raw_score(&f) < 0.0);
        assert_eq!(damage_score(&f), 0.0);
    }

    #[test]
    fn test_score_clipped_after_correction() {
        let f = FeatureVector {
            texture_score: 50.0,
            brightness: 0.9,
            ..Default::default()
        };
        assert_eq!(damage_score(&f), MAX_SCORE);
    }

    #[test]
    fn test_nan_features_score_zero() {
        let f = FeatureVector {
            texture_score: f64::NAN,
            ..Default::default()
        };
        assert_eq!(damage_score(&f), 0.0);
    }
}
