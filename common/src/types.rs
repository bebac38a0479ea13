//! 解析結果の型定義
//!
//! CLIと解析パイプラインで共有される型:
//! - FeatureVector: 画像から抽出した正規化統計量
//! - DamageAssessment: スコアと分類結果
//! - AnalysisReport: 最終出力（評価 + 商品照合 + 特徴量）

use crate::matcher::MatchResult;
use serde::{Deserialize, Serialize};

/// 画像特徴量（すべて非負）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// 勾配強度の分散 / 15000
    pub texture_score: f64,
    /// 勾配強度 > 50 の画素の割合（%）
    pub edge_density: f64,
    /// 正規化輝度の平均 / 255
    pub brightness: f64,
    /// 彩度の標準偏差 / 128
    pub saturation_std: f64,
    /// 正規化輝度 > 200 の画素の割合
    pub highlight_ratio: f64,
    /// 明度の標準偏差 / 128
    pub color_std: f64,
}

/// ダメージレベル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageLevel {
    #[default]
    Healthy,
    #[serde(rename = "Moderate Damage")]
    ModerateDamage,
    #[serde(rename = "Severe Damage")]
    SevereDamage,
}

impl DamageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageLevel::Healthy => "Healthy",
            DamageLevel::ModerateDamage => "Moderate Damage",
            DamageLevel::SevereDamage => "Severe Damage",
        }
    }
}

impl std::fmt::Display for DamageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 画像から推定した髪のテクスチャ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HairTexture {
    #[default]
    Fine,
    Medium,
    Coarse,
}

impl HairTexture {
    pub fn as_str(&self) -> &'static str {
        match self {
            HairTexture::Fine => "Fine",
            HairTexture::Medium => "Medium",
            HairTexture::Coarse => "Coarse",
        }
    }
}

impl std::fmt::Display for HairTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ケアレベル（カタログの Care Level / Care Level Code に対応）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareLevel {
    #[default]
    Gentle,
    Medium,
    #[serde(rename = "Deep Care")]
    DeepCare,
}

impl CareLevel {
    /// カタログの Care Level 列の表記
    pub fn as_str(&self) -> &'static str {
        match self {
            CareLevel::Gentle => "Gentle",
            CareLevel::Medium => "Medium",
            CareLevel::DeepCare => "Deep Care",
        }
    }

    /// カタログの Care Level Code 列の値 (1/2/3)
    pub fn code(&self) -> u8 {
        match self {
            CareLevel::Gentle => 1,
            CareLevel::Medium => 2,
            CareLevel::DeepCare => 3,
        }
    }
}

impl std::fmt::Display for CareLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ダメージ評価
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageAssessment {
    /// 0.0〜10.0（丸めなし）
    pub score: f64,
    pub level: DamageLevel,
    /// 0〜100
    pub confidence: u8,
    pub detected_texture: HairTexture,
    pub hair_type: String,
    pub primary_concern: String,
    pub care_level: CareLevel,
    /// 評価の要約文
    pub message: String,
}

/// 解析結果（評価 + 商品照合 + 診断用特徴量）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(default)]
    pub file_name: String,

    /// 撮影日時（EXIF DateTimeOriginal）
    #[serde(default)]
    pub date: String,

    pub score: f64,
    pub level: DamageLevel,
    pub confidence: u8,
    pub message: String,
    pub detected_texture: HairTexture,
    pub hair_type: String,
    pub primary_concern: String,
    pub care_level: CareLevel,

    pub recommended_product: String,
    #[serde(default)]
    pub key_ingredients: String,
    #[serde(default)]
    pub benefit: String,
    /// 固定のデフォルト商品で代替した場合 true
    #[serde(default)]
    pub product_fallback: bool,

    pub edge_density: f64,
    pub texture_score: f64,
    pub brightness: f64,
    pub saturation_std: f64,
    pub highlight_ratio: f64,
    pub color_std: f64,
}

impl AnalysisReport {
    /// 評価・照合結果・特徴量を表示用に丸めてまとめる
    pub fn new(
        features: &FeatureVector,
        assessment: &DamageAssessment,
        product: &MatchResult,
    ) -> Self {
        Self {
            file_name: String::new(),
            date: String::new(),
            score: round_to(assessment.score, 1),
            level: assessment.level,
            confidence: assessment.confidence,
            message: assessment.message.clone(),
            detected_texture: assessment.detected_texture,
            hair_type: assessment.hair_type.clone(),
            primary_concern: assessment.primary_concern.clone(),
            care_level: assessment.care_level,
            recommended_product: product.entry.product.clone(),
            key_ingredients: product.entry.key_ingredients.clone(),
            benefit: product.entry.benefit.clone(),
            product_fallback: product.fallback,
            edge_density: round_to(features.edge_density, 2),
            texture_score: round_to(features.texture_score, 3),
            brightness: round_to(features.brightness, 3),
            saturation_std: round_to(features.saturation_std, 3),
            highlight_ratio: round_to(features.highlight_ratio, 3),
            color_std: round_to(features.color_std, 3),
        }
    }
}

/// 小数点以下 `digits` 桁に丸める
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
