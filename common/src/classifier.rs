//! スコア・エッジ密度からの分類
//!
//! - 評価フロー用のスコア帯 (3.5 / 6.5)
//! - アドバイスフロー用のケアレベル帯 (4 / 7)
//!
//! 2つの帯は別々に定義されている。統合しないこと。

use crate::scorer::damage_score;
use crate::types::{CareLevel, DamageAssessment, DamageLevel, FeatureVector, HairTexture};

const MODERATE_THRESHOLD: f64 = 3.5;
const SEVERE_THRESHOLD: f64 = 6.5;

const ADVISORY_MEDIUM_THRESHOLD: f64 = 4.0;
const ADVISORY_DEEP_THRESHOLD: f64 = 7.0;

const COARSE_EDGE_DENSITY: f64 = 15.0;
const FINE_EDGE_DENSITY: f64 = 8.0;

/// 固定デフォルト商品で代替した場合の信頼度
pub const BASE_CONFIDENCE: u8 = 92;
/// カタログ照合に成功した場合の信頼度
pub const MATCHED_CONFIDENCE: u8 = 95;

/// スコア帯ごとの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub level: DamageLevel,
    pub care_level: CareLevel,
    pub hair_type: &'static str,
    pub primary_concern: &'static str,
    pub message: &'static str,
}

const HEALTHY_BAND: ScoreBand = ScoreBand {
    level: DamageLevel::Healthy,
    care_level: CareLevel::Gentle,
    hair_type: "Normal & Fine",
    primary_concern: "Moisture",
    message: "Smooth surface and consistent tone — minimal damage detected.",
};

const MODERATE_BAND: ScoreBand = ScoreBand {
    level: DamageLevel::ModerateDamage,
    care_level: CareLevel::Medium,
    hair_type: "Dry, Damaged",
    primary_concern: "Nourishment",
    message: "Some uneven shine and slight dryness detected — mild repair suggested.",
};

const SEVERE_BAND: ScoreBand = ScoreBand {
    level: DamageLevel::SevereDamage,
    care_level: CareLevel::DeepCare,
    hair_type: "Heavily Damaged & Dry",
    primary_concern: "Breakage",
    message: "High texture variation and dull tone — deep treatment recommended.",
};

/// 評価フローのスコア帯（下限を含む）
pub fn score_band(score: f64) -> ScoreBand {
    if score < MODERATE_THRESHOLD {
        HEALTHY_BAND
    } else if score < SEVERE_THRESHOLD {
        MODERATE_BAND
    } else {
        SEVERE_BAND
    }
}

/// 評価フローのケアレベル (3.5 / 6.5)
pub fn assessment_care_tier(score: f64) -> CareLevel {
    score_band(score).care_level
}

/// アドバイスフローのケアレベル (4 / 7)
pub fn advisory_care_tier(damage_score: f64) -> CareLevel {
    if damage_score >= ADVISORY_DEEP_THRESHOLD {
        CareLevel::DeepCare
    } else if damage_score >= ADVISORY_MEDIUM_THRESHOLD {
        CareLevel::Medium
    } else {
        CareLevel::Gentle
    }
}

/// エッジ密度からテクスチャを推定（スコアとは独立）
pub fn detect_texture(edge_density: f64) -> HairTexture {
    if edge_density > COARSE_EDGE_DENSITY {
        HairTexture::Coarse
    } else if edge_density < FINE_EDGE_DENSITY {
        HairTexture::Fine
    } else {
        HairTexture::Medium
    }
}

/// 照合結果に応じた信頼度
pub fn confidence_for(fallback: bool) -> u8 {
    if fallback {
        BASE_CONFIDENCE
    } else {
        MATCHED_CONFIDENCE
    }
}

/// 特徴量からダメージ評価を生成（信頼度はベース値）
pub fn assess(features: &FeatureVector) -> DamageAssessment {
    classify(damage_score(features), features.edge_density)
}

/// スコアとエッジ密度から分類
pub fn classify(score: f64, edge_density: f64) -> DamageAssessment {
    let band = score_band(score);
    DamageAssessment {
        score,
        level: band.level,
        confidence: BASE_CONFIDENCE,
        detected_texture: detect_texture(edge_density),
        hair_type: band.hair_type.to_string(),
        primary_concern: band.primary_concern.to_string(),
        care_level: band.care_level,
        message: band.message.to_string(),
    }
}

impl DamageAssessment {
    /// デフォルト商品で代替したかを信頼度に反映
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.confidence = confidence_for(fallback);
        self
    }
}
