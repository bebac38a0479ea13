//! 加点型の照合（アドバイスフロー）
//!
//! | ルール | 加点 |
//! |---|---|
//! | Hair Type に髪質の同義語を含む | +3（語ごと） |
//! | Primary Concern に悩みの同義語を含む | +5（語ごと） |
//! | Secondary Concern に悩みの同義語を含む | +2（語ごと） |
//! | Care Level がスコアから求めたケアレベルと一致 | +4 |
//! | Product Type が Conditioner | +1 |

use super::keywords::{concern_keywords, hair_keywords};
use super::{MatchResult, MatchStrategy};
use crate::catalog::{CatalogColumn, ProductCatalog, ProductCatalogEntry, ProductType};
use crate::classifier::advisory_care_tier;
use crate::types::CareLevel;
use serde::{Deserialize, Serialize};

const HAIR_TYPE_POINTS: i32 = 3;
const PRIMARY_CONCERN_POINTS: i32 = 5;
const SECONDARY_CONCERN_POINTS: i32 = 2;
const CARE_LEVEL_POINTS: i32 = 4;
const CONDITIONER_POINTS: i32 = 1;

const REQUIRED_COLUMNS: &[CatalogColumn] = &[
    CatalogColumn::HairType,
    CatalogColumn::PrimaryConcern,
    CatalogColumn::SecondaryConcern,
    CatalogColumn::CareLevel,
    CatalogColumn::ProductType,
];

/// ユーザーが申告した髪のプロファイル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub hair_type: String,
    pub concern: String,
    pub damage_score: f64,
}

impl UserProfile {
    pub fn new(hair_type: impl Into<String>, concern: impl Into<String>, damage_score: f64) -> Self {
        Self {
            hair_type: hair_type.into(),
            concern: concern.into(),
            damage_score,
        }
    }

    /// アドバイスフローのケアレベル (4 / 7)
    pub fn care_tier(&self) -> CareLevel {
        advisory_care_tier(self.damage_score)
    }
}

/// ルールごとの加点で最高得点の商品を選ぶ
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedStrategy;

impl MatchStrategy for WeightedStrategy {
    type Query = UserProfile;

    fn select(&self, catalog: &ProductCatalog, profile: &UserProfile) -> Option<MatchResult> {
        let missing = catalog.missing_columns(REQUIRED_COLUMNS);
        if !missing.is_empty() {
            tracing::warn!(?missing, "カタログに必要な列がないため加点照合をスキップ");
            return None;
        }

        let hair = hair_keywords(&profile.hair_type);
        let concern = concern_keywords(&profile.concern);
        let tier = profile.care_tier();

        // 同点は先に出現したエントリを優先（厳密な > で更新）
        let mut best: Option<(&ProductCatalogEntry, i32)> = None;
        for entry in catalog.entries() {
            let score = score_entry(entry, &hair, &concern, tier);
            tracing::trace!(product = %entry.product, score, "加点結果");
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((entry, score));
            }
        }

        if let Some((entry, score)) = best {
            return Some(MatchResult::from_catalog(entry, Some(score)));
        }

        // 加点なし: ケアレベル一致のみで選ぶ
        catalog
            .entries()
            .iter()
            .find(|e| e.care_level == tier.as_str())
            .map(|e| MatchResult::from_catalog(e, Some(0)))
    }
}

/// 1エントリの得点
pub fn score_entry(
    entry: &ProductCatalogEntry,
    hair_keywords: &[String],
    concern_keywords: &[String],
    tier: CareLevel,
) -> i32 {
    let hair_type = entry.hair_type.to_lowercase();
    let primary = entry.primary_concern.to_lowercase();
    let secondary = entry.secondary_concern.to_lowercase();

    let mut score = 0;
    for keyword in hair_keywords {
        if hair_type.contains(keyword.as_str()) {
            score += HAIR_TYPE_POINTS;
        }
    }
    for keyword in concern_keywords {
        if primary.contains(keyword.as_str()) {
            score += PRIMARY_CONCERN_POINTS;
        }
        if secondary.contains(keyword.as_str()) {
            score += SECONDARY_CONCERN_POINTS;
        }
    }
    if entry.care_level == tier.as_str() {
        score += CARE_LEVEL_POINTS;
    }
    if entry.product_type == ProductType::Conditioner {
        score += CONDITIONER_POINTS;
    }
    score
}
