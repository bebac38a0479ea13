//! 絞り込み型の照合（評価フロー）

use super::{MatchResult, MatchStrategy};
use crate::catalog::{CatalogColumn, ProductCatalog, ProductCatalogEntry, ProductType};
use crate::types::{CareLevel, DamageAssessment, HairTexture};

const REQUIRED_COLUMNS: &[CatalogColumn] = &[
    CatalogColumn::CareLevelCode,
    CatalogColumn::HairTexture,
    CatalogColumn::ProductType,
];

/// 絞り込み条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterQuery {
    pub care_level: CareLevel,
    pub detected_texture: HairTexture,
}

impl From<&DamageAssessment> for FilterQuery {
    fn from(assessment: &DamageAssessment) -> Self {
        Self {
            care_level: assessment.care_level,
            detected_texture: assessment.detected_texture,
        }
    }
}

/// ケアレベルコード → テクスチャ → 先頭のシャンプー
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterStrategy;

impl MatchStrategy for FilterStrategy {
    type Query = FilterQuery;

    fn select(&self, catalog: &ProductCatalog, query: &FilterQuery) -> Option<MatchResult> {
        let missing = catalog.missing_columns(REQUIRED_COLUMNS);
        if !missing.is_empty() {
            tracing::warn!(?missing, "カタログに必要な列がないため絞り込み照合をスキップ");
            return None;
        }

        let code = query.care_level.code();
        let by_care: Vec<&ProductCatalogEntry> = catalog
            .entries()
            .iter()
            .filter(|e| e.care_level_code == Some(code))
            .collect();

        // テクスチャで絞れなければケアレベルのみの候補に戻す
        let texture = query.detected_texture.as_str();
        let by_texture: Vec<&ProductCatalogEntry> = by_care
            .iter()
            .copied()
            .filter(|e| e.hair_texture == texture)
            .collect();
        let candidates = if by_texture.is_empty() { by_care } else { by_texture };

        candidates
            .into_iter()
            .find(|e| e.product_type == ProductType::Shampoo)
            .map(|e| MatchResult::from_catalog(e, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(product: &str, product_type: ProductType, code: u8, texture: &str) -> ProductCatalogEntry {
        let mut e = ProductCatalogEntry::new(product, product_type);
        e.care_level_code = Some(code);
        e.hair_texture = texture.to_string();
        e
    }

    fn query(care_level: CareLevel, detected_texture: HairTexture) -> FilterQuery {
        FilterQuery { care_level, detected_texture }
    }

    #[test]
    fn test_first_shampoo_in_catalog_order_wins() {
        let catalog = ProductCatalog::new(vec![
            entry("Conditioner First", ProductType::Conditioner, 2, "Medium"),
            entry("Shampoo A", ProductType::Shampoo, 2, "Medium"),
            entry("Shampoo B", ProductType::Shampoo, 2, "Medium"),
        ]);

        for _ in 0..3 {
            let found = FilterStrategy
                .select(&catalog, &query(CareLevel::Medium, HairTexture::Medium))
                .unwrap();
            assert_eq!(found.entry.product, "Shampoo A");
            assert!(!found.fallback);
            assert_eq!(found.match_score, None);
        }
    }

    #[test]
    fn test_texture_narrows_candidates() {
        let catalog = ProductCatalog::new(vec![
            entry("Fine Shampoo", ProductType::Shampoo, 3, "Fine"),
            entry("Coarse Shampoo", ProductType::Shampoo, 3, "Coarse"),
        ]);

        let found = FilterStrategy
            .select(&catalog, &query(CareLevel::DeepCare, HairTexture::Coarse))
            .unwrap();
        assert_eq!(found.entry.product, "Coarse Shampoo");
    }

    #[test]
    fn test_texture_miss_falls_back_to_care_level_set() {
        let catalog = ProductCatalog::new(vec![
            entry("Other Tier", ProductType::Shampoo, 2, "Fine"),
            entry("Deep Fine", ProductType::Shampoo, 3, "Fine"),
        ]);

        let found = FilterStrategy
            .select(&catalog, &query(CareLevel::DeepCare, HairTexture::Coarse))
            .unwrap();
        assert_eq!(found.entry.product, "Deep Fine");
    }

    #[test]
    fn test_texture_match_without_shampoo_yields_none() {
        // テクスチャ一致の候補にシャンプーがなければ、ケアレベルのみの候補には戻らない
        let catalog = ProductCatalog::new(vec![
            entry("Fine Shampoo", ProductType::Shampoo, 1, "Fine"),
            entry("Medium Conditioner", ProductType::Conditioner, 1, "Medium"),
        ]);

        let found = FilterStrategy.select(&catalog, &query(CareLevel::Gentle, HairTexture::Medium));
        assert!(found.is_none());
    }

    #[test]
    fn test_missing_columns_yield_none() {
        let headers = vec!["Product".to_string(), "Product Type".to_string()];
        let rows = vec![vec!["A".to_string(), "Shampoo".to_string()]];
        let catalog = ProductCatalog::from_table(&headers, &rows).unwrap();

        let found = FilterStrategy.select(&catalog, &query(CareLevel::Gentle, HairTexture::Fine));
        assert!(found.is_none());
    }
}
