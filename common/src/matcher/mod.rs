//! 商品照合モジュール
//!
//! 呼び出し元ごとに2つの照合戦略を使い分ける:
//! - FilterStrategy: 評価フロー（ケアレベル・テクスチャで絞り込み、先頭のシャンプー）
//! - WeightedStrategy: アドバイスフロー（ルールごとの加点で最高得点）
//!
//! どちらも同点・複数候補の場合はカタログの挿入順で先頭を採用する。

mod fallback;
mod filter;
mod keywords;
mod weighted;

pub use fallback::{advisory_default, assessment_default};
pub use filter::{FilterQuery, FilterStrategy};
pub use keywords::{concern_keywords, hair_keywords};
pub use weighted::{score_entry, UserProfile, WeightedStrategy};

use crate::catalog::{ProductCatalog, ProductCatalogEntry};
use crate::types::DamageAssessment;
use serde::{Deserialize, Serialize};

/// 照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 選ばれた商品（カタログ行のコピー、または固定デフォルト）
    pub entry: ProductCatalogEntry,
    /// WeightedStrategy の得点（FilterStrategy では None）
    pub match_score: Option<i32>,
    /// 固定デフォルトで代替した場合 true
    pub fallback: bool,
}

impl MatchResult {
    pub(crate) fn from_catalog(entry: &ProductCatalogEntry, match_score: Option<i32>) -> Self {
        Self {
            entry: entry.clone(),
            match_score,
            fallback: false,
        }
    }

    pub(crate) fn from_default(entry: ProductCatalogEntry) -> Self {
        Self {
            entry,
            match_score: None,
            fallback: true,
        }
    }
}

/// 照合戦略
pub trait MatchStrategy {
    type Query;

    /// 該当なしの場合は None
    fn select(&self, catalog: &ProductCatalog, query: &Self::Query) -> Option<MatchResult>;
}

/// カタログ（未読み込み可）に対する照合の窓口
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductMatcher<'a> {
    catalog: Option<&'a ProductCatalog>,
}

impl<'a> ProductMatcher<'a> {
    /// `None` はカタログなし（縮退モード）
    pub fn new(catalog: Option<&'a ProductCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> Option<&'a ProductCatalog> {
        self.catalog
    }

    /// 任意の戦略で照合
    pub fn find<S: MatchStrategy>(&self, strategy: &S, query: &S::Query) -> Option<MatchResult> {
        let catalog = self.catalog?;
        strategy.select(catalog, query)
    }

    /// 評価フロー: FilterStrategy、該当なしならスコア帯の固定デフォルト
    pub fn recommend_for_assessment(&self, assessment: &DamageAssessment) -> MatchResult {
        let query = FilterQuery::from(assessment);
        match self.find(&FilterStrategy, &query) {
            Some(found) => found,
            None => MatchResult::from_default(assessment_default(assessment.score)),
        }
    }

    /// アドバイスフロー: WeightedStrategy（該当なしは None、代替は呼び出し側）
    pub fn recommend_for_profile(&self, profile: &UserProfile) -> Option<MatchResult> {
        self.find(&WeightedStrategy, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_missing_catalog_uses_banded_defaults() {
        let matcher = ProductMatcher::new(None);

        let low = matcher.recommend_for_assessment(&classify(2.9, 5.0));
        let mid = matcher.recommend_for_assessment(&classify(3.0, 5.0));
        let high = matcher.recommend_for_assessment(&classify(7.0, 5.0));

        assert!(low.fallback && mid.fallback && high.fallback);
        assert_eq!(low.entry.product, "Aqua Revive");
        assert_eq!(mid.entry.product, "Oil Nutritive");
        assert_eq!(high.entry.product, "Ultimate Repair");
    }

    #[test]
    fn test_missing_catalog_reports_no_weighted_match() {
        let matcher = ProductMatcher::new(None);
        let profile = UserProfile::new("dry", "dryness", 8.0);
        assert!(matcher.recommend_for_profile(&profile).is_none());
    }

    #[test]
    fn test_empty_catalog_falls_back() {
        let catalog = ProductCatalog::new(Vec::new());
        let matcher = ProductMatcher::new(Some(&catalog));

        let result = matcher.recommend_for_assessment(&classify(5.0, 10.0));
        assert!(result.fallback);
        assert_eq!(result.entry.product, "Oil Nutritive");

        let profile = UserProfile::new("dry", "dryness", 5.0);
        assert!(matcher.recommend_for_profile(&profile).is_none());
    }

    #[test]
    fn test_catalog_accessor_reports_degraded_mode() {
        assert!(ProductMatcher::new(None).catalog().is_none());
        assert!(ProductMatcher::default().catalog().is_none());

        let catalog = ProductCatalog::new(Vec::new());
        let matcher = ProductMatcher::new(Some(&catalog));
        assert!(matcher.catalog().is_some_and(|c| c.is_empty()));
    }
}
