//! Hair Scan Common Library
//!
//! CLIと解析パイプラインで共有される型とアルゴリズム（I/Oなし）

pub mod types;
pub mod error;
pub mod scorer;
pub mod classifier;
pub mod catalog;
pub mod matcher;
pub mod advisory;
pub mod history;

pub use types::{
    AnalysisReport, CareLevel, DamageAssessment, DamageLevel, FeatureVector, HairTexture,
};
pub use error::{Error, Result};
pub use scorer::damage_score;
pub use classifier::{advisory_care_tier, assess, assessment_care_tier, detect_texture};
pub use catalog::{CatalogColumn, ProductCatalog, ProductCatalogEntry, ProductLine, ProductType};
pub use matcher::{
    FilterQuery, FilterStrategy, MatchResult, MatchStrategy, ProductMatcher, UserProfile,
    WeightedStrategy,
};
pub use advisory::{build_advisor_prompt, AdvisoryContext};
pub use history::{Comparison, ComparisonTrend, HistoryStats, InsightSummary, ScanRecord, Trend};
