//! スキャン履歴の集計
//!
//! 永続化（追記専用ファイル）は呼び出し側で行い、ここでは記録の型と
//! 統計・比較・インサイトの計算のみを扱う。

use crate::types::{round_to, AnalysisReport, CareLevel, DamageLevel, HairTexture};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 履歴の1件（保存時に記録し、以後変更しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    /// ログ側で付与する保存時刻
    pub timestamp: DateTime<Utc>,
    pub damage_score: f64,
    pub level: DamageLevel,
    pub detected_texture: HairTexture,
    pub recommended_product: String,
    pub primary_concern: String,
    pub care_level: CareLevel,
}

impl ScanRecord {
    pub fn from_report(report: &AnalysisReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            damage_score: report.score,
            level: report.level,
            detected_texture: report.detected_texture,
            recommended_product: report.recommended_product.clone(),
            primary_concern: report.primary_concern.clone(),
            care_level: report.care_level,
        }
    }
}

/// 全体傾向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "No Data")]
    NoData,
    Improving,
    Declining,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::NoData => write!(f, "No Data"),
            Trend::Improving => write!(f, "Improving"),
            Trend::Declining => write!(f, "Declining"),
        }
    }
}

/// 初回と最新の比較結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonTrend {
    Improved,
    Worsened,
    Stable,
}

impl std::fmt::Display for ComparisonTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonTrend::Improved => write!(f, "Improved"),
            ComparisonTrend::Worsened => write!(f, "Worsened"),
            ComparisonTrend::Stable => write!(f, "Stable"),
        }
    }
}

/// 統計情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    /// 平均（小数1桁）
    pub average: f64,
    /// 最小スコア
    pub best: f64,
    /// 最大スコア
    pub worst: f64,
    pub trend: Trend,
    pub total_scans: usize,
}

impl HistoryStats {
    fn empty() -> Self {
        Self {
            average: 0.0,
            best: 0.0,
            worst: 0.0,
            trend: Trend::NoData,
            total_scans: 0,
        }
    }
}

/// 初回と最新の比較
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub first: ScanRecord,
    pub latest: ScanRecord,
    /// first - latest（正なら改善）
    pub delta: f64,
    pub trend: ComparisonTrend,
}

/// インサイト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub stats: HistoryStats,
    pub comparison: Option<Comparison>,
    pub delta: f64,
    pub most_used_product: Option<String>,
    pub most_common_texture: Option<HairTexture>,
    pub message: String,
}

/// 統計（挿入順で first / last を判定）
pub fn stats(records: &[ScanRecord]) -> HistoryStats {
    let scores: Vec<f64> = records.iter().map(|r| r.damage_score).collect();
    let (first, last) = match (scores.first(), scores.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return HistoryStats::empty(),
    };

    let average = round_to(scores.iter().sum::<f64>() / scores.len() as f64, 1);
    let best = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let worst = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let trend = if scores.len() > 1 && last < first {
        Trend::Improving
    } else {
        Trend::Declining
    };

    HistoryStats {
        average,
        best,
        worst,
        trend,
        total_scans: scores.len(),
    }
}

/// 初回と最新の比較（2件未満は None）
pub fn comparison(records: &[ScanRecord]) -> Option<Comparison> {
    if records.len() < 2 {
        return None;
    }

    // 同時刻は挿入順を維持（安定ソート）
    let mut sorted: Vec<&ScanRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);
    let first = *sorted.first()?;
    let latest = *sorted.last()?;

    let delta = round_to(first.damage_score - latest.damage_score, 2);
    let trend = if delta > 0.0 {
        ComparisonTrend::Improved
    } else if delta < 0.0 {
        ComparisonTrend::Worsened
    } else {
        ComparisonTrend::Stable
    };

    Some(Comparison {
        first: first.clone(),
        latest: latest.clone(),
        delta,
        trend,
    })
}

/// 統計・比較・最頻値とメッセージ
pub fn insights(records: &[ScanRecord]) -> InsightSummary {
    let stats = stats(records);
    let comparison = comparison(records);
    let delta = comparison.as_ref().map(|c| c.delta).unwrap_or(0.0);

    let message = if records.is_empty() {
        "Start analyzing your hair to see insights!".to_string()
    } else {
        insight_message(delta)
    };

    InsightSummary {
        stats,
        comparison,
        delta,
        most_used_product: most_common(records.iter().map(|r| r.recommended_product.clone())),
        most_common_texture: most_common(records.iter().map(|r| r.detected_texture)),
        message,
    }
}

fn insight_message(delta: f64) -> String {
    if delta > 1.0 {
        format!("Great progress! Your hair improved by {:.1} points", delta.abs())
    } else if delta > 0.0 {
        format!("Nice! Your hair is slightly better ({:.1} points improvement)", delta.abs())
    } else if delta < -1.0 {
        format!("Your hair needs attention - worsened by {:.1} points", delta.abs())
    } else if delta < 0.0 {
        format!(
            "Minor decline of {:.1} points - consider adjusting your routine",
            delta.abs()
        )
    } else {
        "Your hair condition is stable. Keep up your routine!".to_string()
    }
}

/// 最頻値（同数なら先に出現した値）
fn most_common<T, I>(values: I) -> Option<T>
where
    T: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, index)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, ia)), (_, (cb, ib))| ca.cmp(cb).then(ib.cmp(ia)))
        .map(|(value, _)| value)
}
