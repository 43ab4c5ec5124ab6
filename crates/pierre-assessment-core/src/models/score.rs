// ABOUTME: Score result models: category scores, composite rules, grade and risk classification
// ABOUTME: Holds both the computed result and the override-merged effective view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::measurement::CategoryId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Qualitative grade band, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Poor fitness
    Poor,
    /// Below average fitness
    BelowAverage,
    /// Average fitness
    Average,
    /// Good fitness
    Good,
    /// Excellent fitness
    Excellent,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Poor => "Poor",
            Self::BelowAverage => "Below Average",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

/// Risk classification, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No risk condition triggered
    Low,
    /// Elevated risk
    Moderate,
    /// High risk, referral or modified programming advised
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Moderate => f.write_str("moderate"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Inclusive bounds of a category's point scale (e.g. 1-5 or 0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBounds {
    /// Lowest attainable points
    pub min: u8,
    /// Highest attainable points
    pub max: u8,
}

impl PointBounds {
    /// Whether `points` lies within the bounds
    #[must_use]
    pub const fn contains(self, points: u8) -> bool {
        points >= self.min && points <= self.max
    }
}

/// Points strictly below `below` raise risk to at least `level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerThreshold {
    /// Exclusive point threshold
    pub below: u8,
    /// Risk level raised when triggered
    pub level: RiskLevel,
}

impl DangerThreshold {
    /// Whether `points` trips this threshold
    #[must_use]
    pub const fn is_triggered_by(self, points: u8) -> bool {
        points < self.below
    }
}

/// Minimum overall score for each grade; anything lower is `Poor`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBands {
    /// Minimum score graded Excellent
    pub excellent_min: f64,
    /// Minimum score graded Good
    pub good_min: f64,
    /// Minimum score graded Average
    pub average_min: f64,
    /// Minimum score graded Below Average
    pub below_average_min: f64,
}

impl GradeBands {
    /// Band an overall score
    #[must_use]
    pub fn grade_for(&self, overall_score: f64) -> Grade {
        match overall_score {
            s if s >= self.excellent_min => Grade::Excellent,
            s if s >= self.good_min => Grade::Good,
            s if s >= self.average_min => Grade::Average,
            s if s >= self.below_average_min => Grade::BelowAverage,
            _ => Grade::Poor,
        }
    }
}

/// Overall-score thresholds that raise risk on their own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallRiskBands {
    /// Overall scores strictly below this are high risk
    pub high_below: f64,
    /// Overall scores strictly below this are at least moderate risk
    pub moderate_below: f64,
}

impl OverallRiskBands {
    /// Risk implied by the overall score alone
    #[must_use]
    pub fn level_for(&self, overall_score: f64) -> RiskLevel {
        if overall_score < self.high_below {
            RiskLevel::High
        } else if overall_score < self.moderate_below {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

/// Rules the composite scorer needs besides category scores
///
/// Stored on every `ScoreResult` so overrides can recompute the composite
/// without going back to the norm table snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeRules {
    /// Grade cutoffs
    pub grade_bands: GradeBands,
    /// Overall-score risk bands
    pub overall_risk: OverallRiskBands,
}

/// Condition that contributed to a risk classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskTrigger {
    /// A single category fell below its danger threshold
    Category {
        /// Category that tripped
        category: CategoryId,
        /// Points scored
        points: u8,
        /// Threshold it fell below
        threshold: u8,
        /// Level raised
        level: RiskLevel,
    },
    /// The overall score fell into a risk band
    OverallBand {
        /// Level raised
        level: RiskLevel,
    },
}

impl RiskTrigger {
    /// Level raised by this trigger
    #[must_use]
    pub const fn level(&self) -> RiskLevel {
        match self {
            Self::Category { level, .. } | Self::OverallBand { level } => *level,
        }
    }
}

/// Score for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category identifier
    pub category: CategoryId,
    /// Raw measured value, `None` when not administered
    pub raw_value: Option<f64>,
    /// Value looked up in the norm table after the category transform
    pub lookup_value: Option<f64>,
    /// Point score, `None` when not administered and not overridden
    pub points: Option<u8>,
    /// Point scale of the category
    pub bounds: PointBounds,
    /// Norm bucket label used for the lookup
    pub bucket: Option<String>,
    /// Composite weight of the category
    pub weight: f64,
    /// Danger threshold for the risk veto
    pub danger_threshold: Option<DangerThreshold>,
    /// Whether `points` came from a trainer override
    pub is_override: bool,
}

impl CategoryScore {
    /// Whether the category contributes to the composite
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.points.is_some()
    }
}

/// Computed result of one scoring call
///
/// Never mutated after construction: it is the audit trail of what was
/// actually measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Version of the norm table snapshot that produced this result
    pub norm_table_version: String,
    /// Assessment date
    pub assessed_on: NaiveDate,
    /// Per-category scores, including not-administered categories
    pub categories: BTreeMap<CategoryId, CategoryScore>,
    /// Weighted composite over administered categories
    pub overall_score: f64,
    /// Grade band of `overall_score`
    pub grade: Grade,
    /// Most severe triggered risk condition
    pub risk: RiskLevel,
    /// Conditions that raised risk above `Low`
    pub risk_triggers: Vec<RiskTrigger>,
    /// Rules used for composite, grade and overall risk
    pub rules: CompositeRules,
}

impl ScoreResult {
    /// Points of a category, if scored
    #[must_use]
    pub fn category_points(&self, category: &str) -> Option<u8> {
        self.categories.get(category).and_then(|score| score.points)
    }
}

/// Where an effective value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Originally computed value
    Computed,
    /// Recomputed from effective category scores
    Recomputed,
    /// Explicit trainer override
    Overridden,
}

/// Value paired with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveValue<T> {
    /// Effective value
    pub value: T,
    /// Provenance of `value`
    pub source: ValueSource,
}

impl<T> EffectiveValue<T> {
    /// Wrap an originally computed value
    pub const fn computed(value: T) -> Self {
        Self {
            value,
            source: ValueSource::Computed,
        }
    }

    /// Wrap a value recomputed from effective categories
    pub const fn recomputed(value: T) -> Self {
        Self {
            value,
            source: ValueSource::Recomputed,
        }
    }

    /// Wrap an explicit override
    pub const fn overridden(value: T) -> Self {
        Self {
            value,
            source: ValueSource::Overridden,
        }
    }
}

/// Computed result merged with trainer overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveScoreResult {
    /// Untouched computed result
    pub computed: ScoreResult,
    /// Effective per-category scores
    pub categories: BTreeMap<CategoryId, CategoryScore>,
    /// Effective overall score
    pub overall_score: EffectiveValue<f64>,
    /// Effective grade
    pub grade: EffectiveValue<Grade>,
    /// Effective risk classification
    pub risk: EffectiveValue<RiskLevel>,
    /// Risk conditions evaluated on the effective categories
    pub risk_triggers: Vec<RiskTrigger>,
}

impl EffectiveScoreResult {
    /// Assessment date
    #[must_use]
    pub const fn assessed_on(&self) -> NaiveDate {
        self.computed.assessed_on
    }

    /// Effective points of a category, if scored
    #[must_use]
    pub fn category_points(&self, category: &str) -> Option<u8> {
        self.categories.get(category).and_then(|score| score.points)
    }

    /// Whether any field differs from the computed result because of overrides
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        self.overall_score.source != ValueSource::Computed
            || self.grade.source != ValueSource::Computed
            || self.risk.source != ValueSource::Computed
            || self.categories.values().any(|score| score.is_override)
    }
}
