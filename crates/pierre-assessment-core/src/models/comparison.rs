// ABOUTME: Comparison models for tracking assessment scores over time
// ABOUTME: Per-category deltas, trend labels, and multi-assessment history summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::measurement::CategoryId;
use super::score::{Grade, RiskLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of change between two assessments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Score went up by more than epsilon
    Improved,
    /// Score went down by more than epsilon
    Declined,
    /// Change within epsilon
    Unchanged,
}

impl Trend {
    /// Label a delta, treating `|delta| <= epsilon` as unchanged
    #[must_use]
    pub fn from_delta(delta: f64, epsilon: f64) -> Self {
        if delta.abs() <= epsilon {
            Self::Unchanged
        } else if delta > 0.0 {
            Self::Improved
        } else {
            Self::Declined
        }
    }
}

/// Change of one category between two assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    /// Effective points in the earlier assessment
    pub previous: Option<u8>,
    /// Effective points in the later assessment
    pub current: Option<u8>,
    /// `current - previous`, `None` unless both were scored
    pub delta: Option<f64>,
    /// Trend label, `None` unless both were scored
    pub trend: Option<Trend>,
}

/// Directional comparison from an older to a newer effective result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Date of the earlier assessment
    pub previous_date: NaiveDate,
    /// Date of the later assessment
    pub current_date: NaiveDate,
    /// Deltas for every category present in either assessment
    pub categories: BTreeMap<CategoryId, CategoryDelta>,
    /// `current - previous` of the effective overall score
    pub overall_delta: f64,
    /// Trend of the overall score
    pub overall_trend: Trend,
    /// Effective grades (previous, current)
    pub grade_change: (Grade, Grade),
    /// Effective risk levels (previous, current)
    pub risk_change: (RiskLevel, RiskLevel),
}

/// Summary of an ascending-date assessment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of assessments in the history
    pub assessments: usize,
    /// Date of the first assessment
    pub first_date: NaiveDate,
    /// Date of the last assessment
    pub last_date: NaiveDate,
    /// Last overall score minus first overall score
    pub net_overall_delta: f64,
    /// Trend of the net delta
    pub overall_trend: Trend,
    /// Effective grade of the first assessment
    pub first_grade: Grade,
    /// Effective grade of the last assessment
    pub last_grade: Grade,
    /// Pairwise comparisons between consecutive assessments
    pub steps: Vec<ComparisonResult>,
}
