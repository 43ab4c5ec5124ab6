// ABOUTME: Scoring profile with category weights, grade cutoffs, and risk rules
// ABOUTME: Declarative part of a norm table snapshot consumed by the composite scorer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Scoring profile: how category points combine into a composite, a grade,
//! and a risk classification.

use super::error::ConfigError;
use crate::constants::tolerances::WEIGHT_SUM_TOLERANCE;
use crate::models::{CategoryId, CompositeRules, DangerThreshold, GradeBands, OverallRiskBands};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const fn default_weight_total() -> f64 {
    1.0
}

/// Weights, cutoffs and thresholds for one norm table version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// Total the weights must add up to (1.0 or e.g. 100.0)
    #[serde(default = "default_weight_total")]
    pub weight_total: f64,
    /// Composite weight per category
    pub weights: BTreeMap<CategoryId, f64>,
    /// Grade cutoffs on the overall score
    pub grade_bands: GradeBands,
    /// Risk bands on the overall score
    pub overall_risk: OverallRiskBands,
    /// Per-category danger thresholds for the risk veto
    #[serde(default)]
    pub danger_thresholds: BTreeMap<CategoryId, DangerThreshold>,
}

impl ScoringProfile {
    /// Rules stored on every score result
    #[must_use]
    pub const fn rules(&self) -> CompositeRules {
        CompositeRules {
            grade_bands: self.grade_bands,
            overall_risk: self.overall_risk,
        }
    }

    /// Weight of a category
    #[must_use]
    pub fn weight(&self, category: &str) -> Option<f64> {
        self.weights.get(category).copied()
    }

    /// Danger threshold of a category
    #[must_use]
    pub fn danger_threshold(&self, category: &str) -> Option<DangerThreshold> {
        self.danger_thresholds.get(category).copied()
    }

    /// Validate internal consistency of the profile
    ///
    /// Cross-checks against the category set live in the norm table snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if weights are not positive or don't sum to
    /// `weight_total`, or if cutoffs are out of order
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weight_total.is_finite() || self.weight_total <= 0.0 {
            return Err(ConfigError::InvalidWeights(format!(
                "weight_total must be positive, got {}",
                self.weight_total
            )));
        }

        if let Some((category, weight)) = self
            .weights
            .iter()
            .find(|(_, weight)| !weight.is_finite() || **weight <= 0.0)
        {
            return Err(ConfigError::InvalidWeights(format!(
                "weight for '{category}' must be positive, got {weight}"
            )));
        }

        let weight_sum: f64 = self.weights.values().sum();
        if (weight_sum - self.weight_total).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "weights sum to {weight_sum}, expected {}",
                self.weight_total
            )));
        }

        let bands = &self.grade_bands;
        let cutoffs = [
            bands.excellent_min,
            bands.good_min,
            bands.average_min,
            bands.below_average_min,
        ];
        if cutoffs.iter().any(|cutoff| !cutoff.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "grade cutoffs must be finite".to_owned(),
            ));
        }
        if cutoffs.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::InvalidRange(
                "grade cutoffs must be strictly descending from excellent to below_average"
                    .to_owned(),
            ));
        }

        let risk = &self.overall_risk;
        if !risk.high_below.is_finite() || !risk.moderate_below.is_finite() {
            return Err(ConfigError::ValueOutOfRange(
                "overall risk bands must be finite".to_owned(),
            ));
        }
        if risk.high_below > risk.moderate_below {
            return Err(ConfigError::InvalidRange(
                "overall_risk.high_below must be <= overall_risk.moderate_below".to_owned(),
            ));
        }

        Ok(())
    }
}
