// ABOUTME: Composite scorer aggregating category points into overall score, grade, and risk
// ABOUTME: Renormalizes weights over administered categories and lets any category veto risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Composite Scoring
//!
//! Formula: `overall = Σ(wᵢ × pᵢ) / Σwᵢ` over scored categories only, so a
//! category that was not administered drops out of both sums and the overall
//! score stays on the point scale regardless of coverage.
//!
//! Risk is the most severe of:
//! - every category danger threshold that was tripped
//! - the band the overall score falls into
//!
//! A healthy overall score never averages a tripped threshold away.

use crate::errors::{AppError, AppResult};
use crate::models::{CategoryId, CategoryScore, CompositeRules, Grade, RiskLevel, RiskTrigger};
use std::collections::BTreeMap;
use tracing::warn;

/// Overall score, grade, and risk derived from category scores
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOutcome {
    /// Weighted composite over scored categories
    pub overall_score: f64,
    /// Grade band of the overall score
    pub grade: Grade,
    /// Most severe triggered risk
    pub risk: RiskLevel,
    /// Conditions that raised risk above `Low`
    pub risk_triggers: Vec<RiskTrigger>,
}

/// Weighted mean of scored categories
///
/// # Errors
///
/// Returns a validation error if no category was scored
pub fn weighted_overall(scores: &BTreeMap<CategoryId, CategoryScore>) -> AppResult<f64> {
    let (weighted_sum, weight_sum) = scores
        .values()
        .filter_map(|score| score.points.map(|points| (score.weight, f64::from(points))))
        .fold((0.0, 0.0), |(weighted, total), (weight, points)| {
            (weighted + weight * points, total + weight)
        });

    if weight_sum <= 0.0 {
        return Err(AppError::validation(
            "no category was administered; an overall score needs at least one",
        ));
    }
    Ok(weighted_sum / weight_sum)
}

/// Evaluate the category veto and the overall band
///
/// Returns the most severe level together with every condition above `Low`.
#[must_use]
pub fn assess_risk(
    scores: &BTreeMap<CategoryId, CategoryScore>,
    overall_score: f64,
    rules: &CompositeRules,
) -> (RiskLevel, Vec<RiskTrigger>) {
    let mut triggers: Vec<RiskTrigger> = scores
        .values()
        .filter_map(|score| {
            let points = score.points?;
            let threshold = score.danger_threshold?;
            threshold
                .is_triggered_by(points)
                .then(|| RiskTrigger::Category {
                    category: score.category.clone(),
                    points,
                    threshold: threshold.below,
                    level: threshold.level,
                })
        })
        .collect();

    let band = rules.overall_risk.level_for(overall_score);
    if band > RiskLevel::Low {
        triggers.push(RiskTrigger::OverallBand { level: band });
    }

    let risk = triggers
        .iter()
        .map(RiskTrigger::level)
        .max()
        .unwrap_or(RiskLevel::Low);

    if risk > band {
        warn!(
            risk = %risk,
            overall_band = %band,
            overall_score,
            "Category danger threshold escalated risk above the overall band"
        );
    }
    (risk, triggers)
}

/// Aggregate category scores into the composite outcome
///
/// Deterministic: iteration follows category id order, so identical inputs
/// produce bit-identical sums.
///
/// # Errors
///
/// Returns a validation error if no category was scored
pub fn compute_composite(
    scores: &BTreeMap<CategoryId, CategoryScore>,
    rules: &CompositeRules,
) -> AppResult<CompositeOutcome> {
    let overall_score = weighted_overall(scores)?;
    let (risk, risk_triggers) = assess_risk(scores, overall_score, rules);
    Ok(CompositeOutcome {
        overall_score,
        grade: rules.grade_bands.grade_for(overall_score),
        risk,
        risk_triggers,
    })
}
