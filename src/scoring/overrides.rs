// ABOUTME: Override layer merging trainer overrides into an effective score result
// ABOUTME: Explicit override beats recomputation from effective categories, which beats computed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Override Layer
//!
//! Precedence per field, most specific first:
//!
//! 1. explicit override in the [`OverrideRecord`]
//! 2. value recomputed from effective category scores, whenever something
//!    upstream of the field was overridden
//! 3. originally computed value
//!
//! The computed [`ScoreResult`] is carried along untouched.

use super::composite::{assess_risk, weighted_overall};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    CategoryId, CategoryScore, EffectiveScoreResult, EffectiveValue, Grade, OverrideRecord,
    OverrideValue, RiskLevel, ScoreField, ScoreResult,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Merge `overrides` into `result`
///
/// # Errors
///
/// Returns an unknown-field error if an override names a category the
/// result doesn't have, and a validation error if an override value doesn't
/// fit its field or lies outside the point bounds of its category (or, for
/// the overall score, of all categories)
pub fn apply_overrides(
    result: ScoreResult,
    overrides: &OverrideRecord,
) -> AppResult<EffectiveScoreResult> {
    overrides.check()?;

    let mut categories = result.categories.clone();
    let mut category_overridden = false;
    let mut overall_override = None;
    let mut grade_override = None;
    let mut risk_override = None;

    for (field, entry) in overrides.iter() {
        match (field, entry.value) {
            (ScoreField::Category(id), OverrideValue::Points(points)) => {
                override_category(&mut categories, id, points)?;
                category_overridden = true;
            }
            (ScoreField::OverallScore, OverrideValue::Score(score)) => {
                check_overall(&result, score)?;
                overall_override = Some(score);
            }
            (ScoreField::Grade, OverrideValue::Grade(grade)) => grade_override = Some(grade),
            (ScoreField::Risk, OverrideValue::Risk(risk)) => risk_override = Some(risk),
            (field, value) => {
                return Err(AppError::new(
                    ErrorCode::OverrideValueMismatch,
                    format!("override value {value:?} cannot be applied to '{field}'"),
                )
                .with_field(field.to_string()));
            }
        }
    }

    let overall_score = match overall_override {
        Some(score) => EffectiveValue::overridden(score),
        None if category_overridden => EffectiveValue::recomputed(weighted_overall(&categories)?),
        None => EffectiveValue::computed(result.overall_score),
    };
    let upstream_changed = category_overridden || overall_override.is_some();

    let (derived_grade, derived_risk, risk_triggers) = if upstream_changed {
        let (risk, triggers) = assess_risk(&categories, overall_score.value, &result.rules);
        (
            EffectiveValue::recomputed(result.rules.grade_bands.grade_for(overall_score.value)),
            EffectiveValue::recomputed(risk),
            triggers,
        )
    } else {
        (
            EffectiveValue::computed(result.grade),
            EffectiveValue::computed(result.risk),
            result.risk_triggers.clone(),
        )
    };

    let grade: EffectiveValue<Grade> =
        grade_override.map_or(derived_grade, EffectiveValue::overridden);
    let risk: EffectiveValue<RiskLevel> =
        risk_override.map_or(derived_risk, EffectiveValue::overridden);

    debug!(
        overrides = overrides.len(),
        overall_score = overall_score.value,
        grade = %grade.value,
        risk = %risk.value,
        "Applied overrides"
    );

    Ok(EffectiveScoreResult {
        computed: result,
        categories,
        overall_score,
        grade,
        risk,
        risk_triggers,
    })
}

/// Overall overrides must stay on the point scale spanned by the categories
fn check_overall(result: &ScoreResult, score: f64) -> AppResult<()> {
    let bounds = result.categories.values().map(|category| category.bounds);
    let (Some(min), Some(max)) = (
        bounds.clone().map(|b| b.min).min(),
        bounds.map(|b| b.max).max(),
    ) else {
        return Ok(());
    };
    if score < f64::from(min) || score > f64::from(max) {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            format!("overall score override {score} is outside {min}..={max}"),
        )
        .with_field(ScoreField::OverallScore.to_string()));
    }
    Ok(())
}

fn override_category(
    categories: &mut BTreeMap<CategoryId, CategoryScore>,
    id: &CategoryId,
    points: u8,
) -> AppResult<()> {
    let field = ScoreField::Category(id.clone());
    let score = categories
        .get_mut(id.as_str())
        .ok_or_else(|| AppError::unknown_field(field.to_string()).with_category(id.as_str()))?;

    if !score.bounds.contains(points) {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            format!(
                "override of {points} points for '{id}' is outside {}..={}",
                score.bounds.min, score.bounds.max
            ),
        )
        .with_field(field.to_string())
        .with_category(id.as_str()));
    }
    if score.points.is_none() {
        warn!(
            category = %id,
            points,
            "Override sets points for a category that was not administered"
        );
    }

    score.points = Some(points);
    score.is_override = true;
    Ok(())
}
