// ABOUTME: Comparison of effective score results: per-category deltas and trend labels
// ABOUTME: Pairwise from older to newer, with repeated pairwise steps across a history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{CategoryDelta, ComparisonResult, EffectiveScoreResult, HistorySummary, Trend};
use std::collections::BTreeSet;

/// Compare two effective results, `current - previous`
///
/// Categories present in either result are reported; a delta is only given
/// when both sides were scored. Swapping the arguments negates every delta.
#[must_use]
pub fn compare(
    previous: &EffectiveScoreResult,
    current: &EffectiveScoreResult,
    trend_epsilon: f64,
) -> ComparisonResult {
    let ids: BTreeSet<_> = previous
        .categories
        .keys()
        .chain(current.categories.keys())
        .collect();

    let categories = ids
        .into_iter()
        .map(|id| {
            let before = previous.category_points(id.as_str());
            let after = current.category_points(id.as_str());
            let delta = before
                .zip(after)
                .map(|(before, after)| f64::from(after) - f64::from(before));
            (
                id.clone(),
                CategoryDelta {
                    previous: before,
                    current: after,
                    delta,
                    trend: delta.map(|delta| Trend::from_delta(delta, trend_epsilon)),
                },
            )
        })
        .collect();

    let overall_delta = current.overall_score.value - previous.overall_score.value;
    ComparisonResult {
        previous_date: previous.assessed_on(),
        current_date: current.assessed_on(),
        categories,
        overall_delta,
        overall_trend: Trend::from_delta(overall_delta, trend_epsilon),
        grade_change: (previous.grade.value, current.grade.value),
        risk_change: (previous.risk.value, current.risk.value),
    }
}

/// Pairwise comparisons across an ascending-date history
///
/// A history of zero or one result yields no steps.
///
/// # Errors
///
/// Returns a validation error if the results are not in ascending date order
pub fn compare_history(
    history: &[EffectiveScoreResult],
    trend_epsilon: f64,
) -> AppResult<Vec<ComparisonResult>> {
    if let Some(pair) = history
        .windows(2)
        .find(|pair| pair[1].assessed_on() < pair[0].assessed_on())
    {
        return Err(AppError::validation(format!(
            "assessment history must be in ascending date order: {} precedes {}",
            pair[0].assessed_on(),
            pair[1].assessed_on()
        )));
    }

    Ok(history
        .windows(2)
        .map(|pair| compare(&pair[0], &pair[1], trend_epsilon))
        .collect())
}

/// Net change from the first to the last result of a history
///
/// # Errors
///
/// Returns a validation error if the history is empty or out of order
pub fn summarize_history(
    history: &[EffectiveScoreResult],
    trend_epsilon: f64,
) -> AppResult<HistorySummary> {
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return Err(AppError::validation(
            "cannot summarize an empty assessment history",
        ));
    };
    let steps = compare_history(history, trend_epsilon)?;

    let net_overall_delta = last.overall_score.value - first.overall_score.value;
    Ok(HistorySummary {
        assessments: history.len(),
        first_date: first.assessed_on(),
        last_date: last.assessed_on(),
        net_overall_delta,
        overall_trend: Trend::from_delta(net_overall_delta, trend_epsilon),
        first_grade: first.grade.value,
        last_grade: last.grade.value,
        steps,
    })
}
