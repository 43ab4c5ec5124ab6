// ABOUTME: Integration tests for comparing effective score results over time
// ABOUTME: Verifies delta antisymmetry, trend labels, and ascending history handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{
    date, four_category_measurements, four_category_snapshot, BALANCE, ENDURANCE, FLEXIBILITY,
    STRENGTH,
};
use pierre_assessment::errors::ErrorKind;
use pierre_assessment::models::{
    EffectiveScoreResult, Grade, OverrideRecord, OverrideValue, ScoreField, Trend,
};
use pierre_assessment::scoring::{
    apply_overrides, compare, compare_history, score, summarize_history,
};
use uuid::Uuid;

const EPSILON: f64 = 1e-9;

fn effective(on: NaiveDate, raw: [f64; 4]) -> EffectiveScoreResult {
    let result = score(
        &four_category_measurements(on, raw),
        &four_category_snapshot(),
    )
    .unwrap();
    apply_overrides(result, &OverrideRecord::new()).unwrap()
}

#[test]
fn test_deltas_are_current_minus_previous() {
    let march = effective(date(2025, 3, 1), [3.0, 4.0, 3.0, 5.0]);
    let june = effective(date(2025, 6, 1), [5.0, 4.0, 2.0, 5.0]);

    let comparison = compare(&march, &june, EPSILON);
    assert_eq!(comparison.previous_date, date(2025, 3, 1));
    assert_eq!(comparison.current_date, date(2025, 6, 1));

    let strength = &comparison.categories[STRENGTH];
    assert_eq!((strength.previous, strength.current), (Some(3), Some(5)));
    assert_eq!(strength.delta, Some(2.0));
    assert_eq!(strength.trend, Some(Trend::Improved));
    assert_eq!(comparison.categories[FLEXIBILITY].trend, Some(Trend::Unchanged));
    assert_eq!(comparison.categories[BALANCE].trend, Some(Trend::Declined));

    // 0.3*2 - 0.2*1
    assert!((comparison.overall_delta - 0.4).abs() < 1e-9);
    assert_eq!(comparison.overall_trend, Trend::Improved);
}

#[test]
fn test_swapping_arguments_negates_every_delta() {
    let a = effective(date(2025, 3, 1), [3.0, 4.5, 1.0, 5.0]);
    let b = effective(date(2025, 6, 1), [5.0, 2.0, 4.0, 3.0]);

    let forward = compare(&a, &b, EPSILON);
    let backward = compare(&b, &a, EPSILON);

    assert_eq!(forward.overall_delta, -backward.overall_delta);
    for (id, delta) in &forward.categories {
        let reverse = &backward.categories[id];
        assert_eq!(delta.delta.map(|d| -d), reverse.delta);
        assert_eq!(delta.previous, reverse.current);
    }
}

#[test]
fn test_uses_effective_not_computed_values() {
    let march = effective(date(2025, 3, 1), [5.0, 4.0, 3.0, 5.0]);
    let june = score(
        &four_category_measurements(date(2025, 6, 1), [5.0, 4.0, 3.0, 5.0]),
        &four_category_snapshot(),
    )
    .unwrap();
    let mut overrides = OverrideRecord::new();
    overrides
        .set(
            ScoreField::category(ENDURANCE),
            OverrideValue::Points(3),
            Uuid::new_v4(),
        )
        .unwrap();
    let june = apply_overrides(june, &overrides).unwrap();

    let comparison = compare(&march, &june, EPSILON);
    assert_eq!(comparison.categories[ENDURANCE].delta, Some(-2.0));
    assert_eq!(comparison.overall_trend, Trend::Declined);
}

#[test]
fn test_not_administered_category_has_no_delta() {
    let march = effective(date(2025, 3, 1), [5.0, 4.0, 3.0, 5.0]);
    let june = apply_overrides(
        score(
            &four_category_measurements(date(2025, 6, 1), [5.0, 4.0, 3.0, 5.0])
                .not_administered(BALANCE),
            &four_category_snapshot(),
        )
        .unwrap(),
        &OverrideRecord::new(),
    )
    .unwrap();

    let delta = &compare(&march, &june, EPSILON).categories[BALANCE];
    assert_eq!(delta.previous, Some(3));
    assert_eq!(delta.current, None);
    assert_eq!(delta.delta, None);
    assert_eq!(delta.trend, None);
}

#[test]
fn test_epsilon_absorbs_floating_point_noise() {
    let a = effective(date(2025, 3, 1), [5.0, 4.0, 3.0, 5.0]);
    let mut b = effective(date(2025, 6, 1), [5.0, 4.0, 3.0, 5.0]);
    b.overall_score.value += 1e-12;

    assert_eq!(compare(&a, &b, EPSILON).overall_trend, Trend::Unchanged);
    assert_eq!(compare(&a, &b, 0.0).overall_trend, Trend::Improved);
}

#[test]
fn test_history_is_compared_pairwise() {
    let history = vec![
        effective(date(2025, 1, 10), [2.0, 2.0, 2.0, 2.0]),
        effective(date(2025, 4, 10), [3.0, 3.0, 3.0, 3.0]),
        effective(date(2025, 7, 10), [3.0, 3.0, 3.0, 3.0]),
        effective(date(2025, 10, 10), [5.0, 5.0, 5.0, 5.0]),
    ];

    let steps = compare_history(&history, EPSILON).unwrap();
    let trends: Vec<Trend> = steps.iter().map(|step| step.overall_trend).collect();
    assert_eq!(
        trends,
        vec![Trend::Improved, Trend::Unchanged, Trend::Improved]
    );
    assert_eq!(steps[1].previous_date, date(2025, 4, 10));

    let summary = summarize_history(&history, EPSILON).unwrap();
    assert_eq!(summary.assessments, 4);
    assert!((summary.net_overall_delta - 3.0).abs() < 1e-9);
    assert_eq!(summary.first_grade, Grade::BelowAverage);
    assert_eq!(summary.last_grade, Grade::Excellent);
    assert_eq!(summary.steps, steps);
}

#[test]
fn test_out_of_order_history_is_rejected() {
    let history = vec![
        effective(date(2025, 6, 1), [3.0, 3.0, 3.0, 3.0]),
        effective(date(2025, 3, 1), [4.0, 4.0, 4.0, 4.0]),
    ];
    let error = compare_history(&history, EPSILON).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_short_histories() {
    let single = vec![effective(date(2025, 3, 1), [3.0, 3.0, 3.0, 3.0])];
    assert!(compare_history(&single, EPSILON).unwrap().is_empty());

    let summary = summarize_history(&single, EPSILON).unwrap();
    assert_eq!(summary.overall_trend, Trend::Unchanged);
    assert!(summary.steps.is_empty());

    let error = summarize_history(&[], EPSILON).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
}
