// ABOUTME: Integration tests for the trainer override layer
// ABOUTME: Verifies precedence, recomputation from effective categories, and audit preservation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    date, four_category_measurements, four_category_snapshot, BALANCE, ENDURANCE, FLEXIBILITY,
    STRENGTH,
};
use pierre_assessment::errors::{ErrorCode, ErrorKind};
use pierre_assessment::models::{
    EffectiveValue, Grade, OverrideEntry, OverrideRecord, OverrideValue, RiskLevel, RiskTrigger,
    ScoreField, ScoreResult, ValueSource,
};
use pierre_assessment::scoring::{apply_overrides, score};
use serde_json::json;
use uuid::Uuid;

fn computed(raw: [f64; 4]) -> ScoreResult {
    score(
        &four_category_measurements(date(2025, 3, 1), raw),
        &four_category_snapshot(),
    )
    .unwrap()
}

fn record(entries: &[(ScoreField, OverrideValue)]) -> OverrideRecord {
    let author = Uuid::new_v4();
    let mut record = OverrideRecord::new();
    for (field, value) in entries {
        record.set(field.clone(), *value, author).unwrap();
    }
    record
}

#[test]
fn test_category_override_leaves_other_categories_untouched() {
    let result = computed([5.0, 4.0, 3.0, 5.0]);
    let overrides = record(&[(ScoreField::category(STRENGTH), OverrideValue::Points(2))]);

    let effective = apply_overrides(result.clone(), &overrides).unwrap();
    assert_eq!(effective.category_points(STRENGTH), Some(2));
    for id in [FLEXIBILITY, BALANCE, ENDURANCE] {
        assert_eq!(effective.categories[id], result.categories[id]);
    }
    // 2*0.3 + 4*0.3 + 3*0.2 + 5*0.2
    assert!((effective.overall_score.value - 3.4).abs() < 1e-9);
    assert_eq!(
        effective.grade,
        EffectiveValue::recomputed(Grade::Average)
    );
}

#[test]
fn test_explicit_overall_override_beats_recomputation() {
    let result = computed([5.0, 4.0, 3.0, 5.0]);
    let overrides = record(&[
        (ScoreField::category(BALANCE), OverrideValue::Points(1)),
        (ScoreField::OverallScore, OverrideValue::Score(4.6)),
    ]);

    let effective = apply_overrides(result, &overrides).unwrap();
    assert_eq!(effective.overall_score, EffectiveValue::overridden(4.6));
    assert_eq!(effective.grade, EffectiveValue::recomputed(Grade::Excellent));
    // Risk still follows the effective categories: balance at 1 trips its threshold
    assert_eq!(effective.risk, EffectiveValue::recomputed(RiskLevel::High));
    assert_eq!(
        effective.risk_triggers,
        vec![RiskTrigger::Category {
            category: BALANCE.into(),
            points: 1,
            threshold: 2,
            level: RiskLevel::High,
        }]
    );
}

#[test]
fn test_explicit_risk_override_wins_over_veto() {
    let result = computed([5.0, 4.0, 3.0, 5.0]);
    let overrides = record(&[
        (ScoreField::category(BALANCE), OverrideValue::Points(1)),
        (ScoreField::Risk, OverrideValue::Risk(RiskLevel::Moderate)),
    ]);

    let effective = apply_overrides(result, &overrides).unwrap();
    assert_eq!(effective.risk, EffectiveValue::overridden(RiskLevel::Moderate));
    assert_eq!(effective.overall_score.source, ValueSource::Recomputed);
}

#[test]
fn test_grade_override_alone_changes_nothing_else() {
    let result = computed([5.0, 4.0, 3.0, 5.0]);
    let overrides = record(&[(ScoreField::Grade, OverrideValue::Grade(Grade::Excellent))]);

    let effective = apply_overrides(result.clone(), &overrides).unwrap();
    assert_eq!(effective.grade, EffectiveValue::overridden(Grade::Excellent));
    assert_eq!(
        effective.overall_score,
        EffectiveValue::computed(result.overall_score)
    );
    assert_eq!(effective.risk, EffectiveValue::computed(result.risk));
    assert_eq!(effective.categories, result.categories);
}

#[test]
fn test_clearing_override_restores_computed_values() {
    let result = computed([5.0, 4.0, 3.0, 5.0]);
    let mut overrides = record(&[(ScoreField::category(BALANCE), OverrideValue::Points(1))]);
    assert!(apply_overrides(result.clone(), &overrides)
        .unwrap()
        .has_overrides());

    let cleared = overrides.clear(&ScoreField::category(BALANCE));
    assert!(cleared.is_some());
    assert!(overrides.is_empty());

    let effective = apply_overrides(result.clone(), &overrides).unwrap();
    assert!(!effective.has_overrides());
    assert_eq!(effective.categories, result.categories);
    assert_eq!(
        effective.overall_score,
        EffectiveValue::computed(result.overall_score)
    );
}

#[test]
fn test_setting_again_replaces_previous_entry() {
    let author = Uuid::new_v4();
    let mut overrides = OverrideRecord::new();
    let field = ScoreField::category(STRENGTH);
    assert!(overrides
        .set(field.clone(), OverrideValue::Points(2), author)
        .unwrap()
        .is_none());
    let previous = overrides
        .set(field.clone(), OverrideValue::Points(3), author)
        .unwrap()
        .unwrap();

    assert_eq!(previous.value, OverrideValue::Points(2));
    assert_eq!(overrides.get(&field).unwrap().value, OverrideValue::Points(3));
    assert_eq!(overrides.len(), 1);
}

#[test]
fn test_value_must_fit_field() {
    let mut overrides = OverrideRecord::new();
    let error = overrides
        .set(ScoreField::Grade, OverrideValue::Points(3), Uuid::new_v4())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::OverrideValueMismatch);
    assert!(overrides.is_empty());
}

#[test]
fn test_overall_override_must_stay_on_point_scale() {
    let result = computed([5.0, 4.0, 3.0, 5.0]);
    for value in [1e9, 0.5, 5.01] {
        let overrides = record(&[(ScoreField::OverallScore, OverrideValue::Score(value))]);
        let error = apply_overrides(result.clone(), &overrides).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    let overrides = record(&[(ScoreField::OverallScore, OverrideValue::Score(5.0))]);
    let effective = apply_overrides(result, &overrides).unwrap();
    assert_eq!(effective.overall_score, EffectiveValue::overridden(5.0));
}

#[test]
fn test_unknown_field_identifier_is_rejected() {
    let error = "body_fat_percent".parse::<ScoreField>().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownField);

    let stored = json!({
        "body_fat_percent": {
            "value": { "type": "score", "value": 18.0 },
            "set_at": "2025-03-01T10:00:00Z",
            "author": Uuid::nil(),
        }
    });
    assert!(serde_json::from_value::<OverrideRecord>(stored).is_err());
}

#[test]
fn test_stored_record_is_rechecked_before_use() {
    let stored = json!({
        "overall_score": {
            "value": { "type": "grade", "value": "good" },
            "set_at": "2025-03-01T10:00:00Z",
            "author": Uuid::nil(),
        }
    });
    let overrides: OverrideRecord = serde_json::from_value(stored).unwrap();

    let error = apply_overrides(computed([5.0, 4.0, 3.0, 5.0]), &overrides).unwrap_err();
    assert_eq!(error.code, ErrorCode::OverrideValueMismatch);
}

#[test]
fn test_record_serializes_as_field_map() {
    let author = Uuid::nil();
    let mut overrides = OverrideRecord::new();
    let entry = OverrideEntry::new(OverrideValue::Points(4), author).with_note("retested by hand");
    overrides
        .insert(ScoreField::category(BALANCE), entry)
        .unwrap();

    let value = serde_json::to_value(&overrides).unwrap();
    assert_eq!(
        value["category:balance"]["value"],
        json!({ "type": "points", "value": 4 })
    );
    assert_eq!(value["category:balance"]["note"], json!("retested by hand"));

    let back: OverrideRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, overrides);
}

#[test]
fn test_not_administered_category_can_be_overridden() {
    let result = score(
        &four_category_measurements(date(2025, 3, 1), [5.0, 5.0, 5.0, 5.0])
            .not_administered(ENDURANCE),
        &four_category_snapshot(),
    )
    .unwrap();
    assert!((result.overall_score - 5.0).abs() < 1e-9);

    let overrides = record(&[(ScoreField::category(ENDURANCE), OverrideValue::Points(3))]);
    let effective = apply_overrides(result, &overrides).unwrap();
    // (0.3*5 + 0.3*5 + 0.2*5 + 0.2*3) / 1.0
    assert!((effective.overall_score.value - 4.6).abs() < 1e-9);
    assert_eq!(effective.computed.category_points(ENDURANCE), None);
    assert_eq!(effective.category_points(ENDURANCE), Some(3));
}
