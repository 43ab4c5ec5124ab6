// ABOUTME: Integration tests for norm table validation, lookup coverage, and document loading
// ABOUTME: Verifies every valid raw value resolves to exactly one in-bounds norm entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{four_category_snapshot, BALANCE, STRENGTH};
use pierre_assessment::errors::{ErrorCode, ErrorKind};
use pierre_assessment::models::{CategoryId, Demographics, RiskLevel, Sex};
use pierre_assessment::norms::{categories, DemographicBucket, NormTableSnapshot};
use pierre_assessment::scoring::score_category;
use std::io::Write;

const AGES: [u8; 9] = [18, 29, 30, 45, 59, 60, 69, 70, 95];

#[test]
fn test_every_valid_raw_value_scores_within_bounds() {
    let snapshot = NormTableSnapshot::standard().unwrap();

    for (category, norms) in &snapshot.categories {
        let max = norms.domain.max.unwrap();
        let step = (max - norms.domain.min) / 400.0;
        for sex in [Sex::Female, Sex::Male] {
            for age in AGES {
                let demographics = Demographics::new(age, sex).with_body_mass(72.5);
                for i in 0..=400 {
                    let raw = (norms.domain.min + step * f64::from(i)).min(max);
                    let score =
                        score_category(&snapshot, category.as_str(), raw, &demographics)
                            .unwrap_or_else(|e| panic!("{category} {sex} {age} {raw}: {e}"));
                    let points = score.points.unwrap();
                    assert!(
                        norms.points.contains(points),
                        "{category} scored {points} for {raw}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_domain_edges_are_valid() {
    let snapshot = NormTableSnapshot::standard().unwrap();
    let demographics = Demographics::new(40, Sex::Female).with_body_mass(60.0);
    for (category, norms) in &snapshot.categories {
        for raw in [norms.domain.min, norms.domain.max.unwrap()] {
            assert!(score_category(&snapshot, category.as_str(), raw, &demographics).is_ok());
        }
    }
}

#[test]
fn test_standard_battery_profile() {
    let snapshot = NormTableSnapshot::standard().unwrap();
    let ids: Vec<&str> = snapshot.categories.keys().map(CategoryId::as_str).collect();
    assert_eq!(
        ids,
        vec![
            categories::GRIP_STRENGTH,
            categories::PUSH_UP,
            categories::SINGLE_LEG_STANCE,
            categories::SIT_AND_REACH,
            categories::STEP_TEST,
            categories::WAIST_TO_HEIGHT,
        ]
    );
    let total: f64 = snapshot.profile.weights.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(
        snapshot
            .profile
            .danger_threshold(categories::WAIST_TO_HEIGHT)
            .map(|t| t.level),
        Some(RiskLevel::High)
    );
}

#[test]
fn test_overlapping_buckets_are_rejected() {
    let mut snapshot = four_category_snapshot();
    let norms = snapshot.categories.get_mut(STRENGTH).unwrap();
    let mut extra: DemographicBucket = norms.buckets[0].clone();
    extra.label = "female 30-50".to_owned();
    extra.sex = Some(Sex::Female);
    extra.min_age = 30;
    extra.max_age = 50;
    norms.buckets.push(extra);

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::NormTableOverlap);
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_uncovered_demographics_have_no_matching_entry() {
    let mut snapshot = four_category_snapshot();
    let norms = snapshot.categories.get_mut(STRENGTH).unwrap();
    norms.buckets[0].min_age = 18;
    snapshot.validate().unwrap();

    let error = score_category(&snapshot, STRENGTH, 3.0, &Demographics::new(16, Sex::Male))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::NoMatchingNormEntry);
    assert!(!error.kind().is_retryable());
}

#[test]
fn test_entry_gap_is_rejected() {
    let mut snapshot = four_category_snapshot();
    let entries = &mut snapshot.categories.get_mut(BALANCE).unwrap().buckets[0].entries;
    entries[1].below = Some(2.5);

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::NormTableGap);
}

#[test]
fn test_entry_points_outside_bounds_are_rejected() {
    let mut snapshot = four_category_snapshot();
    snapshot.categories.get_mut(BALANCE).unwrap().buckets[0].entries[4].points = 6;

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_weights_must_sum_to_total() {
    let mut snapshot = four_category_snapshot();
    snapshot
        .profile
        .weights
        .insert(CategoryId::from(STRENGTH), 0.35);

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidWeights);
}

#[test]
fn test_weights_must_cover_exactly_the_categories() {
    let mut snapshot = four_category_snapshot();
    let weight = snapshot.profile.weights.remove(STRENGTH).unwrap();
    snapshot
        .profile
        .weights
        .insert(CategoryId::from("vertical_jump"), weight);

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidWeights);
}

#[test]
fn test_danger_threshold_must_fit_point_scale() {
    let mut snapshot = four_category_snapshot();
    snapshot
        .profile
        .danger_thresholds
        .get_mut(BALANCE)
        .unwrap()
        .below = 1;

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_danger_threshold_must_raise_risk() {
    let mut snapshot = four_category_snapshot();
    snapshot
        .profile
        .danger_thresholds
        .get_mut(BALANCE)
        .unwrap()
        .level = RiskLevel::Low;

    let error = snapshot.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_json_document_round_trip() {
    let snapshot = four_category_snapshot();
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(serde_json::to_string_pretty(&snapshot).unwrap().as_bytes())
        .unwrap();

    let loaded = NormTableSnapshot::load_file(file.path()).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_yaml_document_round_trip() {
    let snapshot = NormTableSnapshot::standard().unwrap();
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(serde_yaml::to_string(&snapshot).unwrap().as_bytes())
        .unwrap();

    let loaded = NormTableSnapshot::load_file(file.path()).unwrap();
    assert_eq!(loaded.version, snapshot.version);
    assert_eq!(loaded.categories.len(), snapshot.categories.len());
}

#[test]
fn test_invalid_document_is_rejected_on_load() {
    let mut snapshot = four_category_snapshot();
    snapshot.profile.weights.clear();
    let document = serde_json::to_string(&snapshot).unwrap();

    let error = NormTableSnapshot::from_json(&document).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    let error = NormTableSnapshot::load_file(file.path()).unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
}
