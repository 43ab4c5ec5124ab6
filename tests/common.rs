// ABOUTME: Shared fixtures for assessment engine integration tests
// ABOUTME: Provides a small four-category norm table, measurement builders, and quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_assessment`

use chrono::NaiveDate;
use pierre_assessment::config::ScoringProfile;
use pierre_assessment::models::{
    CategoryId, DangerThreshold, Demographics, GradeBands, MeasurementSet, OverallRiskBands,
    PointBounds, RiskLevel, Sex,
};
use pierre_assessment::norms::{
    CategoryNorms, DemographicBucket, NormEntry, NormTableSnapshot, RawTransform, ValidDomain,
};
use std::collections::BTreeMap;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const STRENGTH: &str = "strength";
pub const FLEXIBILITY: &str = "flexibility";
pub const BALANCE: &str = "balance";
pub const ENDURANCE: &str = "endurance";

/// Raw value `v` in `[k, k + 1)` scores `k` points, clamped to 1..=5 at the open ends
fn unit_steps() -> Vec<NormEntry> {
    vec![
        NormEntry {
            min: None,
            below: Some(2.0),
            points: 1,
        },
        NormEntry {
            min: Some(2.0),
            below: Some(3.0),
            points: 2,
        },
        NormEntry {
            min: Some(3.0),
            below: Some(4.0),
            points: 3,
        },
        NormEntry {
            min: Some(4.0),
            below: Some(5.0),
            points: 4,
        },
        NormEntry {
            min: Some(5.0),
            below: None,
            points: 5,
        },
    ]
}

pub fn step_norms(name: &str) -> CategoryNorms {
    CategoryNorms {
        name: name.to_owned(),
        unit: None,
        domain: ValidDomain {
            min: 0.0,
            max: Some(10.0),
        },
        transform: RawTransform::Identity,
        points: PointBounds { min: 1, max: 5 },
        buckets: vec![DemographicBucket {
            label: "all".to_owned(),
            sex: None,
            min_age: 0,
            max_age: u8::MAX,
            entries: unit_steps(),
        }],
    }
}

pub fn four_category_profile() -> ScoringProfile {
    ScoringProfile {
        weight_total: 1.0,
        weights: [
            (STRENGTH, 0.3),
            (FLEXIBILITY, 0.3),
            (BALANCE, 0.2),
            (ENDURANCE, 0.2),
        ]
        .into_iter()
        .map(|(id, weight)| (CategoryId::from(id), weight))
        .collect(),
        grade_bands: GradeBands {
            excellent_min: 4.5,
            good_min: 3.5,
            average_min: 2.5,
            below_average_min: 1.5,
        },
        overall_risk: OverallRiskBands {
            high_below: 1.5,
            moderate_below: 2.5,
        },
        danger_thresholds: [(
            CategoryId::from(BALANCE),
            DangerThreshold {
                below: 2,
                level: RiskLevel::High,
            },
        )]
        .into_iter()
        .collect(),
    }
}

/// Four categories weighted 0.3/0.3/0.2/0.2 where raw values map straight to points
pub fn four_category_snapshot() -> NormTableSnapshot {
    let categories: BTreeMap<CategoryId, CategoryNorms> =
        [STRENGTH, FLEXIBILITY, BALANCE, ENDURANCE]
            .into_iter()
            .map(|id| (CategoryId::from(id), step_norms(id)))
            .collect();
    NormTableSnapshot::new("test-1", categories, four_category_profile()).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Four-category measurement set with the given raw values
pub fn four_category_measurements(
    on: NaiveDate,
    [strength, flexibility, balance, endurance]: [f64; 4],
) -> MeasurementSet {
    MeasurementSet::new(on, Demographics::new(40, Sex::Female))
        .with_value(STRENGTH, strength)
        .with_value(FLEXIBILITY, flexibility)
        .with_value(BALANCE, balance)
        .with_value(ENDURANCE, endurance)
}

/// Standard battery measurements for a 35-year-old man scoring 5 in every category
pub fn excellent_standard_measurements(on: NaiveDate) -> MeasurementSet {
    MeasurementSet::new(on, Demographics::new(35, Sex::Male).with_body_mass(80.0))
        .with_value("push_up", 35.0)
        .with_value("sit_and_reach", 40.0)
        .with_value("single_leg_stance", 45.0)
        .with_value("step_test", 38.0)
        .with_value("waist_to_height", 0.42)
        .with_value("grip_strength", 64.0)
}
