// ABOUTME: Built-in reference battery of norm tables and its default scoring profile
// ABOUTME: Push-up, sit-and-reach, balance, step test, waist-to-height, and grip strength norms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Standard assessment battery
//!
//! Five-point scales (1 = poor, 5 = excellent) with sex- and age-specific
//! cut points adapted from common field-test normative data:
//!
//! - ACSM's Guidelines for Exercise Testing and Prescription (11th ed., 2021)
//!   for push-ups, sit-and-reach, and the 3-minute step test
//! - Springer, B.A., et al. (2007). "Normative values for the unipedal stance
//!   test." *Journal of Geriatric Physical Therapy*, 30(1), 8-15.
//! - Ashwell, M., et al. (2012). "Waist-to-height ratio is a better screening
//!   tool than waist circumference and BMI." *Obesity Reviews*, 13(3), 275-286.

use super::table::{
    CategoryNorms, DemographicBucket, NormEntry, NormTableSnapshot, RawTransform, ValidDomain,
};
use crate::config::ScoringProfile;
use crate::errors::AppResult;
use crate::models::{
    CategoryId, DangerThreshold, GradeBands, OverallRiskBands, PointBounds, RiskLevel, Sex,
};
use std::collections::BTreeMap;

/// Version label of the built-in battery
pub const STANDARD_NORMS_VERSION: &str = "pierre-standard-2025.1";

/// Category identifiers of the built-in battery
pub mod categories {
    /// Push-ups to fatigue (repetitions)
    pub const PUSH_UP: &str = "push_up";
    /// Sit-and-reach (cm)
    pub const SIT_AND_REACH: &str = "sit_and_reach";
    /// Single-leg stance, eyes open (seconds)
    pub const SINGLE_LEG_STANCE: &str = "single_leg_stance";
    /// 3-minute step test, beats counted in the 30 s after stepping
    pub const STEP_TEST: &str = "step_test";
    /// Waist-to-height ratio
    pub const WAIST_TO_HEIGHT: &str = "waist_to_height";
    /// Handgrip strength (kg), scored per kg body mass
    pub const GRIP_STRENGTH: &str = "grip_strength";
}

const FIVE_POINT: PointBounds = PointBounds { min: 1, max: 5 };

/// Age groups shared by most tables: (label, min, max)
const DECADE_GROUPS: [(&str, u8, u8); 5] = [
    ("<30", 0, 29),
    ("30-39", 30, 39),
    ("40-49", 40, 49),
    ("50-59", 50, 59),
    ("60+", 60, u8::MAX),
];

/// Five entries from four ascending cut points where higher raw is better
fn ascending(cuts: [f64; 4]) -> Vec<NormEntry> {
    let mut entries = vec![NormEntry {
        min: None,
        below: Some(cuts[0]),
        points: 1,
    }];
    for (index, pair) in cuts.windows(2).enumerate() {
        entries.push(NormEntry {
            min: Some(pair[0]),
            below: Some(pair[1]),
            points: index as u8 + 2,
        });
    }
    entries.push(NormEntry {
        min: Some(cuts[3]),
        below: None,
        points: 5,
    });
    entries
}

/// Five entries from four ascending cut points where lower raw is better
fn descending(cuts: [f64; 4]) -> Vec<NormEntry> {
    ascending(cuts)
        .into_iter()
        .map(|entry| NormEntry {
            points: 6 - entry.points,
            ..entry
        })
        .collect()
}

fn bucket(
    sex: Option<Sex>,
    (age_label, min_age, max_age): (&str, u8, u8),
    entries: Vec<NormEntry>,
) -> DemographicBucket {
    let label = sex.map_or_else(|| age_label.to_owned(), |sex| format!("{sex} {age_label}"));
    DemographicBucket {
        label,
        sex,
        min_age,
        max_age,
        entries,
    }
}

/// Sex-specific buckets over `groups`, one cut row per group
fn by_sex_and_age(
    groups: &[(&str, u8, u8)],
    male: &[[f64; 4]],
    female: &[[f64; 4]],
    to_entries: fn([f64; 4]) -> Vec<NormEntry>,
) -> Vec<DemographicBucket> {
    let male_buckets = groups
        .iter()
        .zip(male)
        .map(|(group, cuts)| bucket(Some(Sex::Male), *group, to_entries(*cuts)));
    let female_buckets = groups
        .iter()
        .zip(female)
        .map(|(group, cuts)| bucket(Some(Sex::Female), *group, to_entries(*cuts)));
    male_buckets.chain(female_buckets).collect()
}

fn push_up() -> CategoryNorms {
    CategoryNorms {
        name: "Push-ups".to_owned(),
        unit: Some("repetitions".to_owned()),
        domain: ValidDomain {
            min: 0.0,
            max: Some(200.0),
        },
        transform: RawTransform::Identity,
        points: FIVE_POINT,
        buckets: by_sex_and_age(
            &DECADE_GROUPS,
            &[
                [17.0, 22.0, 29.0, 36.0],
                [12.0, 17.0, 22.0, 30.0],
                [10.0, 13.0, 17.0, 25.0],
                [7.0, 10.0, 14.0, 21.0],
                [5.0, 8.0, 11.0, 18.0],
            ],
            &[
                [10.0, 15.0, 21.0, 30.0],
                [8.0, 13.0, 20.0, 27.0],
                [5.0, 11.0, 15.0, 24.0],
                [2.0, 7.0, 11.0, 21.0],
                [1.0, 5.0, 12.0, 17.0],
            ],
            ascending,
        ),
    }
}

fn sit_and_reach() -> CategoryNorms {
    CategoryNorms {
        name: "Sit-and-reach".to_owned(),
        unit: Some("cm".to_owned()),
        domain: ValidDomain {
            min: 0.0,
            max: Some(80.0),
        },
        transform: RawTransform::Identity,
        points: FIVE_POINT,
        buckets: by_sex_and_age(
            &DECADE_GROUPS,
            &[
                [25.0, 30.0, 34.0, 40.0],
                [23.0, 28.0, 33.0, 38.0],
                [18.0, 24.0, 29.0, 35.0],
                [16.0, 24.0, 28.0, 35.0],
                [15.0, 20.0, 25.0, 33.0],
            ],
            &[
                [28.0, 33.0, 37.0, 41.0],
                [27.0, 32.0, 36.0, 41.0],
                [25.0, 30.0, 34.0, 38.0],
                [25.0, 30.0, 33.0, 39.0],
                [23.0, 27.0, 31.0, 35.0],
            ],
            ascending,
        ),
    }
}

fn single_leg_stance() -> CategoryNorms {
    let groups = [
        ("<40", 0, 39),
        ("40-49", 40, 49),
        ("50-59", 50, 59),
        ("60-69", 60, 69),
        ("70+", 70, u8::MAX),
    ];
    let cuts = [
        [15.0, 25.0, 35.0, 43.0],
        [12.0, 22.0, 32.0, 40.0],
        [8.0, 18.0, 28.0, 37.0],
        [5.0, 12.0, 20.0, 27.0],
        [3.0, 7.0, 12.0, 17.0],
    ];
    CategoryNorms {
        name: "Single-leg stance".to_owned(),
        unit: Some("seconds".to_owned()),
        domain: ValidDomain {
            min: 0.0,
            max: Some(120.0),
        },
        transform: RawTransform::Identity,
        points: FIVE_POINT,
        buckets: groups
            .iter()
            .zip(cuts)
            .map(|(group, cuts)| bucket(None, *group, ascending(cuts)))
            .collect(),
    }
}

fn step_test() -> CategoryNorms {
    CategoryNorms {
        name: "3-minute step test".to_owned(),
        unit: Some("beats per 30 s".to_owned()),
        domain: ValidDomain {
            min: 15.0,
            max: Some(110.0),
        },
        transform: RawTransform::RatePerMinute {
            window_seconds: 30.0,
        },
        points: FIVE_POINT,
        buckets: by_sex_and_age(
            &DECADE_GROUPS,
            &[
                [79.0, 90.0, 100.0, 110.0],
                [81.0, 92.0, 102.0, 112.0],
                [84.0, 96.0, 104.0, 115.0],
                [85.0, 98.0, 106.0, 117.0],
                [86.0, 98.0, 106.0, 117.0],
            ],
            &[
                [85.0, 99.0, 109.0, 118.0],
                [88.0, 100.0, 111.0, 120.0],
                [90.0, 104.0, 113.0, 122.0],
                [94.0, 106.0, 117.0, 124.0],
                [95.0, 106.0, 115.0, 122.0],
            ],
            descending,
        ),
    }
}

fn waist_to_height() -> CategoryNorms {
    CategoryNorms {
        name: "Waist-to-height ratio".to_owned(),
        unit: None,
        domain: ValidDomain {
            min: 0.2,
            max: Some(1.5),
        },
        transform: RawTransform::Identity,
        points: FIVE_POINT,
        buckets: vec![bucket(
            None,
            ("all ages", 0, u8::MAX),
            descending([0.43, 0.50, 0.55, 0.60]),
        )],
    }
}

fn grip_strength() -> CategoryNorms {
    let groups = [("<40", 0, 39), ("40-59", 40, 59), ("60+", 60, u8::MAX)];
    CategoryNorms {
        name: "Handgrip strength".to_owned(),
        unit: Some("kg".to_owned()),
        domain: ValidDomain {
            min: 0.0,
            max: Some(120.0),
        },
        transform: RawTransform::PerBodyMass,
        points: FIVE_POINT,
        buckets: by_sex_and_age(
            &groups,
            &[
                [0.45, 0.55, 0.65, 0.75],
                [0.40, 0.50, 0.60, 0.70],
                [0.33, 0.43, 0.52, 0.62],
            ],
            &[
                [0.30, 0.38, 0.46, 0.55],
                [0.27, 0.35, 0.43, 0.51],
                [0.22, 0.29, 0.37, 0.45],
            ],
            ascending,
        ),
    }
}

fn standard_profile() -> ScoringProfile {
    use categories::{
        GRIP_STRENGTH, PUSH_UP, SINGLE_LEG_STANCE, SIT_AND_REACH, STEP_TEST, WAIST_TO_HEIGHT,
    };

    let weights = [
        (PUSH_UP, 0.20),
        (SIT_AND_REACH, 0.15),
        (SINGLE_LEG_STANCE, 0.15),
        (STEP_TEST, 0.20),
        (WAIST_TO_HEIGHT, 0.15),
        (GRIP_STRENGTH, 0.15),
    ];
    let danger = [
        (STEP_TEST, 2, RiskLevel::High),
        (WAIST_TO_HEIGHT, 2, RiskLevel::High),
        (SINGLE_LEG_STANCE, 2, RiskLevel::Moderate),
    ];

    ScoringProfile {
        weight_total: 1.0,
        weights: weights
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
        danger_thresholds: danger
            .into_iter()
            .map(|(id, below, level)| (CategoryId::from(id), DangerThreshold { below, level }))
            .collect(),
    }
}

impl NormTableSnapshot {
    /// Built-in standard battery
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the built-in tables fail validation
    pub fn standard() -> AppResult<Self> {
        let categories: BTreeMap<CategoryId, CategoryNorms> = [
            (categories::PUSH_UP, push_up()),
            (categories::SIT_AND_REACH, sit_and_reach()),
            (categories::SINGLE_LEG_STANCE, single_leg_stance()),
            (categories::STEP_TEST, step_test()),
            (categories::WAIST_TO_HEIGHT, waist_to_height()),
            (categories::GRIP_STRENGTH, grip_strength()),
        ]
        .into_iter()
        .map(|(id, norms)| (CategoryId::from(id), norms))
        .collect();

        Self::new(STANDARD_NORMS_VERSION, categories, standard_profile())
    }
}
