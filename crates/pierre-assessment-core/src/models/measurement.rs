// ABOUTME: Measurement set model with per-category raw values and client demographics
// ABOUTME: Distinguishes administered tests from tests explicitly marked not administered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a standardized physical test category (e.g. `push_up`)
///
/// The category set is configuration: any identifier present in the active
/// norm tables is a valid category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Biological sex used to select norm buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Female norms
    Female,
    /// Male norms
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => f.write_str("female"),
            Self::Male => f.write_str("male"),
        }
    }
}

/// Client attributes used to resolve a norm bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    /// Age in whole years at the assessment date
    pub age_years: u8,
    /// Biological sex
    pub sex: Sex,
    /// Body mass in kg, required by categories normalized by body mass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_mass_kg: Option<f64>,
}

impl Demographics {
    /// Create demographics without body mass
    #[must_use]
    pub const fn new(age_years: u8, sex: Sex) -> Self {
        Self {
            age_years,
            sex,
            body_mass_kg: None,
        }
    }

    /// Attach body mass in kg
    #[must_use]
    pub const fn with_body_mass(mut self, body_mass_kg: f64) -> Self {
        self.body_mass_kg = Some(body_mass_kg);
        self
    }
}

/// Outcome of one test within an assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measurement {
    /// Test was administered and produced this raw value
    Administered(f64),
    /// Test was deliberately skipped
    NotAdministered,
}

/// Raw inputs of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    /// Date the tests were administered
    pub assessed_on: NaiveDate,
    /// Client attributes for norm bucket selection
    pub demographics: Demographics,
    /// One entry per category in the active norm tables
    #[serde(default)]
    pub measurements: BTreeMap<CategoryId, Measurement>,
}

impl MeasurementSet {
    /// Create an empty measurement set
    #[must_use]
    pub const fn new(assessed_on: NaiveDate, demographics: Demographics) -> Self {
        Self {
            assessed_on,
            demographics,
            measurements: BTreeMap::new(),
        }
    }

    /// Record a raw value for a category
    #[must_use]
    pub fn with_value(mut self, category: impl Into<CategoryId>, value: f64) -> Self {
        self.measurements
            .insert(category.into(), Measurement::Administered(value));
        self
    }

    /// Mark a category as not administered
    #[must_use]
    pub fn not_administered(mut self, category: impl Into<CategoryId>) -> Self {
        self.measurements
            .insert(category.into(), Measurement::NotAdministered);
        self
    }

    /// Measurement for a category, if recorded
    #[must_use]
    pub fn get(&self, category: &str) -> Option<Measurement> {
        self.measurements.get(category).copied()
    }
}
