// ABOUTME: Norm table types mapping category, demographic bucket and value range to points
// ABOUTME: Validates partitions without gaps or overlaps and performs unambiguous lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Norm Tables
//!
//! A [`NormTableSnapshot`] is one immutable, versioned document holding every
//! category's norm table together with the [`ScoringProfile`]. Within each
//! demographic bucket the entries partition the lookup domain into half-open
//! ranges `[min, below)`, so any valid value matches exactly one entry.

use crate::config::{ConfigError, ScoringProfile};
use crate::errors::{AppError, AppResult};
use crate::models::{CategoryId, Demographics, PointBounds, RiskLevel, Sex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One row of a norm table: `[min, below)` maps to `points`
///
/// An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormEntry {
    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Exclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<f64>,
    /// Points awarded
    pub points: u8,
}

impl NormEntry {
    /// Whether `value` falls in `[min, below)`
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.below.is_none_or(|below| value < below)
    }
}

/// Demographic bucket and its entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicBucket {
    /// Human-readable label recorded on category scores (e.g. `male 30-39`)
    pub label: String,
    /// Sex this bucket applies to; both when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Inclusive lower age
    pub min_age: u8,
    /// Inclusive upper age
    pub max_age: u8,
    /// Entries partitioning the lookup domain
    pub entries: Vec<NormEntry>,
}

impl DemographicBucket {
    /// Whether the bucket applies to `demographics`
    #[must_use]
    pub fn matches(&self, demographics: &Demographics) -> bool {
        self.sex.is_none_or(|sex| sex == demographics.sex)
            && (self.min_age..=self.max_age).contains(&demographics.age_years)
    }

    fn overlaps(&self, other: &Self) -> bool {
        let sexes_meet = match (self.sex, other.sex) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };
        sexes_meet && self.min_age <= other.max_age && other.min_age <= self.max_age
    }
}

/// Category-specific pre-transform applied to the raw value before lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawTransform {
    /// Look up the raw value as measured
    #[default]
    Identity,
    /// Divide by body mass in kg (e.g. grip strength per kg)
    PerBodyMass,
    /// Convert a count over `window_seconds` into a per-minute rate
    RatePerMinute {
        /// Length of the counting window
        window_seconds: f64,
    },
}

impl RawTransform {
    /// Apply the transform
    ///
    /// # Errors
    ///
    /// Returns a validation error if body mass is required but missing or not positive
    pub fn apply(self, category: &str, raw: f64, demographics: &Demographics) -> AppResult<f64> {
        match self {
            Self::Identity => Ok(raw),
            Self::PerBodyMass => match demographics.body_mass_kg {
                Some(mass) if mass.is_finite() && mass > 0.0 => Ok(raw / mass),
                Some(mass) => Err(AppError::validation(format!(
                    "body mass must be positive to score '{category}', got {mass}"
                ))
                .with_category(category)),
                None => Err(AppError::validation(format!(
                    "body mass is required to score '{category}'"
                ))
                .with_category(category)),
            },
            Self::RatePerMinute { window_seconds } => Ok(raw * 60.0 / window_seconds),
        }
    }

    /// Lowest lookup value a raw value of `raw_min` can produce
    fn lowest_lookup(self, raw_min: f64) -> f64 {
        match self {
            Self::Identity => raw_min,
            Self::PerBodyMass if raw_min >= 0.0 => 0.0,
            Self::PerBodyMass => f64::NEG_INFINITY,
            Self::RatePerMinute { window_seconds } => raw_min * 60.0 / window_seconds,
        }
    }

    /// Highest lookup value a raw value of `raw_max` can produce
    fn highest_lookup(self, raw_max: Option<f64>) -> f64 {
        match (self, raw_max) {
            (Self::Identity, Some(max)) => max,
            (Self::RatePerMinute { window_seconds }, Some(max)) => max * 60.0 / window_seconds,
            _ => f64::INFINITY,
        }
    }
}

/// Physically valid range of raw values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidDomain {
    /// Inclusive minimum
    pub min: f64,
    /// Inclusive maximum, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ValidDomain {
    /// Check a raw value; never clamps
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is not finite or outside the domain
    pub fn check(&self, category: &str, value: f64) -> AppResult<()> {
        if !value.is_finite() {
            return Err(AppError::out_of_domain(category, value, "is not a finite number"));
        }
        if value < self.min {
            return Err(AppError::out_of_domain(
                category,
                value,
                &format!("is below the minimum of {}", self.min),
            ));
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(AppError::out_of_domain(
                    category,
                    value,
                    &format!("is above the maximum of {max}"),
                ));
            }
        }
        Ok(())
    }
}

/// Norm table of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNorms {
    /// Display name
    pub name: String,
    /// Unit of the raw value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Physically valid raw values
    pub domain: ValidDomain,
    /// Transform applied before lookup
    #[serde(default)]
    pub transform: RawTransform,
    /// Point scale
    pub points: PointBounds,
    /// Demographic buckets
    pub buckets: Vec<DemographicBucket>,
}

/// Result of a successful norm lookup
#[derive(Debug, Clone, PartialEq)]
pub struct NormMatch<'a> {
    /// Bucket that matched the demographics
    pub bucket: &'a DemographicBucket,
    /// Points of the single matching entry
    pub points: u8,
}

impl CategoryNorms {
    /// Resolve the single bucket for `demographics`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no bucket or more than one bucket matches
    pub fn resolve_bucket(
        &self,
        category: &str,
        demographics: &Demographics,
    ) -> AppResult<&DemographicBucket> {
        let mut matching = self.buckets.iter().filter(|b| b.matches(demographics));
        let bucket = matching.next().ok_or_else(|| {
            AppError::no_matching_entry(
                category,
                format!(
                    "no norm bucket for {} aged {} in '{category}'",
                    demographics.sex, demographics.age_years
                ),
            )
        })?;
        if let Some(other) = matching.next() {
            return Err(AppError::from(ConfigError::NormTableOverlap(format!(
                "buckets '{}' and '{}' of '{category}' both match",
                bucket.label, other.label
            )))
            .with_category(category));
        }
        Ok(bucket)
    }

    /// Look up the points for an already transformed value
    ///
    /// # Errors
    ///
    /// Returns a configuration error if zero or several entries match
    pub fn lookup(
        &self,
        category: &str,
        lookup_value: f64,
        demographics: &Demographics,
    ) -> AppResult<NormMatch<'_>> {
        let bucket = self.resolve_bucket(category, demographics)?;
        let mut matching = bucket.entries.iter().filter(|e| e.contains(lookup_value));
        let entry = matching.next().ok_or_else(|| {
            AppError::no_matching_entry(
                category,
                format!(
                    "no entry in bucket '{}' of '{category}' covers {lookup_value}",
                    bucket.label
                ),
            )
        })?;
        if matching.next().is_some() {
            return Err(AppError::from(ConfigError::NormTableOverlap(format!(
                "several entries in bucket '{}' of '{category}' cover {lookup_value}",
                bucket.label
            )))
            .with_category(category));
        }

        debug!(
            category,
            bucket = %bucket.label,
            lookup_value,
            points = entry.points,
            "Norm table lookup"
        );
        Ok(NormMatch {
            bucket,
            points: entry.points,
        })
    }

    fn validate(&self, category: &str) -> Result<(), ConfigError> {
        if self.points.min > self.points.max {
            return Err(ConfigError::InvalidRange(format!(
                "'{category}': points.min must be <= points.max"
            )));
        }
        if !self.domain.min.is_finite()
            || self
                .domain
                .max
                .is_some_and(|max| !max.is_finite() || max < self.domain.min)
        {
            return Err(ConfigError::InvalidRange(format!(
                "'{category}': domain must be a non-empty finite range"
            )));
        }
        if let RawTransform::RatePerMinute { window_seconds } = self.transform {
            if !window_seconds.is_finite() || window_seconds <= 0.0 {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "'{category}': window_seconds must be positive"
                )));
            }
        }
        if self.buckets.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "'{category}': at least one demographic bucket"
            )));
        }

        for (index, bucket) in self.buckets.iter().enumerate() {
            if bucket.min_age > bucket.max_age {
                return Err(ConfigError::InvalidRange(format!(
                    "'{category}' bucket '{}': min_age must be <= max_age",
                    bucket.label
                )));
            }
            if let Some(other) = self.buckets[index + 1..]
                .iter()
                .find(|other| bucket.overlaps(other))
            {
                return Err(ConfigError::NormTableOverlap(format!(
                    "'{category}' buckets '{}' and '{}' overlap",
                    bucket.label, other.label
                )));
            }
            self.validate_entries(category, bucket)?;
        }
        Ok(())
    }

    /// Entries must tile `[lowest lookup, highest lookup]` edge to edge
    fn validate_entries(
        &self,
        category: &str,
        bucket: &DemographicBucket,
    ) -> Result<(), ConfigError> {
        let context = || format!("'{category}' bucket '{}'", bucket.label);

        let mut entries = bucket.entries.clone();
        if entries.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "{}: at least one entry",
                context()
            )));
        }
        for entry in &entries {
            if entry.min.is_some_and(|v| !v.is_finite())
                || entry.below.is_some_and(|v| !v.is_finite())
            {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{}: entry bounds must be finite",
                    context()
                )));
            }
            if let (Some(min), Some(below)) = (entry.min, entry.below) {
                if min >= below {
                    return Err(ConfigError::InvalidRange(format!(
                        "{}: entry [{min}, {below}) is empty",
                        context()
                    )));
                }
            }
            if !self.points.contains(entry.points) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{}: {} points outside {}..={}",
                    context(),
                    entry.points,
                    self.points.min,
                    self.points.max
                )));
            }
        }

        entries.sort_by(|a, b| {
            a.min
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&b.min.unwrap_or(f64::NEG_INFINITY))
        });

        let lowest = self.transform.lowest_lookup(self.domain.min);
        if let Some(first_min) = entries[0].min {
            if first_min > lowest {
                return Err(ConfigError::NormTableGap(format!(
                    "{}: values below {first_min} are not covered",
                    context()
                )));
            }
        }

        for pair in entries.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            match (current.below, next.min) {
                (Some(below), Some(next_min)) if below < next_min => {
                    return Err(ConfigError::NormTableGap(format!(
                        "{}: [{below}, {next_min}) is not covered",
                        context()
                    )));
                }
                (Some(below), Some(next_min)) if below > next_min => {
                    return Err(ConfigError::NormTableOverlap(format!(
                        "{}: ranges overlap at [{next_min}, {below})",
                        context()
                    )));
                }
                (Some(_), Some(_)) => {}
                _ => {
                    return Err(ConfigError::NormTableOverlap(format!(
                        "{}: only the first entry may be unbounded below and only the last unbounded above",
                        context()
                    )));
                }
            }
        }

        let highest = self.transform.highest_lookup(self.domain.max);
        if let Some(last_below) = entries[entries.len() - 1].below {
            if last_below <= highest {
                return Err(ConfigError::NormTableGap(format!(
                    "{}: values from {last_below} upward are not covered",
                    context()
                )));
            }
        }
        Ok(())
    }
}

/// Immutable, versioned norm tables plus scoring profile
///
/// Scoring binds to one snapshot per call so a reload can never mix table
/// versions inside a single result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormTableSnapshot {
    /// Version label recorded on every score result
    pub version: String,
    /// Norm table per category
    pub categories: BTreeMap<CategoryId, CategoryNorms>,
    /// Weights, cutoffs and risk rules
    pub profile: ScoringProfile,
}

impl NormTableSnapshot {
    /// Build and validate a snapshot
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the snapshot is inconsistent
    pub fn new(
        version: impl Into<String>,
        categories: BTreeMap<CategoryId, CategoryNorms>,
        profile: ScoringProfile,
    ) -> AppResult<Self> {
        let snapshot = Self {
            version: version.into(),
            categories,
            profile,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if parsing or validation fails
    pub fn from_json(document: &str) -> AppResult<Self> {
        let snapshot: Self = serde_json::from_str(document)
            .map_err(|e| ConfigError::Parse(format!("norm table JSON: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse and validate a YAML document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if parsing or validation fails
    pub fn from_yaml(document: &str) -> AppResult<Self> {
        let snapshot: Self = serde_yaml::from_str(document)
            .map_err(|e| ConfigError::Parse(format!("norm table YAML: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Load a JSON (`.json`) or YAML (`.yaml`/`.yml`) document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file can't be read, parsed or validated
    pub fn load_file(path: &Path) -> AppResult<Self> {
        let document = fs::read_to_string(path).map_err(ConfigError::from)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&document),
            Some("json") => Self::from_json(&document),
            other => Err(ConfigError::Parse(format!(
                "unsupported norm table extension {other:?} for {}",
                path.display()
            ))
            .into()),
        }
    }

    /// Norm table of a category
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&CategoryNorms> {
        self.categories.get(category)
    }

    /// Validate every table and cross-check the profile against the category set
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first inconsistency
    pub fn validate(&self) -> AppResult<()> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::MissingField("version".to_owned()).into());
        }
        if self.categories.is_empty() {
            return Err(ConfigError::MissingField("at least one category".to_owned()).into());
        }
        self.profile.validate()?;

        for (category, norms) in &self.categories {
            norms.validate(category.as_str())?;
            if self.profile.weight(category.as_str()).is_none() {
                return Err(ConfigError::InvalidWeights(format!(
                    "no weight configured for '{category}'"
                ))
                .into());
            }
        }
        if let Some(stray) = self
            .profile
            .weights
            .keys()
            .find(|category| !self.categories.contains_key(category.as_str()))
        {
            return Err(ConfigError::InvalidWeights(format!(
                "weight configured for unknown category '{stray}'"
            ))
            .into());
        }
        for (category, threshold) in &self.profile.danger_thresholds {
            let norms = self.categories.get(category.as_str()).ok_or_else(|| {
                ConfigError::InvalidRange(format!(
                    "danger threshold configured for unknown category '{category}'"
                ))
            })?;
            if threshold.level == RiskLevel::Low {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "danger threshold for '{category}' must raise risk above low"
                ))
                .into());
            }
            if threshold.below <= norms.points.min || threshold.below > norms.points.max {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "danger threshold {} for '{category}' must lie in {}..={}",
                    threshold.below,
                    norms.points.min.saturating_add(1),
                    norms.points.max
                ))
                .into());
            }
        }
        Ok(())
    }
}
