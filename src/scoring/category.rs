// ABOUTME: Category scorer turning one raw measurement into a bounded point score
// ABOUTME: Checks the valid domain, applies the category transform, then looks up the norm table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ConfigError;
use crate::errors::{AppError, AppResult};
use crate::models::{CategoryId, CategoryScore, DangerThreshold, Demographics};
use crate::norms::{CategoryNorms, NormTableSnapshot};

/// Scorer for one category, bound to a snapshot
///
/// Pure: holds only borrowed configuration and never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScorer<'a> {
    category: &'a CategoryId,
    norms: &'a CategoryNorms,
    weight: f64,
    danger_threshold: Option<DangerThreshold>,
}

impl<'a> CategoryScorer<'a> {
    /// Resolve the scorer for `category` in `snapshot`
    ///
    /// # Errors
    ///
    /// Returns a validation error if the snapshot has no table for the
    /// category, or a configuration error if it has no weight for it
    pub fn new(snapshot: &'a NormTableSnapshot, category: &str) -> AppResult<Self> {
        let (category, norms) = snapshot
            .categories
            .get_key_value(category)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "category '{category}' is not defined in norm tables {}",
                    snapshot.version
                ))
                .with_category(category)
            })?;
        let weight = snapshot.profile.weight(category.as_str()).ok_or_else(|| {
            AppError::from(ConfigError::InvalidWeights(format!(
                "no weight configured for '{category}'"
            )))
            .with_category(category.as_str())
        })?;

        Ok(Self {
            category,
            norms,
            weight,
            danger_threshold: snapshot.profile.danger_threshold(category.as_str()),
        })
    }

    /// Score an administered measurement
    ///
    /// # Errors
    ///
    /// Returns a validation error if the raw value is outside the valid domain
    /// or the transform lacks inputs, and a configuration error if no single
    /// norm entry matches
    pub fn score(&self, raw_value: f64, demographics: &Demographics) -> AppResult<CategoryScore> {
        let id = self.category.as_str();
        self.norms.domain.check(id, raw_value)?;
        let lookup_value = self.norms.transform.apply(id, raw_value, demographics)?;
        let matched = self.norms.lookup(id, lookup_value, demographics)?;

        Ok(CategoryScore {
            category: self.category.clone(),
            raw_value: Some(raw_value),
            lookup_value: Some(lookup_value),
            points: Some(matched.points),
            bounds: self.norms.points,
            bucket: Some(matched.bucket.label.clone()),
            weight: self.weight,
            danger_threshold: self.danger_threshold,
            is_override: false,
        })
    }

    /// Placeholder score for a category explicitly marked not administered
    #[must_use]
    pub fn not_administered(&self) -> CategoryScore {
        CategoryScore {
            category: self.category.clone(),
            raw_value: None,
            lookup_value: None,
            points: None,
            bounds: self.norms.points,
            bucket: None,
            weight: self.weight,
            danger_threshold: self.danger_threshold,
            is_override: false,
        }
    }
}

/// Score one raw measurement against `snapshot`
///
/// # Errors
///
/// See [`CategoryScorer::new`] and [`CategoryScorer::score`]
pub fn score_category(
    snapshot: &NormTableSnapshot,
    category: &str,
    raw_value: f64,
    demographics: &Demographics,
) -> AppResult<CategoryScore> {
    CategoryScorer::new(snapshot, category)?.score(raw_value, demographics)
}
