// ABOUTME: Assessment scoring service orchestrating category, composite, override and comparison steps
// ABOUTME: Binds each scoring call to one norm table snapshot and never mutates its inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Assessment Scoring Service
//!
//! Explicit, side-effect-free entry points invoked by the surrounding
//! application: on measurement entry ([`AssessmentScoringService::score`]),
//! on override ([`super::apply_overrides`]), and on
//! read-time recomputation ([`AssessmentScoringService::rescore`]).
//! Persistence of measurement sets and override records stays with the caller.

use super::category::CategoryScorer;
use super::comparison;
use super::composite::compute_composite;
use super::overrides;
use crate::config::{ComparisonConfig, EngineConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CategoryId, CategoryScore, ComparisonResult, EffectiveScoreResult, HistorySummary,
    Measurement, MeasurementSet, OverrideRecord, ScoreResult,
};
use crate::norms::{NormTableSnapshot, NormTableSource};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, info_span};

/// Score a measurement set against one snapshot
///
/// Every category of the snapshot must carry a value or an explicit
/// not-administered marker. Either a complete result is returned or an error;
/// there are no partial results.
///
/// # Errors
///
/// Returns a validation error for missing categories, categories the snapshot
/// doesn't define, out-of-domain values, or when nothing was administered, and
/// a configuration error when the snapshot is inconsistent or its norm tables
/// can't resolve a lookup
pub fn score(measurements: &MeasurementSet, snapshot: &NormTableSnapshot) -> AppResult<ScoreResult> {
    let span = info_span!(
        "score_assessment",
        norm_table_version = %snapshot.version,
        assessed_on = %measurements.assessed_on,
    );
    let _entered = span.enter();

    // Snapshots are plain data and may have been edited after loading
    snapshot.validate()?;

    if let Some(unknown) = measurements
        .measurements
        .keys()
        .find(|id| snapshot.category(id.as_str()).is_none())
    {
        return Err(AppError::validation(format!(
            "category '{unknown}' is not defined in norm tables {}",
            snapshot.version
        ))
        .with_category(unknown.as_str()));
    }

    let categories = snapshot
        .categories
        .keys()
        .map(|id| score_one(measurements, snapshot, id).map(|score| (id.clone(), score)))
        .collect::<AppResult<BTreeMap<_, _>>>()?;

    let rules = snapshot.profile.rules();
    let outcome = compute_composite(&categories, &rules)?;

    info!(
        overall_score = outcome.overall_score,
        grade = %outcome.grade,
        risk = %outcome.risk,
        administered = categories.values().filter(|s| s.is_scored()).count(),
        "Scored assessment"
    );

    Ok(ScoreResult {
        norm_table_version: snapshot.version.clone(),
        assessed_on: measurements.assessed_on,
        categories,
        overall_score: outcome.overall_score,
        grade: outcome.grade,
        risk: outcome.risk,
        risk_triggers: outcome.risk_triggers,
        rules,
    })
}

fn score_one(
    measurements: &MeasurementSet,
    snapshot: &NormTableSnapshot,
    id: &CategoryId,
) -> AppResult<CategoryScore> {
    let scorer = CategoryScorer::new(snapshot, id.as_str())?;
    match measurements.get(id.as_str()) {
        Some(Measurement::Administered(raw)) => scorer.score(raw, &measurements.demographics),
        Some(Measurement::NotAdministered) => Ok(scorer.not_administered()),
        None => Err(AppError::missing_category(id.as_str())),
    }
}

/// Stateless facade over a norm table source and comparison settings
#[derive(Debug, Clone)]
pub struct AssessmentScoringService {
    norms: Arc<NormTableSource>,
    comparison: ComparisonConfig,
}

impl AssessmentScoringService {
    /// Create a service over an existing source
    #[must_use]
    pub const fn new(norms: Arc<NormTableSource>, comparison: ComparisonConfig) -> Self {
        Self { norms, comparison }
    }

    /// Create a service from engine configuration
    ///
    /// Loads the configured norm table document, or the built-in battery when
    /// no path is set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration or the norm tables are invalid
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        config.validate()?;
        let source = match &config.norm_table_path {
            Some(path) => NormTableSource::load_file(path)?,
            None => NormTableSource::standard()?,
        };
        Ok(Self::new(Arc::new(source), config.comparison))
    }

    /// Norm table source, for hot reload by the owner
    #[must_use]
    pub const fn norms(&self) -> &Arc<NormTableSource> {
        &self.norms
    }

    /// Snapshot the next scoring call would bind to
    ///
    /// # Errors
    ///
    /// Returns an internal error if the source lock was poisoned
    pub fn snapshot(&self) -> AppResult<Arc<NormTableSnapshot>> {
        self.norms.current()
    }

    /// Score a measurement set against the current snapshot
    ///
    /// # Errors
    ///
    /// See [`score`]
    pub fn score(&self, measurements: &MeasurementSet) -> AppResult<ScoreResult> {
        score(measurements, &*self.snapshot()?)
    }

    /// Score and merge overrides in one step
    ///
    /// # Errors
    ///
    /// See [`score`] and [`overrides::apply_overrides`]
    pub fn score_effective(
        &self,
        measurements: &MeasurementSet,
        overrides: Option<&OverrideRecord>,
    ) -> AppResult<EffectiveScoreResult> {
        let result = self.score(measurements)?;
        let empty = OverrideRecord::new();
        overrides::apply_overrides(result, overrides.unwrap_or(&empty))
    }

    /// Recompute after raw measurements changed, re-applying the existing overrides
    ///
    /// # Errors
    ///
    /// See [`score`] and [`overrides::apply_overrides`]
    pub fn rescore(
        &self,
        measurements: &MeasurementSet,
        overrides: &OverrideRecord,
    ) -> AppResult<EffectiveScoreResult> {
        info!(
            assessed_on = %measurements.assessed_on,
            overrides = overrides.len(),
            "Rescoring assessment"
        );
        self.score_effective(measurements, Some(overrides))
    }

    /// Compare an older and a newer effective result
    #[must_use]
    pub fn compare(
        &self,
        previous: &EffectiveScoreResult,
        current: &EffectiveScoreResult,
    ) -> ComparisonResult {
        comparison::compare(previous, current, self.comparison.trend_epsilon)
    }

    /// Pairwise comparisons across an ascending-date history
    ///
    /// # Errors
    ///
    /// Returns a validation error if the history is out of order
    pub fn compare_history(
        &self,
        history: &[EffectiveScoreResult],
    ) -> AppResult<Vec<ComparisonResult>> {
        comparison::compare_history(history, self.comparison.trend_epsilon)
    }

    /// Net change across an ascending-date history
    ///
    /// # Errors
    ///
    /// Returns a validation error if the history is empty or out of order
    pub fn summarize_history(&self, history: &[EffectiveScoreResult]) -> AppResult<HistorySummary> {
        comparison::summarize_history(history, self.comparison.trend_epsilon)
    }

    /// Score many measurement sets in parallel against a single snapshot
    ///
    /// Each set succeeds or fails on its own; order matches the input.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the source lock was poisoned
    pub fn score_batch(
        &self,
        batch: &[MeasurementSet],
    ) -> AppResult<Vec<AppResult<ScoreResult>>> {
        let snapshot = self.snapshot()?;
        info!(
            assessments = batch.len(),
            norm_table_version = %snapshot.version,
            "Scoring assessment batch"
        );
        Ok(batch
            .par_iter()
            .map(|measurements| score(measurements, &snapshot))
            .collect())
    }
}
