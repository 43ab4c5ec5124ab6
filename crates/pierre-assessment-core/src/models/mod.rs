// ABOUTME: Core data models for the assessment scoring engine
// ABOUTME: Re-exports measurement, score, override, and comparison types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Value types exchanged between the scoring engine and the surrounding
//! application. All models are plain data: they serialize with `serde`,
//! compare with `PartialEq`, and carry no behavior that touches storage.
//!
//! ## Core Models
//!
//! - `MeasurementSet`: raw test results plus demographics for one assessment
//! - `ScoreResult`: computed category scores, composite, grade and risk
//! - `OverrideRecord`: trainer-entered replacements keyed by `ScoreField`
//! - `EffectiveScoreResult`: computed values merged with overrides
//! - `ComparisonResult`: per-category deltas between two effective results

mod comparison;
mod measurement;
mod overrides;
mod score;

pub use comparison::{CategoryDelta, ComparisonResult, HistorySummary, Trend};
pub use measurement::{CategoryId, Demographics, Measurement, MeasurementSet, Sex};
pub use overrides::{OverrideEntry, OverrideRecord, OverrideValue, ScoreField};
pub use score::{
    CategoryScore, CompositeRules, DangerThreshold, EffectiveScoreResult, EffectiveValue, Grade,
    GradeBands, OverallRiskBands, PointBounds, RiskLevel, RiskTrigger, ScoreResult, ValueSource,
};
