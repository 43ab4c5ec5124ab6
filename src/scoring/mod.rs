// ABOUTME: Scoring module: category scorers, composite scorer, override layer, and comparison
// ABOUTME: Pure functions over immutable inputs plus the orchestrating scoring service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Per-category scoring
pub mod category;
/// Score result comparison
pub mod comparison;
/// Weighted composite, grade, and risk
pub mod composite;
/// Trainer override merging
pub mod overrides;
/// Orchestrating service
pub mod service;

pub use category::{score_category, CategoryScorer};
pub use comparison::{compare, compare_history, summarize_history};
pub use composite::{assess_risk, compute_composite, weighted_overall, CompositeOutcome};
pub use overrides::apply_overrides;
pub use service::{score, AssessmentScoringService};
