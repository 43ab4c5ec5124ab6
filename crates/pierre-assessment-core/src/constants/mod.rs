// ABOUTME: Engine-wide constants for the assessment scoring engine
// ABOUTME: Override field identifiers, numeric tolerances, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants shared by the scoring engine and its collaborators.

/// Field identifiers accepted by the override layer
pub mod fields {
    /// Overall composite score
    pub const OVERALL_SCORE: &str = "overall_score";
    /// Qualitative grade band
    pub const GRADE: &str = "grade";
    /// Risk classification
    pub const RISK: &str = "risk";
    /// Prefix for per-category fields (`category:<id>`)
    pub const CATEGORY_PREFIX: &str = "category:";
}

/// Numeric tolerances
pub mod tolerances {
    /// Maximum deviation between the configured weight total and the sum of weights
    pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
    /// Default epsilon under which a delta counts as unchanged
    pub const DEFAULT_TREND_EPSILON: f64 = 1e-9;
}

/// Environment variables read by the engine configuration
pub mod env_vars {
    /// Path to a JSON or YAML norm table document
    pub const NORMS_PATH: &str = "PIERRE_ASSESSMENT_NORMS_PATH";
    /// Epsilon used when labelling comparison trends
    pub const TREND_EPSILON: &str = "PIERRE_ASSESSMENT_TREND_EPSILON";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Default service name
    pub const PIERRE_ASSESSMENT: &str = "pierre-assessment";
}
