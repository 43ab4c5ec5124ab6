// ABOUTME: Main library entry point for the Pierre fitness assessment scoring engine
// ABOUTME: Converts raw physical-test measurements into category scores, composite, grade and risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Assessment
//!
//! Scoring engine for trainer-administered fitness assessments. Clients
//! undergo standardized physical tests; the engine turns raw results into
//! normalized category scores, a weighted composite, a grade band and a risk
//! classification, and lets trainers override any computed value without
//! losing what was actually measured.
//!
//! ## Architecture
//!
//! - **Norms**: versioned, declarative norm tables plus the scoring profile
//!   (weights, grade cutoffs, risk rules), validated as one snapshot
//! - **Scoring**: category scorers, composite scorer, override layer,
//!   comparison, and the orchestrating `AssessmentScoringService`
//! - **Config**: environment-driven engine configuration
//! - **Logging**: `tracing` subscriber setup for binaries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use pierre_assessment::errors::AppResult;
//! use pierre_assessment::models::{Demographics, MeasurementSet, Sex};
//! use pierre_assessment::norms::NormTableSnapshot;
//! use pierre_assessment::scoring::score;
//!
//! fn main() -> AppResult<()> {
//!     let snapshot = NormTableSnapshot::standard()?;
//!     let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default();
//!     let measurements = MeasurementSet::new(date, Demographics::new(35, Sex::Female).with_body_mass(64.0))
//!         .with_value("push_up", 21.0)
//!         .with_value("sit_and_reach", 35.0)
//!         .with_value("single_leg_stance", 38.0)
//!         .with_value("step_test", 48.0)
//!         .with_value("waist_to_height", 0.46)
//!         .with_value("grip_strength", 29.0);
//!
//!     let result = score(&measurements, &snapshot)?;
//!     println!("overall {:.2} ({}) risk {}", result.overall_score, result.grade, result.risk);
//!     Ok(())
//! }
//! ```

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Assessment data models re-exported from the core crate
pub mod models {
    pub use pierre_assessment_core::models::*;
}

/// Engine-wide constants re-exported from the core crate
pub mod constants {
    pub use pierre_assessment_core::constants::*;
}

/// Engine configuration (norm table location, comparison tuning)
pub mod config;

/// Norm tables, scoring profile, and hot-reloadable snapshot source
pub mod norms;

/// Category scorers, composite scorer, overrides, comparison, and service
pub mod scoring;

/// Structured logging setup
pub mod logging;
