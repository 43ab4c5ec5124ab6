// ABOUTME: Configuration module for the assessment scoring engine
// ABOUTME: Engine settings from the environment plus the declarative scoring profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration Module
//!
//! - `engine` - where norm tables come from and how comparisons are labelled
//! - `profile` - category weights, grade cutoffs, and risk rules
//! - `error` - configuration error variants

pub mod engine;
pub mod error;
pub mod profile;

pub use engine::{ComparisonConfig, EngineConfig};
pub use error::ConfigError;
pub use profile::ScoringProfile;
