// ABOUTME: Configuration error types for norm table and scoring profile validation
// ABOUTME: Defines error variants for invalid ranges, gaps, overlaps, weights and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for engine and norm table validation.

use std::env;
use std::io;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ordered thresholds are out of order or a range is empty
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Required configuration field is missing
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Environment variable access or parse error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value or document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Weights don't sum to the configured total or are not positive
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    /// Norm table entries leave part of the lookup domain uncovered
    #[error("Norm table gap: {0}")]
    NormTableGap(String),

    /// Norm table entries or buckets overlap
    #[error("Norm table overlap: {0}")]
    NormTableOverlap(String),
}
