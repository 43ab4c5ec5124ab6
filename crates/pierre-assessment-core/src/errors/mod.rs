// ABOUTME: Unified error handling for the assessment scoring engine
// ABOUTME: Defines ErrorCode, ErrorKind, AppError and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible engine operation returns [`AppResult`]. Errors carry a
//! numbered [`ErrorCode`] and map onto one of the coarse [`ErrorKind`]s the
//! surrounding application branches on:
//!
//! - `Validation`: a measurement or request the caller can correct
//! - `Configuration`: norm table or profile defect; retrying will not help
//! - `UnknownField`: an override targets a field the engine does not know
//! - `Internal`: lock poisoning, serialization failures

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required category has neither a value nor a not-administered marker
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Raw value outside the category's physically valid domain
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,
    /// Override targets a field identifier the engine does not recognize
    #[serde(rename = "UNKNOWN_OVERRIDE_FIELD")]
    UnknownOverrideField = 3004,
    /// Override value type does not fit the targeted field
    #[serde(rename = "OVERRIDE_VALUE_MISMATCH")]
    OverrideValueMismatch = 3005,

    // Configuration (6000-6999)
    /// Generic configuration error
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Configuration is structurally invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,
    /// Norm table ranges leave part of the domain uncovered
    #[serde(rename = "NORM_TABLE_GAP")]
    NormTableGap = 6003,
    /// Norm table ranges or buckets overlap
    #[serde(rename = "NORM_TABLE_OVERLAP")]
    NormTableOverlap = 6004,
    /// No bucket or entry matched a lookup
    #[serde(rename = "NO_MATCHING_NORM_ENTRY")]
    NoMatchingNormEntry = 6005,
    /// Category weights are inconsistent
    #[serde(rename = "INVALID_WEIGHTS")]
    InvalidWeights = 6006,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

/// Coarse error classification exposed to collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller-correctable input problem
    Validation,
    /// Reference data or profile defect
    Configuration,
    /// Override targets an unrecognized field
    UnknownField,
    /// Engine-internal failure
    Internal,
}

impl ErrorKind {
    /// Whether repeating the call with identical inputs could succeed
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl ErrorCode {
    /// Coarse kind of this code
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::ValueOutOfRange
            | Self::OverrideValueMismatch => ErrorKind::Validation,

            Self::UnknownOverrideField => ErrorKind::UnknownField,

            Self::ConfigError
            | Self::ConfigInvalid
            | Self::NormTableGap
            | Self::NormTableOverlap
            | Self::NoMatchingNormEntry
            | Self::InvalidWeights => ErrorKind::Configuration,

            Self::InternalError | Self::SerializationError => ErrorKind::Internal,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required measurement is missing",
            Self::ValueOutOfRange => "The measured value is outside the physically valid range",
            Self::UnknownOverrideField => "The override targets an unknown field",
            Self::OverrideValueMismatch => "The override value does not fit the targeted field",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::NormTableGap => "Norm table ranges leave part of the domain uncovered",
            Self::NormTableOverlap => "Norm table ranges overlap",
            Self::NoMatchingNormEntry => "No norm table entry matched",
            Self::InvalidWeights => "Category weights are inconsistent",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Category the error relates to, if any
    pub category: Option<String>,
    /// Override field identifier the error relates to, if any
    pub field: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            category: None,
            field: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Coarse kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Attach the category this error relates to
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.context.category = Some(category.into());
        self
    }

    /// Attach the override field this error relates to
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Category required by the norm table has no value and no not-administered marker
    pub fn missing_category(category: impl Into<String>) -> Self {
        let category = category.into();
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("no measurement or not-administered marker for category '{category}'"),
        )
        .with_category(category)
    }

    /// Raw value outside the category's physically valid domain
    pub fn out_of_domain(category: impl Into<String>, value: f64, reason: &str) -> Self {
        let category = category.into();
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("value {value} for category '{category}' {reason}"),
        )
        .with_category(category)
        .with_details(serde_json::json!({ "value": value }))
    }

    /// No norm table bucket or entry matched a lookup
    pub fn no_matching_entry(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoMatchingNormEntry, message).with_category(category)
    }

    /// Override targets an unknown field
    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::UnknownOverrideField,
            format!("'{field}' is not an overridable field"),
        )
        .with_field(field)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}
