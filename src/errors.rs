// ABOUTME: Error handling surface of the assessment engine
// ABOUTME: Re-exports the core AppError system and converts configuration errors into it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The engine shares `AppError` with the core crate. Configuration loading
//! uses the narrower [`ConfigError`](crate::config::ConfigError), which maps
//! onto configuration error codes here.

pub use pierre_assessment_core::errors::{AppError, AppResult, ErrorCode, ErrorContext, ErrorKind};

use crate::config::ConfigError;

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match &error {
            ConfigError::InvalidWeights(_) => ErrorCode::InvalidWeights,
            ConfigError::NormTableGap(_) => ErrorCode::NormTableGap,
            ConfigError::NormTableOverlap(_) => ErrorCode::NormTableOverlap,
            ConfigError::Parse(_) | ConfigError::EnvVar(_) | ConfigError::Io(_) => {
                ErrorCode::ConfigError
            }
            ConfigError::InvalidRange(_)
            | ConfigError::MissingField(_)
            | ConfigError::ValueOutOfRange(_) => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
