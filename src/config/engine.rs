// ABOUTME: Engine configuration loaded from defaults and environment variable overrides
// ABOUTME: Locates the norm table document and tunes comparison trend labelling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration

use super::error::ConfigError;
use crate::constants::{env_vars, tolerances::DEFAULT_TREND_EPSILON};
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::path::PathBuf;
use std::str::FromStr;

/// Comparison tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Deltas with an absolute value at or below this are labelled unchanged
    pub trend_epsilon: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            trend_epsilon: DEFAULT_TREND_EPSILON,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// JSON or YAML norm table document; the built-in battery when unset
    pub norm_table_path: Option<PathBuf>,
    /// Comparison tuning
    pub comparison: ComparisonConfig,
}

impl EngineConfig {
    /// Load configuration from defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an invalid value or
    /// validation fails
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match env::var(env_vars::NORMS_PATH) {
            Ok(path) if !path.trim().is_empty() => {
                config.norm_table_path = Some(PathBuf::from(path));
            }
            Ok(_) | Err(VarError::NotPresent) => {}
            Err(e) => return Err(e.into()),
        }
        Self::apply_env_var(
            env_vars::TREND_EPSILON,
            &mut config.comparison.trend_epsilon,
        )?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the trend epsilon is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        let epsilon = self.comparison.trend_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "trend_epsilon must be finite and >= 0, got {epsilon}"
            )));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }
}
