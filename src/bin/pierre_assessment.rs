// ABOUTME: Pierre assessment CLI - scores, compares, and validates norm tables from files
// ABOUTME: Reads JSON or YAML inputs and prints JSON results on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Score an assessment (measurements plus optional trainer overrides)
//! pierre-assessment score assessment.json
//!
//! # Score against a custom norm table document
//! pierre-assessment --norms norms.yaml score assessment.yaml
//!
//! # Compare two assessments, oldest first
//! pierre-assessment compare march.json june.json
//!
//! # Summarize a longer history, oldest first
//! pierre-assessment compare jan.json mar.json jun.json sep.json
//!
//! # Validate a norm table document
//! pierre-assessment validate-norms norms.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pierre_assessment::config::EngineConfig;
use pierre_assessment::logging::{init_logging, LoggingConfig};
use pierre_assessment::models::{EffectiveScoreResult, MeasurementSet, OverrideRecord};
use pierre_assessment::norms::NormTableSnapshot;
use pierre_assessment::scoring::AssessmentScoringService;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pierre-assessment",
    about = "Pierre fitness assessment scoring",
    long_about = "Scores standardized physical-test assessments against versioned norm tables, applies trainer overrides, and compares results over time."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Norm table document (JSON or YAML); defaults to PIERRE_ASSESSMENT_NORMS_PATH or the built-in battery
    #[arg(long, global = true)]
    norms: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Score one assessment and print the effective result
    Score {
        /// Assessment document with `measurements` and optional `overrides`
        input: PathBuf,
    },

    /// Compare assessments given oldest first
    ///
    /// Two inputs print a comparison; more print a history summary.
    Compare {
        /// Assessment documents in ascending date order
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Validate a norm table document
    ValidateNorms {
        /// Norm table document (JSON or YAML)
        path: PathBuf,
    },
}

/// Assessment as stored by the surrounding application
#[derive(Debug, Serialize, Deserialize)]
struct AssessmentInput {
    measurements: MeasurementSet,
    #[serde(default)]
    overrides: OverrideRecord,
}

#[derive(Serialize)]
struct NormsReport<'a> {
    valid: bool,
    version: &'a str,
    categories: Vec<&'a str>,
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let document =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&document)
            .with_context(|| format!("parsing YAML {}", path.display())),
        _ => serde_json::from_str(&document)
            .with_context(|| format!("parsing JSON {}", path.display())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_service(norms: Option<PathBuf>) -> Result<AssessmentScoringService> {
    let mut config = EngineConfig::from_env()?;
    if norms.is_some() {
        config.norm_table_path = norms;
    }
    let service = AssessmentScoringService::from_config(&config)?;
    info!(
        norm_table_version = %service.snapshot()?.version,
        "Scoring service ready"
    );
    Ok(service)
}

fn evaluate(service: &AssessmentScoringService, path: &Path) -> Result<EffectiveScoreResult> {
    let input: AssessmentInput = read_document(path)?;
    service
        .score_effective(&input.measurements, Some(&input.overrides))
        .with_context(|| format!("scoring {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    init_logging(&logging)?;

    match cli.command {
        Command::Score { input } => {
            let service = build_service(cli.norms)?;
            print_json(&evaluate(&service, &input)?)?;
        }
        Command::Compare { inputs } => {
            let service = build_service(cli.norms)?;
            let history = inputs
                .iter()
                .map(|path| evaluate(&service, path))
                .collect::<Result<Vec<_>>>()?;
            match history.as_slice() {
                [previous, current] => print_json(&service.compare(previous, current))?,
                [_, _, ..] => print_json(&service.summarize_history(&history)?)?,
                _ => bail!("compare needs at least two assessments"),
            }
        }
        Command::ValidateNorms { path } => {
            let snapshot = NormTableSnapshot::load_file(&path)?;
            print_json(&NormsReport {
                valid: true,
                version: &snapshot.version,
                categories: snapshot.categories.keys().map(|id| id.as_str()).collect(),
            })?;
        }
    }

    Ok(())
}
