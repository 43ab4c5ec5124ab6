// ABOUTME: Core types and constants for the Pierre fitness assessment engine
// ABOUTME: Foundation crate with error handling, assessment data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Assessment Core
//!
//! Foundation crate providing shared types for the Pierre fitness assessment
//! scoring engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorKind`
//! - **models**: Measurement sets, score results, override records, comparisons
//! - **constants**: Field identifiers and numeric tolerances shared by the engine

/// Unified error handling system with standard error codes
pub mod errors;

/// Assessment data models (measurements, scores, overrides, comparisons)
pub mod models;

/// Engine-wide constants
pub mod constants;
