// ABOUTME: Norm table module: declarative tables, the built-in battery, and the snapshot source
// ABOUTME: Everything the category scorers need to turn raw values into points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Snapshot holder with validated hot reload
pub mod source;
/// Built-in reference battery
pub mod standard;
/// Norm table types, validation, and lookup
pub mod table;

pub use source::NormTableSource;
pub use standard::{categories, STANDARD_NORMS_VERSION};
pub use table::{
    CategoryNorms, DemographicBucket, NormEntry, NormMatch, NormTableSnapshot, RawTransform,
    ValidDomain,
};
