// ABOUTME: Hot-reloadable holder of the active norm table snapshot
// ABOUTME: Hands out one immutable snapshot per scoring call and validates before swapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::table::NormTableSnapshot;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Versioned norm table source
///
/// Readers clone the inner `Arc`, so a concurrent `replace` never changes the
/// tables seen by a scoring call that already started.
#[derive(Debug)]
pub struct NormTableSource {
    active: RwLock<Arc<NormTableSnapshot>>,
}

impl NormTableSource {
    /// Wrap a snapshot after validating it
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the snapshot is inconsistent
    pub fn new(snapshot: NormTableSnapshot) -> AppResult<Self> {
        snapshot.validate()?;
        Ok(Self {
            active: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Source holding the built-in standard battery
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the built-in tables fail validation
    pub fn standard() -> AppResult<Self> {
        Self::new(NormTableSnapshot::standard()?)
    }

    /// Source loaded from a JSON or YAML document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file can't be read, parsed or validated
    pub fn load_file(path: &Path) -> AppResult<Self> {
        let snapshot = NormTableSnapshot::load_file(path)?;
        info!(
            path = %path.display(),
            version = %snapshot.version,
            "Loaded norm tables"
        );
        Self::new(snapshot)
    }

    /// Snapshot to bind a scoring call to
    ///
    /// # Errors
    ///
    /// Returns an internal error if the lock was poisoned
    pub fn current(&self) -> AppResult<Arc<NormTableSnapshot>> {
        self.active
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| AppError::internal("norm table lock poisoned"))
    }

    /// Validate and activate a new snapshot, returning the previous one
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the snapshot is inconsistent, leaving
    /// the active snapshot untouched, or an internal error if the lock was poisoned
    pub fn replace(&self, snapshot: NormTableSnapshot) -> AppResult<Arc<NormTableSnapshot>> {
        snapshot.validate()?;
        let mut guard = self
            .active
            .write()
            .map_err(|_| AppError::internal("norm table lock poisoned"))?;
        let previous = std::mem::replace(&mut *guard, Arc::new(snapshot));
        drop(guard);

        info!(version = %previous.version, "Replaced norm table snapshot");
        Ok(previous)
    }

    /// Reload the active snapshot from a JSON or YAML document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file can't be read, parsed or
    /// validated; the active snapshot is kept in that case
    pub fn reload_from_file(&self, path: &Path) -> AppResult<Arc<NormTableSnapshot>> {
        let snapshot = NormTableSnapshot::load_file(path)?;
        self.replace(snapshot)
    }
}
