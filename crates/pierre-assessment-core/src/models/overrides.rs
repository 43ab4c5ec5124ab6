// ABOUTME: Trainer override record keyed by a generic score field identifier
// ABOUTME: Stores override value, author and timestamp per field without touching computed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::measurement::CategoryId;
use super::score::{Grade, RiskLevel};
use crate::constants::fields;
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an overridable field
///
/// String form: `overall_score`, `grade`, `risk`, or `category:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScoreField {
    /// Overall composite score
    OverallScore,
    /// Grade band
    Grade,
    /// Risk classification
    Risk,
    /// Point score of one category
    Category(CategoryId),
}

impl ScoreField {
    /// Field for a category's point score
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Self::Category(id.into())
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverallScore => f.write_str(fields::OVERALL_SCORE),
            Self::Grade => f.write_str(fields::GRADE),
            Self::Risk => f.write_str(fields::RISK),
            Self::Category(id) => write!(f, "{}{id}", fields::CATEGORY_PREFIX),
        }
    }
}

impl FromStr for ScoreField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            fields::OVERALL_SCORE => Ok(Self::OverallScore),
            fields::GRADE => Ok(Self::Grade),
            fields::RISK => Ok(Self::Risk),
            other => match other.strip_prefix(fields::CATEGORY_PREFIX) {
                Some(id) if !id.is_empty() => Ok(Self::Category(CategoryId::from(id))),
                _ => Err(AppError::unknown_field(other)),
            },
        }
    }
}

impl TryFrom<String> for ScoreField {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScoreField> for String {
    fn from(field: ScoreField) -> Self {
        field.to_string()
    }
}

/// Replacement value supplied by a trainer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OverrideValue {
    /// Category point score
    Points(u8),
    /// Overall composite score
    Score(f64),
    /// Grade band
    Grade(Grade),
    /// Risk classification
    Risk(RiskLevel),
}

impl OverrideValue {
    /// Whether this value has the right shape for `field`
    #[must_use]
    pub const fn fits(&self, field: &ScoreField) -> bool {
        matches!(
            (self, field),
            (Self::Points(_), ScoreField::Category(_))
                | (Self::Score(_), ScoreField::OverallScore)
                | (Self::Grade(_), ScoreField::Grade)
                | (Self::Risk(_), ScoreField::Risk)
        )
    }

    fn check(&self, field: &ScoreField) -> AppResult<()> {
        if !self.fits(field) {
            return Err(AppError::new(
                ErrorCode::OverrideValueMismatch,
                format!("override value {self:?} cannot be applied to '{field}'"),
            )
            .with_field(field.to_string()));
        }
        if let Self::Score(score) = self {
            if !score.is_finite() {
                return Err(AppError::validation(format!(
                    "override score for '{field}' must be finite"
                ))
                .with_field(field.to_string()));
            }
        }
        Ok(())
    }
}

/// One override with its audit data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Replacement value
    pub value: OverrideValue,
    /// When the override was last set
    pub set_at: DateTime<Utc>,
    /// Trainer who set it
    pub author: Uuid,
    /// Optional justification entered by the trainer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OverrideEntry {
    /// Create an entry stamped with the current time
    #[must_use]
    pub fn new(value: OverrideValue, author: Uuid) -> Self {
        Self {
            value,
            set_at: Utc::now(),
            author,
            note: None,
        }
    }

    /// Attach a justification
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Trainer overrides for one assessment
///
/// The only mutable state of the scoring workflow. Absence of a field means
/// "use the computed value"; overrides never expire on their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideRecord {
    entries: BTreeMap<ScoreField, OverrideEntry>,
}

impl OverrideRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the override for `field`, returning the previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not fit the field or a score is not finite
    pub fn set(
        &mut self,
        field: ScoreField,
        value: OverrideValue,
        author: Uuid,
    ) -> AppResult<Option<OverrideEntry>> {
        self.insert(field, OverrideEntry::new(value, author))
    }

    /// Insert a fully built entry, returning the previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not fit the field or a score is not finite
    pub fn insert(
        &mut self,
        field: ScoreField,
        entry: OverrideEntry,
    ) -> AppResult<Option<OverrideEntry>> {
        entry.value.check(&field)?;
        Ok(self.entries.insert(field, entry))
    }

    /// Remove the override for `field`, restoring the computed value
    pub fn clear(&mut self, field: &ScoreField) -> Option<OverrideEntry> {
        self.entries.remove(field)
    }

    /// Override for `field`, if any
    #[must_use]
    pub fn get(&self, field: &ScoreField) -> Option<&OverrideEntry> {
        self.entries.get(field)
    }

    /// Whether no overrides are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of overridden fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over overrides in field order
    pub fn iter(&self) -> impl Iterator<Item = (&ScoreField, &OverrideEntry)> {
        self.entries.iter()
    }

    /// Check every entry against its field
    ///
    /// Records deserialized from storage bypass `set`, so the override layer
    /// re-checks them before use.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found
    pub fn check(&self) -> AppResult<()> {
        self.entries
            .iter()
            .try_for_each(|(field, entry)| entry.value.check(field))
    }
}
