//! Subjects: curriculum areas with planned and completed study hours.

use serde::{Deserialize, Serialize};

use super::{new_id, validate_color, validate_non_empty};
use crate::error::ValidationError;

/// Lowest subject rank.
pub const MIN_SUBJECT_RANK: u8 = 1;
/// Highest subject rank.
pub const MAX_SUBJECT_RANK: u8 = 3;

/// A curriculum area with planned and completed study hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique identifier
    pub id: String,
    pub name: String,
    /// Display color (`#RRGGBB`)
    pub color: String,
    /// Rank 1..=3, 3 is the highest
    pub priority: u8,
    /// Total planned hours
    pub total_hours: f64,
    /// Hours already studied, never above `total_hours`
    pub completed_hours: f64,
}

impl Subject {
    /// Fraction of planned hours already studied (0.0 to 1.0).
    ///
    /// A subject with no planned hours has nothing left to study and
    /// reports 1.0.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_hours <= 0.0 {
            1.0
        } else {
            (self.completed_hours / self.total_hours).clamp(0.0, 1.0)
        }
    }

    /// Hours still to study.
    pub fn remaining_hours(&self) -> f64 {
        (self.total_hours - self.completed_hours).max(0.0)
    }

    /// Check every field invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_empty("name", &self.name)?;
        validate_color("color", &self.color)?;
        if !(MIN_SUBJECT_RANK..=MAX_SUBJECT_RANK).contains(&self.priority) {
            return Err(ValidationError::invalid(
                "priority",
                format!(
                    "{} is outside {MIN_SUBJECT_RANK}..={MAX_SUBJECT_RANK}",
                    self.priority
                ),
            ));
        }
        for (field, hours) in [
            ("totalHours", self.total_hours),
            ("completedHours", self.completed_hours),
        ] {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ValidationError::invalid(
                    field,
                    format!("{hours} must be a non-negative number"),
                ));
            }
        }
        if self.completed_hours > self.total_hours {
            return Err(ValidationError::invalid(
                "completedHours",
                format!(
                    "{} exceeds total hours {}",
                    self.completed_hours, self.total_hours
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn apply(&mut self, patch: SubjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(total) = patch.total_hours {
            self.total_hours = total;
        }
        if let Some(completed) = patch.completed_hours {
            self.completed_hours = completed;
        }
    }
}

/// Fields for a subject that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub name: String,
    pub color: String,
    pub priority: u8,
    pub total_hours: f64,
    #[serde(default)]
    pub completed_hours: f64,
}

impl NewSubject {
    pub fn new(name: impl Into<String>, color: impl Into<String>, priority: u8, total_hours: f64) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            priority,
            total_hours,
            completed_hours: 0.0,
        }
    }

    pub fn with_completed_hours(mut self, hours: f64) -> Self {
        self.completed_hours = hours;
        self
    }

    /// Assign a fresh id. The result is not validated.
    pub fn into_subject(self) -> Subject {
        Subject {
            id: new_id(),
            name: self.name,
            color: self.color,
            priority: self.priority,
            total_hours: self.total_hours,
            completed_hours: self.completed_hours,
        }
    }
}

/// Partial update for a subject. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub priority: Option<u8>,
    pub total_hours: Option<f64>,
    pub completed_hours: Option<f64>,
}

impl SubjectPatch {
    pub fn is_empty(&self) -> bool {
        self == &SubjectPatch::default()
    }
}
