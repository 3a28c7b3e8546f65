//! Core error types for studyplan-core.
//!
//! Every id-keyed mutation on the store reports a missing record as
//! [`CoreError::NotFound`], and every malformed field value as
//! [`CoreError::Validation`]. Nothing is silently ignored.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

/// Kind of record an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Subject,
    Task,
    TimeBlock,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Subject => write!(f, "subject"),
            EntityKind::Task => write!(f, "task"),
            EntityKind::TimeBlock => write!(f, "time block"),
        }
    }
}

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No record with the given id exists
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn not_found(entity: EntityKind, id: &str) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True when the error is a missing-record outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Subject is still referenced by tasks or time blocks
    #[error("Subject '{name}' is still referenced by {references} task(s) or time block(s)")]
    SubjectInUse { name: String, references: usize },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found(EntityKind::TimeBlock, "abc");
        assert_eq!(err.to_string(), "time block not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::invalid("name", "must not be empty").into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(!err.is_not_found());
    }
}
