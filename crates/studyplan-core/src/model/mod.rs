//! Domain records: subjects, tasks and weekly time blocks.
//!
//! Tasks and time blocks carry a denormalized copy of their subject's name and
//! color. The store keeps those copies in step when a subject is renamed or
//! recolored.

mod subject;
mod task;
mod time_block;

pub use subject::{NewSubject, Subject, SubjectPatch, MAX_SUBJECT_RANK, MIN_SUBJECT_RANK};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use time_block::{hhmm, NewTimeBlock, TimeBlock, TimeBlockPatch, Weekday};

use crate::error::ValidationError;

/// Generate a fresh record id, independent of any seeded generator.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Check a `#RRGGBB` display color.
pub(crate) fn validate_color(field: &str, color: &str) -> Result<(), ValidationError> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::invalid(field, format!("'{color}' must start with '#'")))?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::invalid(
            field,
            format!("'{color}' is not a #RRGGBB color"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid(field, "must not be empty"));
    }
    Ok(())
}
