//! Study tasks.
//!
//! A task moves freely between its three statuses; the only rule is that
//! `completed_at` is set exactly while the status is `Completed`:
//!
//!   TO DO <──────> IN PROGRESS <──────> COMPLETED
//!     ^                                     |
//!     +─────────────────────────────────────+
//!
//! - any update that sets `Completed` stamps `completed_at` with the time of
//!   the update
//! - any update that sets another status clears `completed_at`

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, validate_color, validate_non_empty};
use crate::error::ValidationError;

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort key, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::High => 0,
            TaskPriority::Medium => 1,
            TaskPriority::Low => 2,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::High => write!(f, "High"),
            TaskPriority::Medium => write!(f, "Medium"),
            TaskPriority::Low => write!(f, "Low"),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            _ => Err(ValidationError::invalid(
                "priority",
                format!("'{s}' is not one of High, Medium, Low"),
            )),
        }
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::ToDo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::ToDo => write!(f, "To Do"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(TaskStatus::ToDo),
            "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(ValidationError::invalid(
                "status",
                format!("'{s}' is not one of To Do, In Progress, Completed"),
            )),
        }
    }
}

/// A discrete study to-do tied to a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    pub title: String,
    /// Subject name (denormalized)
    pub subject: String,
    /// Subject color (denormalized)
    pub subject_color: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Calendar due date, no time zone
    pub due_date: NaiveDate,
    pub estimated_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp (null unless completed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Set the status, stamping or clearing the completion time.
    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.completed_at = match status {
            TaskStatus::Completed => Some(now),
            TaskStatus::ToDo | TaskStatus::InProgress => None,
        };
        self.status = status;
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Past its due date and not completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due_date < today
    }

    /// Check every field invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_empty("title", &self.title)?;
        validate_non_empty("subject", &self.subject)?;
        validate_color("subjectColor", &self.subject_color)?;
        if self.estimated_minutes == 0 {
            return Err(ValidationError::invalid(
                "estimatedMinutes",
                "must be greater than zero",
            ));
        }
        if self.is_completed() != self.completed_at.is_some() {
            return Err(ValidationError::invalid(
                "completedAt",
                "must be set exactly when the task is completed",
            ));
        }
        Ok(())
    }

    pub(crate) fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(color) = patch.subject_color {
            self.subject_color = color;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.set_status(status, now);
        }
        if let Some(due) = patch.due_date {
            self.due_date = due;
        }
        if let Some(minutes) = patch.estimated_minutes {
            self.estimated_minutes = minutes;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

/// Fields for a task that has not been stored yet.
///
/// There is no status field: new tasks always start as `To Do`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub subject: String,
    pub subject_color: String,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub estimated_minutes: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTask {
    /// Assign a fresh id and creation time. The result is not validated.
    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        Task {
            id: new_id(),
            title: self.title,
            subject: self.subject,
            subject_color: self.subject_color,
            priority: self.priority,
            status: TaskStatus::ToDo,
            due_date: self.due_date,
            estimated_minutes: self.estimated_minutes,
            notes: self.notes,
            created_at: now,
            completed_at: None,
        }
    }
}

/// Partial update for a task. `None` leaves the field as is;
/// `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub subject_color: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
    pub estimated_minutes: Option<u32>,
    pub notes: Option<Option<String>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
