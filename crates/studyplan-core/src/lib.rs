//! # Studyplan Core Library
//!
//! This library provides the core logic for Studyplan, a study planner that
//! tracks subjects, tasks and a weekly timetable. All operations are
//! available through the standalone `studyplan` CLI, which is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Model**: `Subject`, `Task` and `TimeBlock` records with their
//!   invariants
//! - **Heuristics**: randomized timetable generation and task suggestion over
//!   an injected random source
//! - **Store**: the single owned container that mediates every mutation
//! - **Views**: progress report, task listings and dashboard projections
//! - **Storage**: TOML configuration and JSON state snapshots
//!
//! ## Key Components
//!
//! - [`StudyStore`]: CRUD and generation over the study state
//! - [`StudyState`]: serializable snapshot, including the sample catalog
//! - [`Config`]: application configuration management

pub mod error;
pub mod heuristics;
pub mod model;
pub mod storage;
pub mod store;
pub mod views;

pub use error::{ConfigError, CoreError, EntityKind, ValidationError};
pub use heuristics::{SuggestionConfig, TimetableConfig};
pub use model::{
    NewSubject, NewTask, NewTimeBlock, Subject, SubjectPatch, Task, TaskPatch, TaskPriority,
    TaskStatus, TimeBlock, TimeBlockPatch, Weekday,
};
pub use storage::{data_dir, Config, StudyState, SubjectsConfig};
pub use store::{Clock, FixedClock, StudyStore, SubjectDeletePolicy, SystemClock};
pub use views::{Dashboard, ProgressReport, SubjectProgress, TaskFilter, TaskSort};
