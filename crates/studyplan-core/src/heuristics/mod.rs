//! Rule-of-thumb generators for timetables and task suggestions.
//!
//! Both are functions of the current subjects and an injected random source,
//! so a seeded generator reproduces their output exactly. Record ids are the
//! exception: they are always fresh v4 uuids.

pub mod suggest;
pub mod timetable;

pub use suggest::{rank_by_completion, suggest_tasks, suggested_priority, task_title, SuggestionConfig};
pub use timetable::{default_slots, generate_study_plan, TimeSlot, TimetableConfig};
