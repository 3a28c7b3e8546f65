//! Serializable study state and the built-in sample catalog.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::{Result, ValidationError};
use crate::model::{NewSubject, NewTask, NewTimeBlock, Subject, Task, TaskPriority, TaskStatus, TimeBlock, Weekday};

/// All subjects, tasks and time blocks at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyState {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub time_blocks: Vec<TimeBlock>,
}

const SAMPLE_SUBJECTS: [(&str, &str, u8, f64, f64); 5] = [
    ("Mathematics", "#8B5CF6", 3, 40.0, 12.0),
    ("Physics", "#3B82F6", 2, 35.0, 8.0),
    ("Chemistry", "#10B981", 2, 30.0, 10.0),
    ("English", "#F59E0B", 1, 25.0, 6.0),
    ("Computer Science", "#EC4899", 3, 45.0, 15.0),
];

impl StudyState {
    /// The five-subject starter catalog with a few tasks and blocks.
    pub fn sample() -> Self {
        let subjects: Vec<Subject> = SAMPLE_SUBJECTS
            .iter()
            .map(|&(name, color, rank, total, completed)| {
                NewSubject::new(name, color, rank, total)
                    .with_completed_hours(completed)
                    .into_subject()
            })
            .collect();

        let color_of = |name: &str| {
            subjects
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.color.clone())
                .unwrap_or_default()
        };

        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 4, d).unwrap_or_default();
        let created = |d: u32, h: u32, m: u32| -> DateTime<Utc> {
            date(d)
                .and_hms_opt(h, m, 0)
                .map(|dt| dt.and_utc())
                .unwrap_or_default()
        };

        let task = |title: &str,
                    subject: &str,
                    priority: TaskPriority,
                    due: u32,
                    minutes: u32,
                    notes: Option<&str>,
                    created_at: DateTime<Utc>| {
            NewTask {
                title: title.into(),
                subject: subject.into(),
                subject_color: color_of(subject),
                priority,
                due_date: date(due),
                estimated_minutes: minutes,
                notes: notes.map(str::to_string),
            }
            .into_task(created_at)
        };

        let mut calculus = task(
            "Complete Calculus Homework",
            "Mathematics",
            TaskPriority::High,
            15,
            60,
            Some("Focus on integration by parts"),
            created(13, 10, 0),
        );
        calculus.set_status(TaskStatus::InProgress, calculus.created_at);

        let tasks = vec![
            calculus,
            task(
                "Read Physics Chapter 7",
                "Physics",
                TaskPriority::Medium,
                14,
                45,
                None,
                created(12, 14, 30),
            ),
            task(
                "Chemistry Lab Report",
                "Chemistry",
                TaskPriority::High,
                16,
                120,
                Some("Include all experiment data and analysis"),
                created(11, 9, 15),
            ),
            task(
                "English Essay Draft",
                "English",
                TaskPriority::Medium,
                18,
                90,
                None,
                created(10, 16, 45),
            ),
        ];

        let at = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
        let block = |day: Weekday, start: NaiveTime, end: NaiveTime, subject: &str, description: &str| {
            NewTimeBlock {
                day,
                start_time: start,
                end_time: end,
                subject: subject.into(),
                subject_color: color_of(subject),
                description: Some(description.into()),
            }
            .into_time_block()
        };
        let time_blocks = vec![
            block(Weekday::Monday, at(9, 0), at(10, 30), "Mathematics", "Calculus practice"),
            block(Weekday::Monday, at(11, 0), at(12, 30), "Physics", "Waves and optics"),
            block(Weekday::Tuesday, at(9, 0), at(10, 30), "Chemistry", "Organic chemistry"),
            block(Weekday::Tuesday, at(11, 0), at(12, 30), "English", "Literature review"),
            block(
                Weekday::Wednesday,
                at(14, 0),
                at(16, 0),
                "Computer Science",
                "Programming practice",
            ),
        ];

        StudyState {
            subjects,
            tasks,
            time_blocks,
        }
    }

    /// Check every record and that ids are unique per collection.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for subject in &self.subjects {
            subject.validate()?;
        }
        for task in &self.tasks {
            task.validate()?;
        }
        for block in &self.time_blocks {
            block.validate()?;
        }
        check_unique("subjects", self.subjects.iter().map(|s| s.id.as_str()))?;
        check_unique("tasks", self.tasks.iter().map(|t| t.id.as_str()))?;
        check_unique("timeBlocks", self.time_blocks.iter().map(|b| b.id.as_str()))?;
        Ok(())
    }

    /// Default location of the state file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("state.json"))
    }

    /// Read and validate a JSON snapshot.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let state: StudyState = serde_json::from_str(&content)?;
        state.validate()?;
        debug!(
            path = %path.display(),
            subjects = state.subjects.len(),
            tasks = state.tasks.len(),
            time_blocks = state.time_blocks.len(),
            "loaded study state"
        );
        Ok(state)
    }

    /// Read a JSON snapshot, falling back to the sample catalog when the file
    /// does not exist yet.
    pub fn load_json_or_sample(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            debug!(path = %path.display(), "no state file, starting from sample catalog");
            Ok(Self::sample())
        }
    }

    /// Write the snapshot as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn check_unique<'a>(collection: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::invalid(
                collection,
                format!("duplicate id '{id}'"),
            ));
        }
    }
    Ok(())
}
