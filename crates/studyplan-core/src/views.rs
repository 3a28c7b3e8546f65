//! Read-only projections of the study state for presentation layers.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Subject, Task, TaskStatus, TimeBlock, Weekday};
use crate::storage::StudyState;

/// Days ahead covered by the upcoming-tasks list.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

fn percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        0
    } else {
        ((part / whole) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Progress of a single subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProgress {
    pub id: String,
    pub name: String,
    pub color: String,
    pub completed_hours: f64,
    pub total_hours: f64,
    /// Rounded completion percentage
    pub progress: u32,
}

impl From<&Subject> for SubjectProgress {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            name: subject.name.clone(),
            color: subject.color.clone(),
            completed_hours: subject.completed_hours,
            total_hours: subject.total_hours,
            progress: (subject.completion_ratio() * 100.0).round() as u32,
        }
    }
}

/// Overall hour and task completion figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub total_hours: f64,
    pub completed_hours: f64,
    /// Rounded percentage of planned hours studied (0 with nothing planned)
    pub overall_progress: u32,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded percentage of tasks completed (0 with no tasks)
    pub task_completion_rate: u32,
    pub subjects: Vec<SubjectProgress>,
}

impl ProgressReport {
    pub fn build(subjects: &[Subject], tasks: &[Task]) -> Self {
        let total_hours: f64 = subjects.iter().map(|s| s.total_hours).sum();
        let completed_hours: f64 = subjects.iter().map(|s| s.completed_hours).sum();
        let completed_tasks = tasks.iter().filter(|t| t.is_completed()).count();
        Self {
            total_hours,
            completed_hours,
            overall_progress: percent(completed_hours, total_hours),
            total_tasks: tasks.len(),
            completed_tasks,
            task_completion_rate: percent(completed_tasks as f64, tasks.len() as f64),
            subjects: subjects.iter().map(SubjectProgress::from).collect(),
        }
    }
}

/// Which tasks a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Status(TaskStatus),
}

/// Order of a task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Earliest due date first
    #[default]
    DueDate,
    /// High before Medium before Low
    Priority,
}

pub fn filter_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            TaskFilter::All => true,
            TaskFilter::Status(status) => t.status == status,
        })
        .collect()
}

/// Sort in place; equal keys keep their order.
pub fn sort_tasks(tasks: &mut [&Task], sort: TaskSort) {
    match sort {
        TaskSort::DueDate => tasks.sort_by_key(|t| t.due_date),
        TaskSort::Priority => tasks.sort_by_key(|t| t.priority.rank()),
    }
}

/// Blocks on `day`, earliest first.
pub fn day_schedule(blocks: &[TimeBlock], day: Weekday) -> Vec<&TimeBlock> {
    let mut selected: Vec<&TimeBlock> = blocks.iter().filter(|b| b.day == day).collect();
    selected.sort_by_key(|b| b.start_time);
    selected
}

/// Summary of what is due and scheduled around `today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today: NaiveDate,
    pub weekday: Weekday,
    pub due_today: Vec<Task>,
    /// Unfinished tasks due after today and within the upcoming window
    pub upcoming: Vec<Task>,
    pub overdue: Vec<Task>,
    pub todays_blocks: Vec<TimeBlock>,
    pub overall_progress: u32,
    pub task_completion_rate: u32,
}

impl Dashboard {
    pub fn build(state: &StudyState, today: NaiveDate) -> Self {
        let weekday = Weekday::from(today.weekday());
        let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);
        let report = ProgressReport::build(&state.subjects, &state.tasks);

        let collect = |keep: &dyn Fn(&Task) -> bool| -> Vec<Task> {
            let mut selected: Vec<&Task> = state.tasks.iter().filter(|t| keep(t)).collect();
            sort_tasks(&mut selected, TaskSort::DueDate);
            selected.into_iter().cloned().collect()
        };

        Self {
            today,
            weekday,
            due_today: collect(&|t: &Task| t.due_date == today),
            upcoming: collect(&|t: &Task| !t.is_completed() && t.due_date > today && t.due_date <= horizon),
            overdue: collect(&|t: &Task| t.is_overdue(today)),
            todays_blocks: day_schedule(&state.time_blocks, weekday)
                .into_iter()
                .cloned()
                .collect(),
            overall_progress: report.overall_progress,
            task_completion_rate: report.task_completion_rate,
        }
    }
}
