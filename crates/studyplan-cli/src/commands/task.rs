//! Task management commands for CLI.

use std::path::Path;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use studyplan_core::views::{filter_tasks, sort_tasks};
use studyplan_core::{NewTask, TaskFilter, TaskPatch, TaskPriority, TaskSort, TaskStatus};

use super::{print_json, subject_color, CmdResult, Session};

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKey {
    /// Earliest due date first
    Due,
    /// High priority first
    Priority,
}

impl From<SortKey> for TaskSort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Due => TaskSort::DueDate,
            SortKey::Priority => TaskSort::Priority,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task (status starts as "To Do")
    Add {
        /// Task title
        title: String,
        /// Subject name
        #[arg(long)]
        subject: String,
        /// Subject color (default: color of the named subject)
        #[arg(long)]
        color: Option<String>,
        /// High, Medium or Low
        #[arg(long, default_value = "Medium")]
        priority: TaskPriority,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// Estimated minutes
        #[arg(long, default_value_t = 60)]
        minutes: u32,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks with this status ("To Do", "In Progress", "Completed")
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Sort order
        #[arg(long, value_enum, default_value_t = SortKey::Due)]
        sort: SortKey,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// New subject name
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, state: Option<&Path>) -> CmdResult {
    let mut session = Session::open(state)?;

    match action {
        TaskAction::Add {
            title,
            subject,
            color,
            priority,
            due,
            minutes,
            notes,
        } => {
            let subject_color = subject_color(&session.store, &subject, color)?;
            let task = session.store.add_task(NewTask {
                title,
                subject,
                subject_color,
                priority,
                due_date: due,
                estimated_minutes: minutes,
                notes,
            })?;
            session.save()?;
            print_json(&task)?;
        }
        TaskAction::List { status, sort } => {
            let filter = status.map_or(TaskFilter::All, TaskFilter::Status);
            let mut tasks = filter_tasks(session.store.tasks(), filter);
            sort_tasks(&mut tasks, sort.into());
            print_json(&tasks)?;
        }
        TaskAction::Get { id } => match session.store.task(&id) {
            Some(task) => print_json(task)?,
            None => return Err(format!("task not found: {id}").into()),
        },
        TaskAction::Update {
            id,
            title,
            subject,
            color,
            priority,
            status,
            due,
            minutes,
            notes,
            clear_notes,
        } => {
            let subject_color = match (&subject, color) {
                (Some(name), color) => Some(subject_color(&session.store, name, color)?),
                (None, color) => color,
            };
            let notes = if clear_notes { Some(None) } else { notes.map(Some) };
            let patch = TaskPatch {
                title,
                subject,
                subject_color,
                priority,
                status,
                due_date: due,
                estimated_minutes: minutes,
                notes,
            };
            if patch == TaskPatch::default() {
                return Err("nothing to update".into());
            }
            let task = session.store.update_task(&id, patch)?;
            session.save()?;
            print_json(&task)?;
        }
        TaskAction::Complete { id } => {
            let task = session.store.complete_task(&id)?;
            session.save()?;
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            let removed = session.store.delete_task(&id)?;
            session.save()?;
            println!("Task deleted: {}", removed.id);
        }
    }
    Ok(())
}
