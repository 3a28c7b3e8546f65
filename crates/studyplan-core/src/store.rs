//! The study state store.
//!
//! [`StudyStore`] owns every subject, task and time block and mediates all
//! mutations. It is a plain value: callers hold it and pass `&mut` access to
//! whatever needs to change it. All operations are synchronous and do no I/O.
//!
//! Id-keyed mutations fail with [`CoreError::NotFound`] for unknown ids and
//! with [`CoreError::Validation`] when the resulting record would break an
//! invariant. A failed mutation leaves the store untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, EntityKind, Result, ValidationError};
use crate::heuristics;
use crate::model::{
    NewSubject, NewTask, NewTimeBlock, Subject, SubjectPatch, Task, TaskPatch, TaskStatus,
    TimeBlock, TimeBlockPatch,
};
use crate::storage::{Config, StudyState};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// What happens to tasks and time blocks when their subject is deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubjectDeletePolicy {
    /// Leave them in place, still naming the deleted subject.
    Orphan,
    /// Delete them together with the subject.
    Cascade,
    /// Refuse to delete a subject that is still referenced.
    Restrict,
}

impl Default for SubjectDeletePolicy {
    fn default() -> Self {
        SubjectDeletePolicy::Orphan
    }
}

impl fmt::Display for SubjectDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectDeletePolicy::Orphan => write!(f, "orphan"),
            SubjectDeletePolicy::Cascade => write!(f, "cascade"),
            SubjectDeletePolicy::Restrict => write!(f, "restrict"),
        }
    }
}

impl FromStr for SubjectDeletePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orphan" => Ok(SubjectDeletePolicy::Orphan),
            "cascade" => Ok(SubjectDeletePolicy::Cascade),
            "restrict" => Ok(SubjectDeletePolicy::Restrict),
            _ => Err(ValidationError::invalid(
                "delete_policy",
                format!("'{s}' is not one of orphan, cascade, restrict"),
            )),
        }
    }
}

/// Single source of truth for subjects, tasks and time blocks.
pub struct StudyStore {
    subjects: Vec<Subject>,
    tasks: Vec<Task>,
    time_blocks: Vec<TimeBlock>,
    rng: Mcg128Xsl64,
    clock: Box<dyn Clock>,
    config: Config,
}

impl StudyStore {
    /// Create an empty store.
    pub fn new(config: Config) -> Result<Self> {
        Self::from_state(StudyState::default(), config)
    }

    /// Create a store holding `state`. Every record is validated first.
    pub fn from_state(state: StudyState, config: Config) -> Result<Self> {
        config.validate()?;
        state.validate()?;
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Ok(Self {
            subjects: state.subjects,
            tasks: state.tasks,
            time_blocks: state.time_blocks,
            rng,
            clock: Box::new(SystemClock),
            config,
        })
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Restart the random source from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Mcg128Xsl64::seed_from_u64(seed);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Copy the current collections out.
    pub fn to_state(&self) -> StudyState {
        StudyState {
            subjects: self.subjects.clone(),
            tasks: self.tasks.clone(),
            time_blocks: self.time_blocks.clone(),
        }
    }

    pub fn into_state(self) -> StudyState {
        StudyState {
            subjects: self.subjects,
            tasks: self.tasks,
            time_blocks: self.time_blocks,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn time_blocks(&self) -> &[TimeBlock] {
        &self.time_blocks
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// First subject with the given name.
    pub fn subject_by_name(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn time_block(&self, id: &str) -> Option<&TimeBlock> {
        self.time_blocks.iter().find(|b| b.id == id)
    }

    /// Number of tasks and time blocks naming `subject`.
    pub fn references_to(&self, subject: &str) -> usize {
        self.tasks.iter().filter(|t| t.subject == subject).count()
            + self.time_blocks.iter().filter(|b| b.subject == subject).count()
    }

    // ── Subjects ──────────────────────────────────────────────────────

    pub fn add_subject(&mut self, draft: NewSubject) -> Result<Subject> {
        let subject = draft.into_subject();
        subject.validate()?;
        debug!(id = %subject.id, name = %subject.name, "subject added");
        self.subjects.push(subject.clone());
        Ok(subject)
    }

    /// Merge `patch` into a subject.
    ///
    /// A rename or recolor is copied into every task and time block that
    /// named the old subject, unless `subjects.cascade_renames` is off or
    /// another subject still goes by the old name.
    pub fn update_subject(&mut self, id: &str, patch: SubjectPatch) -> Result<Subject> {
        let index = self.subject_index(id)?;
        let mut updated = self.subjects[index].clone();
        updated.apply(patch);
        updated.validate()?;

        let shared = self.name_shared(index);
        let previous = std::mem::replace(&mut self.subjects[index], updated.clone());
        let renamed = previous.name != updated.name || previous.color != updated.color;
        if renamed && shared {
            debug!(name = %previous.name, "subject name shared, references left as is");
        } else if renamed && self.config.subjects.cascade_renames {
            let mut touched = 0usize;
            for task in self.tasks.iter_mut().filter(|t| t.subject == previous.name) {
                task.subject = updated.name.clone();
                task.subject_color = updated.color.clone();
                touched += 1;
            }
            for block in self.time_blocks.iter_mut().filter(|b| b.subject == previous.name) {
                block.subject = updated.name.clone();
                block.subject_color = updated.color.clone();
                touched += 1;
            }
            debug!(from = %previous.name, to = %updated.name, touched, "subject reference cascade");
        }
        debug!(id, "subject updated");
        Ok(updated)
    }

    /// Remove a subject, handling its tasks and blocks per
    /// `subjects.delete_policy`.
    ///
    /// While another subject carries the same name, the tasks and blocks
    /// naming it belong to that survivor and are left alone.
    pub fn delete_subject(&mut self, id: &str) -> Result<Subject> {
        let index = self.subject_index(id)?;
        let name = self.subjects[index].name.clone();
        let references = if self.name_shared(index) {
            0
        } else {
            self.references_to(&name)
        };

        match self.config.subjects.delete_policy {
            SubjectDeletePolicy::Restrict if references > 0 => {
                return Err(ValidationError::SubjectInUse { name, references }.into());
            }
            SubjectDeletePolicy::Cascade if references > 0 => {
                self.tasks.retain(|t| t.subject != name);
                self.time_blocks.retain(|b| b.subject != name);
            }
            _ => {}
        }

        let removed = self.subjects.remove(index);
        debug!(
            id,
            name = %removed.name,
            references,
            policy = %self.config.subjects.delete_policy,
            "subject deleted"
        );
        Ok(removed)
    }

    // ── Tasks ─────────────────────────────────────────────────────────

    /// Store a new task. It always starts as `To Do`, created now.
    pub fn add_task(&mut self, draft: NewTask) -> Result<Task> {
        let task = draft.into_task(self.clock.now());
        task.validate()?;
        debug!(id = %task.id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Merge `patch` into a task.
    ///
    /// Setting the status to `Completed` stamps the completion time with
    /// the current time; any other status clears it.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let index = self.task_index(id)?;
        let mut updated = self.tasks[index].clone();
        updated.apply(patch, self.clock.now());
        updated.validate()?;
        self.tasks[index] = updated.clone();
        debug!(id, status = %updated.status, "task updated");
        Ok(updated)
    }

    pub fn complete_task(&mut self, id: &str) -> Result<Task> {
        self.update_task(id, TaskPatch::status(TaskStatus::Completed))
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let index = self.task_index(id)?;
        let removed = self.tasks.remove(index);
        debug!(id, "task deleted");
        Ok(removed)
    }

    // ── Time blocks ───────────────────────────────────────────────────

    pub fn add_time_block(&mut self, draft: NewTimeBlock) -> Result<TimeBlock> {
        let block = draft.into_time_block();
        block.validate()?;
        debug!(id = %block.id, day = %block.day, "time block added");
        self.time_blocks.push(block.clone());
        Ok(block)
    }

    pub fn update_time_block(&mut self, id: &str, patch: TimeBlockPatch) -> Result<TimeBlock> {
        let index = self.time_block_index(id)?;
        let mut updated = self.time_blocks[index].clone();
        updated.apply(patch);
        updated.validate()?;
        self.time_blocks[index] = updated.clone();
        debug!(id, "time block updated");
        Ok(updated)
    }

    pub fn delete_time_block(&mut self, id: &str) -> Result<TimeBlock> {
        let index = self.time_block_index(id)?;
        let removed = self.time_blocks.remove(index);
        debug!(id, "time block deleted");
        Ok(removed)
    }

    // ── Generation ────────────────────────────────────────────────────

    /// Replace the whole timetable with a freshly generated weekly plan.
    ///
    /// Manually added blocks are discarded. Fails without touching the
    /// timetable when there are no subjects to plan.
    pub fn generate_timetable(&mut self) -> Result<&[TimeBlock]> {
        if self.subjects.is_empty() {
            return Err(ValidationError::EmptyCollection("no subjects to plan".into()).into());
        }
        let plan = heuristics::generate_study_plan(&self.subjects, &mut self.rng, &self.config.timetable);
        info!(
            replaced = self.time_blocks.len(),
            generated = plan.len(),
            "timetable regenerated"
        );
        self.time_blocks = plan;
        Ok(&self.time_blocks)
    }

    /// Append suggested tasks for the least-complete subjects and return
    /// copies of them. Existing tasks are never touched.
    pub fn suggest_tasks(&mut self) -> Vec<Task> {
        let now = self.clock.now();
        let suggested =
            heuristics::suggest_tasks(&self.subjects, &mut self.rng, now, &self.config.suggestions);
        info!(count = suggested.len(), "tasks suggested");
        self.tasks.extend(suggested.iter().cloned());
        suggested
    }

    /// True when a subject other than the one at `index` has its name.
    fn name_shared(&self, index: usize) -> bool {
        let name = &self.subjects[index].name;
        self.subjects
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && &s.name == name)
    }

    fn subject_index(&self, id: &str) -> Result<usize> {
        self.subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Subject, id))
    }

    fn task_index(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Task, id))
    }

    fn time_block_index(&self, id: &str) -> Result<usize> {
        self.time_blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::TimeBlock, id))
    }
}
