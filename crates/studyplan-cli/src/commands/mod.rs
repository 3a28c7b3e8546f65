pub mod block;
pub mod config;
pub mod progress;
pub mod subject;
pub mod suggest;
pub mod task;
pub mod timetable;

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::Serialize;
use studyplan_core::model::hhmm;
use studyplan_core::{Config, StudyState, StudyStore};
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn Error>>;

/// A loaded state file plus the store built from it.
///
/// Commands mutate `store` and call [`Session::save`] to write the state
/// back to the file it came from.
pub struct Session {
    path: PathBuf,
    pub store: StudyStore,
}

impl Session {
    /// Load the state at `state` (or the default state file) with the
    /// user's config. A missing state file starts from the sample catalog.
    pub fn open(state: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let path = match state {
            Some(path) => path.to_path_buf(),
            None => StudyState::default_path()?,
        };
        let config = Config::load()?;
        let snapshot = StudyState::load_json_or_sample(&path)?;
        let store = StudyStore::from_state(snapshot, config)?;
        Ok(Self { path, store })
    }

    pub fn save(&self) -> CmdResult {
        self.store.to_state().save_json(&self.path)?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse an `HH:MM` argument.
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    hhmm::parse("time", value).map_err(|e| e.to_string())
}

/// Color to store next to a subject name: the explicit one, else the color
/// of the subject with that name.
pub fn subject_color(
    store: &StudyStore,
    subject: &str,
    color: Option<String>,
) -> Result<String, Box<dyn Error>> {
    match color {
        Some(color) => Ok(color),
        None => store
            .subject_by_name(subject)
            .map(|s| s.color.clone())
            .ok_or_else(|| format!("unknown subject '{subject}', pass --color").into()),
    }
}

/// Overwrite the state file with the sample catalog.
pub fn reset(state: Option<&Path>) -> CmdResult {
    let path = match state {
        Some(path) => path.to_path_buf(),
        None => StudyState::default_path()?,
    };
    let sample = StudyState::sample();
    sample.save_json(&path)?;
    println!("state reset to sample catalog: {}", path.display());
    Ok(())
}
