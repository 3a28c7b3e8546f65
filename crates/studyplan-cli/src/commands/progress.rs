//! Read-only reports: progress and dashboard.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use studyplan_core::{Dashboard, ProgressReport};

use super::{print_json, CmdResult, Session};

pub fn progress(state: Option<&Path>) -> CmdResult {
    let session = Session::open(state)?;
    let report = ProgressReport::build(session.store.subjects(), session.store.tasks());
    print_json(&report)
}

/// Dashboard for `date`, today (UTC) by default.
pub fn dashboard(date: Option<NaiveDate>, state: Option<&Path>) -> CmdResult {
    let session = Session::open(state)?;
    let today = date.unwrap_or_else(|| Utc::now().date_naive());
    let dashboard = Dashboard::build(&session.store.to_state(), today);
    print_json(&dashboard)
}
