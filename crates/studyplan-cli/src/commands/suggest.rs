use std::path::Path;

use super::{print_json, CmdResult, Session};

/// Append suggested tasks for the least-complete subjects and print them.
pub fn run(seed: Option<u64>, state: Option<&Path>) -> CmdResult {
    let mut session = Session::open(state)?;
    if let Some(seed) = seed {
        session.store.reseed(seed);
    }
    let suggested = session.store.suggest_tasks();
    session.save()?;
    print_json(&suggested)
}
