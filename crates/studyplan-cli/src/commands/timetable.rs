//! Weekly timetable commands for CLI.

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;
use studyplan_core::views::day_schedule;
use studyplan_core::{TimeBlock, Weekday};

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Replace every time block with a generated weekly plan
    Generate {
        /// Seed for this run (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the timetable day by day
    Show {
        /// Only this day
        #[arg(long)]
        day: Option<Weekday>,
    },
}

#[derive(Serialize)]
struct DaySchedule<'a> {
    day: Weekday,
    blocks: Vec<&'a TimeBlock>,
}

fn week(blocks: &[TimeBlock], only: Option<Weekday>) -> Vec<DaySchedule<'_>> {
    Weekday::ALL
        .into_iter()
        .filter(|day| only.map_or(true, |only| only == *day))
        .map(|day| DaySchedule {
            day,
            blocks: day_schedule(blocks, day),
        })
        .collect()
}

pub fn run(action: TimetableAction, state: Option<&Path>) -> CmdResult {
    let mut session = Session::open(state)?;

    match action {
        TimetableAction::Generate { seed } => {
            if let Some(seed) = seed {
                session.store.reseed(seed);
            }
            session.store.generate_timetable()?;
            session.save()?;
            print_json(&week(session.store.time_blocks(), None))?;
        }
        TimetableAction::Show { day } => {
            print_json(&week(session.store.time_blocks(), day))?;
        }
    }
    Ok(())
}
