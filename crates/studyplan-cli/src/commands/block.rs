//! Time block management commands for CLI.

use std::path::Path;

use chrono::NaiveTime;
use clap::Subcommand;
use studyplan_core::views::day_schedule;
use studyplan_core::{NewTimeBlock, TimeBlock, TimeBlockPatch, Weekday};

use super::{parse_time, print_json, subject_color, CmdResult, Session};

#[derive(Subcommand)]
pub enum BlockAction {
    /// Add a weekly time block
    Add {
        /// Weekday (e.g. Monday or mon)
        day: Weekday,
        /// Start time (HH:MM)
        #[arg(value_parser = parse_time)]
        start: NaiveTime,
        /// End time (HH:MM)
        #[arg(value_parser = parse_time)]
        end: NaiveTime,
        /// Subject name
        #[arg(long)]
        subject: String,
        /// Subject color (default: color of the named subject)
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List time blocks
    List {
        /// Only blocks on this day, earliest first
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Update a time block
    Update {
        /// Block ID
        id: String,
        #[arg(long)]
        day: Option<Weekday>,
        #[arg(long, value_parser = parse_time)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = parse_time)]
        end: Option<NaiveTime>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a time block
    Delete {
        /// Block ID
        id: String,
    },
}

pub fn run(action: BlockAction, state: Option<&Path>) -> CmdResult {
    let mut session = Session::open(state)?;

    match action {
        BlockAction::Add {
            day,
            start,
            end,
            subject,
            color,
            description,
        } => {
            let subject_color = subject_color(&session.store, &subject, color)?;
            let block = session.store.add_time_block(NewTimeBlock {
                day,
                start_time: start,
                end_time: end,
                subject,
                subject_color,
                description,
            })?;
            session.save()?;
            print_json(&block)?;
        }
        BlockAction::List { day } => {
            let blocks: Vec<&TimeBlock> = match day {
                Some(day) => day_schedule(session.store.time_blocks(), day),
                None => session.store.time_blocks().iter().collect(),
            };
            print_json(&blocks)?;
        }
        BlockAction::Update {
            id,
            day,
            start,
            end,
            subject,
            color,
            description,
        } => {
            let subject_color = match (&subject, color) {
                (Some(name), color) => Some(subject_color(&session.store, name, color)?),
                (None, color) => color,
            };
            let patch = TimeBlockPatch {
                day,
                start_time: start,
                end_time: end,
                subject,
                subject_color,
                description: description.map(Some),
            };
            if patch == TimeBlockPatch::default() {
                return Err("nothing to update".into());
            }
            let block = session.store.update_time_block(&id, patch)?;
            session.save()?;
            print_json(&block)?;
        }
        BlockAction::Delete { id } => {
            let removed = session.store.delete_time_block(&id)?;
            session.save()?;
            println!("Time block deleted: {}", removed.id);
        }
    }
    Ok(())
}
