//! Subject management commands for CLI.

use std::path::Path;

use clap::Subcommand;
use studyplan_core::{NewSubject, SubjectPatch};

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        /// Subject name
        name: String,
        /// Display color (#RRGGBB)
        #[arg(long)]
        color: String,
        /// Priority rank, 1 (low) to 3 (high)
        #[arg(long, default_value_t = 2)]
        priority: u8,
        /// Planned study hours
        #[arg(long)]
        total_hours: f64,
        /// Hours already studied
        #[arg(long, default_value_t = 0.0)]
        completed_hours: f64,
    },
    /// List subjects
    List,
    /// Get subject details
    Get {
        /// Subject ID
        id: String,
    },
    /// Update a subject
    Update {
        /// Subject ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        priority: Option<u8>,
        #[arg(long)]
        total_hours: Option<f64>,
        #[arg(long)]
        completed_hours: Option<f64>,
    },
    /// Delete a subject
    Delete {
        /// Subject ID
        id: String,
    },
}

pub fn run(action: SubjectAction, state: Option<&Path>) -> CmdResult {
    let mut session = Session::open(state)?;

    match action {
        SubjectAction::Add {
            name,
            color,
            priority,
            total_hours,
            completed_hours,
        } => {
            let subject = session.store.add_subject(
                NewSubject::new(name, color, priority, total_hours)
                    .with_completed_hours(completed_hours),
            )?;
            session.save()?;
            print_json(&subject)?;
        }
        SubjectAction::List => {
            print_json(session.store.subjects())?;
        }
        SubjectAction::Get { id } => match session.store.subject(&id) {
            Some(subject) => print_json(subject)?,
            None => return Err(format!("subject not found: {id}").into()),
        },
        SubjectAction::Update {
            id,
            name,
            color,
            priority,
            total_hours,
            completed_hours,
        } => {
            let patch = SubjectPatch {
                name,
                color,
                priority,
                total_hours,
                completed_hours,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            let subject = session.store.update_subject(&id, patch)?;
            session.save()?;
            print_json(&subject)?;
        }
        SubjectAction::Delete { id } => {
            let removed = session.store.delete_subject(&id)?;
            session.save()?;
            println!("Subject deleted: {}", removed.id);
        }
    }
    Ok(())
}
