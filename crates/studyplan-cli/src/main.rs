use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Study planner CLI")]
struct Cli {
    /// State file (default: <data dir>/state.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Time block management
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Weekly timetable generation
    Timetable {
        #[command(subcommand)]
        action: commands::timetable::TimetableAction,
    },
    /// Suggest tasks for the least-complete subjects
    Suggest {
        /// Seed for this run (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Study hour and task completion report
    Progress,
    /// Tasks due today, upcoming and overdue, plus today's blocks
    Dashboard {
        /// Day to report on (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Restore the sample catalog
    Reset,
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let state = cli.state.as_deref();
    let result = match cli.command {
        Commands::Subject { action } => commands::subject::run(action, state),
        Commands::Task { action } => commands::task::run(action, state),
        Commands::Block { action } => commands::block::run(action, state),
        Commands::Timetable { action } => commands::timetable::run(action, state),
        Commands::Suggest { seed } => commands::suggest::run(seed, state),
        Commands::Progress => commands::progress::progress(state),
        Commands::Dashboard { date } => commands::progress::dashboard(date, state),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset => commands::reset(state),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyplan", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
