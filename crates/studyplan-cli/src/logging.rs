//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Output goes to stderr so JSON on stdout stays machine readable.
//!
//! # Log Levels
//!
//! - `warn` (default): nothing but problems
//! - `info` (`-v`): generation summaries
//! - `debug` (`-vv`): every store mutation, state file loads
//! - `trace` (`-vvv`)
//!
//! `STUDYPLAN_LOG` takes precedence over `-v` and accepts any `EnvFilter`
//! directive, e.g. `STUDYPLAN_LOG=studyplan_core=debug`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "STUDYPLAN_LOG";

/// Map the `-v` count to a level.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(level_from_verbosity(verbosity).as_str().to_ascii_lowercase())
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
