//! Tracing subscriber setup.

use std::env;
use std::io;

use tracing::level_filters::LevelFilter;

const LOG_ENV: &str = "PATHPRUNE_LOG";

/// Install the global fmt subscriber writing to stderr.
///
/// `PATHPRUNE_LOG` wins over `verbosity` when it names a valid level. Calling this twice is
/// harmless; the second install is ignored.
pub fn init(verbosity: u8) {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or_else(|| level_for_verbosity(verbosity));

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}
