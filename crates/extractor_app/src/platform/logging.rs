//! Platform logging initialization for extractor_app.
//!
//! Logs go to `./extractor.log` by default so they do not interleave with
//! the interactive display. `EXTRACTOR_LOG` picks the destination
//! (`file`, `terminal`, `both`, `off`) and `EXTRACTOR_LOG_LEVEL` the level.

use std::path::Path;
use std::str::FromStr;

use extractor_logging::LogDestination;
use log::LevelFilter;

pub const LOG_DESTINATION_ENV: &str = "EXTRACTOR_LOG";
pub const LOG_LEVEL_ENV: &str = "EXTRACTOR_LOG_LEVEL";
const LOG_FILE: &str = "./extractor.log";

pub fn initialize_from_env() {
    let destination = destination_from(std::env::var(LOG_DESTINATION_ENV).ok().as_deref());
    let level = level_from(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    extractor_logging::initialize(destination, level, Path::new(LOG_FILE));
}

fn destination_from(value: Option<&str>) -> LogDestination {
    value
        .and_then(LogDestination::parse)
        .unwrap_or(LogDestination::File)
}

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}
