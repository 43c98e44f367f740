use std::env;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::config::LOG_LEVEL_ENV;

fn level_from_env() -> LevelFilter {
    env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::INFO)
}

/// Plain report lines on stdout: no timestamp, level or target prefix.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_from_env())
        .with_target(false)
        .with_level(false)
        .without_time()
        .with_writer(std::io::stdout)
        .try_init();
}
