//! Truncate command implementation.

use seglog_core::{Config, Log};
use std::path::Path;

/// Runs the truncate command: drops every segment fully consumed below
/// the retention floor.
pub fn run(dir: &Path, config: Config, lowest: u64) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.exists() {
        return Err(format!("No log found at {}", dir.display()).into());
    }

    let log = Log::open(dir, config)?;
    let before = log.lowest_offset();
    log.truncate(lowest)?;
    let after = log.lowest_offset();
    log.close()?;

    println!("lowest offset: {before} -> {after}");
    Ok(())
}
