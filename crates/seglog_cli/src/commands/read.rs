//! Read command implementation.

use seglog_core::{Config, Log};
use std::io::Write;
use std::path::Path;

/// Runs the read command: prints the raw value at `offset` to stdout.
pub fn run(dir: &Path, config: Config, offset: u64) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.exists() {
        return Err(format!("No log found at {}", dir.display()).into());
    }

    let log = Log::open(dir, config)?;
    let record = log.read(offset)?;
    log.close()?;

    std::io::stdout().write_all(&record.value)?;
    Ok(())
}
