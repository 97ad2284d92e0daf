//! Append command implementation.

use seglog_core::{Config, Log, Record};
use std::io::Read;
use std::path::Path;

/// Runs the append command. Reads the value from the argument, or from
/// stdin when no argument was given.
pub fn run(
    dir: &Path,
    config: Config,
    value: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = match value {
        Some(v) => v.as_bytes().to_vec(),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let log = Log::open(dir, config)?;
    let mut record = Record::new(value);
    let offset = log.append(&mut record)?;
    log.close()?;

    println!("{offset}");
    Ok(())
}
