//! Inspect command implementation.

use seglog_core::{Config, Log};
use serde::Serialize;
use std::path::Path;

/// Log inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Log directory path.
    pub dir: String,
    /// Lowest offset held by the log.
    pub lowest_offset: u64,
    /// Highest offset held by the log.
    pub highest_offset: u64,
    /// Number of segments.
    pub segment_count: usize,
    /// Per-segment offset ranges.
    pub segments: Vec<SegmentStats>,
}

/// Statistics for a single segment.
#[derive(Debug, Serialize)]
pub struct SegmentStats {
    /// Lowest absolute offset the segment can hold.
    pub base_offset: u64,
    /// Offset the next append to this segment would be assigned.
    pub next_offset: u64,
    /// Records currently held.
    pub records: u64,
}

/// Runs the inspect command.
pub fn run(dir: &Path, config: Config, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.exists() {
        return Err(format!("No log found at {}", dir.display()).into());
    }

    let log = Log::open(dir, config)?;

    let segments: Vec<SegmentStats> = log
        .segment_ranges()
        .into_iter()
        .map(|(base, next)| SegmentStats {
            base_offset: base,
            next_offset: next,
            records: next - base,
        })
        .collect();

    let result = InspectResult {
        dir: dir.display().to_string(),
        lowest_offset: log.lowest_offset(),
        highest_offset: log.highest_offset(),
        segment_count: segments.len(),
        segments,
    };

    log.close()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text_output(&result),
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Log: {}", result.dir);
    println!("  lowest offset:  {}", result.lowest_offset);
    println!("  highest offset: {}", result.highest_offset);
    println!("  segments:       {}", result.segment_count);
    for segment in &result.segments {
        println!(
            "    [{}, {}) - {} record(s)",
            segment.base_offset, segment.next_offset, segment.records
        );
    }
}
