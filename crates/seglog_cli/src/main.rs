//! seglog CLI
//!
//! Command-line tools for seglog commit logs.
//!
//! # Commands
//!
//! - `inspect` - Display log offsets and segment layout
//! - `append` - Append a record and print its offset
//! - `read` - Read the record at an offset
//! - `truncate` - Drop segments below a retention offset

mod commands;

use clap::{Parser, Subcommand};
use seglog_core::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// seglog command-line log tools.
#[derive(Parser)]
#[command(name = "seglog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the log directory
    #[arg(global = true, short, long)]
    dir: Option<PathBuf>,

    /// Maximum store bytes per segment
    #[arg(global = true, long)]
    max_store_bytes: Option<u64>,

    /// Maximum index bytes per segment
    #[arg(global = true, long)]
    max_index_bytes: Option<u64>,

    /// Base offset for a fresh log
    #[arg(global = true, long)]
    initial_offset: Option<u64>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display log offsets and segment layout
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Append a record and print its assigned offset
    Append {
        /// Record value; reads stdin when omitted
        value: Option<String>,
    },

    /// Read the record at an offset
    Read {
        /// Absolute offset to read
        offset: u64,
    },

    /// Drop segments fully below a retention offset
    Truncate {
        /// Retention floor: offsets at or below this may be dropped
        lowest: u64,
    },

    /// Show version information
    Version,
}

impl Cli {
    fn engine_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(max) = self.max_store_bytes {
            config = config.max_store_bytes(max);
        }
        if let Some(max) = self.max_index_bytes {
            config = config.max_index_bytes(max);
        }
        if let Some(offset) = self.initial_offset {
            config = config.initial_offset(offset);
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.engine_config();
    tracing::debug!(?config, "resolved engine configuration");

    match cli.command {
        Commands::Inspect { format } => {
            let dir = cli.dir.ok_or("Log directory required for inspect")?;
            commands::inspect::run(&dir, config, &format)?;
        }
        Commands::Append { value } => {
            let dir = cli.dir.ok_or("Log directory required for append")?;
            commands::append::run(&dir, config, value.as_deref())?;
        }
        Commands::Read { offset } => {
            let dir = cli.dir.ok_or("Log directory required for read")?;
            commands::read::run(&dir, config, offset)?;
        }
        Commands::Truncate { lowest } => {
            let dir = cli.dir.ok_or("Log directory required for truncate")?;
            commands::truncate::run(&dir, config, lowest)?;
        }
        Commands::Version => {
            println!("seglog CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
