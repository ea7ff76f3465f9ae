use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// typesync - incremental synchronization for hand-maintained API typings
#[derive(Parser, Debug)]
#[command(name = "typesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./typesync.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the typings module from service references
    Sync {
        /// Persisted typings module
        #[arg(long)]
        types: Option<PathBuf>,

        /// Service sources (files or directories)
        #[arg(long, value_delimiter = ',')]
        services: Option<Vec<PathBuf>>,

        /// Freshly generated typings
        #[arg(long)]
        fresh: Option<PathBuf>,

        /// Dry run - plan without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Preview the rebuild as a unified diff, without writing
    Diff {
        /// Persisted typings module
        #[arg(long)]
        types: Option<PathBuf>,

        /// Service sources (files or directories)
        #[arg(long, value_delimiter = ',')]
        services: Option<Vec<PathBuf>>,

        /// Freshly generated typings
        #[arg(long)]
        fresh: Option<PathBuf>,
    },

    /// Show entry signatures and the reference closure
    Scan {
        /// Service sources (files or directories)
        #[arg(long, value_delimiter = ',')]
        services: Option<Vec<PathBuf>>,

        /// Freshly generated typings
        #[arg(long)]
        fresh: Option<PathBuf>,
    },
}
