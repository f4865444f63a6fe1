//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--project, --source-dir, --protoc, --json, --verbose) are
//!   inherited by all subcommands
//! - Paths given on the command line are relative to the working directory

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// protosync - compile .proto schemas for every configured language
#[derive(Parser, Debug)]
#[command(name = "protosync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root (default: nearest directory with .protosync/ or .git)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// Only discover schemas below this directory (relative to the project root)
    #[arg(long, global = true)]
    pub source_dir: Option<PathBuf>,

    /// protoc binary to run
    #[arg(long, global = true)]
    pub protoc: Option<PathBuf>,

    /// Output as JSON (NDJSON for watch)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the given schema files as if they had just changed
    Compile {
        /// Schema files to compile
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Recompile every schema file in the project
    Build {
        /// Number of worker threads
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },

    /// Watch for changes and recompile continuously
    Watch {
        /// Rebuild everything before watching
        #[arg(long)]
        build: bool,
    },

    /// Create a new schema file from the built-in template
    New {
        /// Directory to create the file in
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// File name (without .proto)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show which config applies to a schema file and what would run
    Explain {
        /// Schema file to explain
        file: PathBuf,
    },
}
