//! Command-line interface definitions for mediadex.
//!
//! Global options (verbosity, color, error format) apply to every
//! subcommand.
//!
//! # Example
//!
//! ```bash
//! # Index the current directory into the store at ~/Pictures
//! mediadex index --db ~/Pictures
//!
//! # Index an import folder and review duplicates interactively
//! mediadex index ~/Pictures/incoming --db ~/Pictures --delete
//!
//! # Which file holds this content?
//! mediadex lookup --db ~/Pictures --digest 2QHO6MXUEBBU5EXFUJZFL2JF5E
//!
//! # Digest of a single file
//! mediadex hash IMG_0001.JPG
//!
//! # Write the effective settings to the config file
//! mediadex config --init
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content-addressed photo and video index.
///
/// mediadex records a digest for every photo and video under a root, notices
/// when indexed files move, and reports copies that live in two places.
#[derive(Debug, Parser)]
#[command(name = "mediadex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as a JSON object on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk a directory and bring the index up to date
    Index(IndexArgs),
    /// Query the index by path or by digest
    Lookup(LookupArgs),
    /// Print the digest of a single media file
    Hash(HashArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the index subcommand.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Directory to walk (defaults to the store root)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Directory holding the index (defaults to config, then the current directory)
    #[arg(long, value_name = "STORE_ROOT")]
    pub db: Option<PathBuf>,

    /// Prompt after each duplicate group to delete one side
    #[arg(long)]
    pub delete: bool,

    /// Use permanent deletion instead of moving to trash
    ///
    /// Warning: Files cannot be recovered after permanent deletion.
    #[arg(long, requires = "delete")]
    pub permanent: bool,

    /// Output format (defaults to config, then text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Follow symbolic links during the walk
    #[arg(long)]
    pub follow_symlinks: bool,
}

/// Arguments for the lookup subcommand.
#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("query").required(true).args(["path", "digest"])))]
pub struct LookupArgs {
    /// Directory holding the index (defaults to config, then the current directory)
    #[arg(long, value_name = "STORE_ROOT")]
    pub db: Option<PathBuf>,

    /// Print the digest recorded for this file
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Print the path recorded for this digest
    #[arg(long, value_name = "DIGEST")]
    pub digest: Option<String>,
}

/// Arguments for the hash subcommand.
#[derive(Debug, Args)]
pub struct HashArgs {
    /// Photo or video to hash
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the config subcommand.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing config file
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Output format for index results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
