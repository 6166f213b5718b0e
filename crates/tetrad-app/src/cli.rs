//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tetrad_catalog::MergeStrategy;

/// Share link prefix used when none is configured.
pub const DEFAULT_SHARE_BASE_URL: &str = "http://bubbulon.com/cm/";

/// Word-grouping puzzles: play, author and share.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Global settings.
    #[command(flatten)]
    pub config: Config,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub struct Config {
    /// Directory holding the puzzle catalog.
    #[arg(
        long,
        env = "TETRAD_DATA_DIR",
        value_name = "DIR",
        default_value = "tetrad-data",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Prefix of share links; links look like `<URL>add/<token>`.
    #[arg(
        long,
        env = "TETRAD_SHARE_BASE_URL",
        value_name = "URL",
        default_value = DEFAULT_SHARE_BASE_URL,
        global = true
    )]
    pub share_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("tetrad-data"),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_owned(),
        }
    }
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List authored and played puzzles.
    List,
    /// Print a blank puzzle to fill in.
    Template,
    /// Validate a puzzle JSON file and save it as an authored puzzle.
    Author {
        /// Puzzle JSON file.
        file: PathBuf,
        /// Overwrite the authored puzzle at this index instead of appending.
        #[arg(long)]
        index: Option<usize>,
    },
    /// Delete authored puzzles.
    Delete {
        /// Indices as shown by `list`.
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Print a share link for authored puzzles.
    Share {
        /// Indices as shown by `list`.
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Add puzzles from a share link or token.
    Add {
        /// A share link or the bare token.
        token: String,
    },
    /// Export authored puzzles as JSON.
    Export {
        /// Indices as shown by `list`.
        #[arg(required = true)]
        indices: Vec<usize>,
        /// Write to this file instead of standard output.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import authored puzzles from an export file.
    Import {
        /// Export file.
        file: PathBuf,
        /// What to do when a puzzle with the same title exists.
        #[arg(long, value_name = "STRATEGY", default_value = "duplicate")]
        strategy: Strategy,
    },
    /// Remove played puzzles and their progress.
    Remove {
        /// Puzzle identities as shown by `list`.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Play a puzzle from the played catalog, saving progress.
    Play {
        /// Puzzle identity as shown by `list`.
        id: String,
    },
    /// Try an authored puzzle without saving anything.
    Playtest {
        /// Index as shown by `list`.
        index: usize,
    },
}

/// Merge strategy for `import`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Keep both puzzles.
    Duplicate,
    /// Overwrite the existing puzzle.
    Replace,
    /// Keep the existing puzzle.
    Skip,
}

impl From<Strategy> for MergeStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Duplicate => Self::Duplicate,
            Strategy::Replace => Self::Replace,
            Strategy::Skip => Self::Skip,
        }
    }
}
