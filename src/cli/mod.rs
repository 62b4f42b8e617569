mod analyze;
mod check;
mod config_cmd;
mod genres;
mod search;
mod session;

pub use analyze::run_analyze;
pub use check::run_check;
pub use config_cmd::run_config;
pub use genres::run_genres;
pub use search::run_search;
pub use session::run_session;

use crate::generation::AnalysisKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookclub")]
#[command(author, version, about = "Discover books by genre and get AI-powered summaries, discussion questions and reading guides")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (can repeat: -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and results
    #[arg(short, long)]
    pub quiet: bool,

    /// Log format: text (default) or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the genres you can search
    Genres,

    /// Search Open Library for books in a genre
    Search {
        /// Genre keyword, e.g. "mystery" or "science fiction"
        genre: String,

        /// Maximum number of books (1-20)
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Skip fetching book descriptions
        #[arg(long)]
        no_descriptions: bool,
    },

    /// Search a genre, pick a book and generate an analysis of it
    Analyze {
        /// Genre keyword, e.g. "mystery" or "science fiction"
        genre: String,

        /// Book number from the search results (starting at 1)
        #[arg(long)]
        book: Option<usize>,

        /// Kind of analysis to generate
        #[arg(long, value_enum)]
        kind: Option<AnalysisKind>,

        /// Maximum number of books to choose from (1-20)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Check that the generation service and the catalog are reachable
    Check,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective config (file, defaults and environment overrides)
    Show,

    /// Print config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
