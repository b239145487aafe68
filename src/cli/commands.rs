//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Decode saved RETS reply bodies
#[derive(Parser, Debug)]
#[command(name = "rets-parse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Response format (COMPACT or STANDARD-XML), overrides the config file
    #[arg(short = 'F', long, global = true)]
    pub response_format: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode the capability URLs of a Login reply
    Capabilities {
        /// Reply body file ("-" for stdin)
        file: PathBuf,
    },

    /// Decode a GetMetadata reply
    Metadata {
        /// Reply body file ("-" for stdin)
        file: PathBuf,
    },

    /// Decode a METADATA-SYSTEM reply
    System {
        /// Reply body file ("-" for stdin)
        file: PathBuf,
    },

    /// Decode a Search reply
    Search {
        /// Reply body file ("-" for stdin)
        file: PathBuf,
    },

    /// List recognized response formats
    Formats,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (single line)
    Json,
    /// Indented JSON
    Pretty,
}
