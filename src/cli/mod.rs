//! CLI module
//!
//! Command-line interface for decoding saved reply bodies.
//!
//! # Commands
//!
//! - `capabilities` - Capability URLs of a Login reply
//! - `metadata` - Metadata containers of a GetMetadata reply
//! - `system` - System description of a METADATA-SYSTEM reply
//! - `search` - Records of a Search reply
//! - `formats` - Recognized response formats and what they support

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
