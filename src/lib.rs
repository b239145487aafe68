// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # rets-parse
//!
//! Decoders for RETS (Real Estate Transaction Standard) reply bodies.
//!
//! A RETS server answers in one of two wire formats, and reports success or
//! failure inside the body rather than through the HTTP status. This crate
//! turns already-buffered reply bytes into typed records for either format.
//!
//! ## Features
//!
//! - **Envelope decoding**: `ReplyCode`/`ReplyText` resolution, with
//!   `RETS-STATUS` taking precedence over the root element
//! - **COMPACT tables**: delimiter-separated `COLUMNS`/`DATA` rows
//! - **STANDARD-XML trees**: namespaced records converted to nested values
//! - **Typed results**: capability URLs, metadata, system metadata, search
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rets_parse::{ResponseFormat, ResponseParser, Result};
//!
//! fn count_listings(body: &[u8]) -> Result<Option<u64>> {
//!     let parser = ResponseFormat::select("COMPACT")?;
//!     let result = parser.parse_search(body)?;
//!     Ok(result.count)
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            ResponseFormat::select("COMPACT" | "STANDARD-XML")   │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴─────────────────────────────────┐
//! │  envelope::decode → Element tree + ReplyStatus check            │
//! └───────────────┬─────────────────────────────────┬───────────────┘
//!                 │                                 │
//! ┌───────────────┴───────────────┐ ┌───────────────┴───────────────┐
//! │ CompactParser                 │ │ StandardXmlParser             │
//! │  CompactTable (COLUMNS/DATA)  │ │  node_value (nested trees)    │
//! │  capabilities, metadata,      │ │  search only                  │
//! │  system, search               │ │                               │
//! └───────────────────────────────┘ └───────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Reply envelope and status decoding
pub mod envelope;

/// Record decoders (COMPACT tables, STANDARD-XML trees)
pub mod decode;

/// Per-format reply parsers and format selection
pub mod parser;

/// Configuration for the command-line tool
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use decode::Node;
pub use parser::{CompactParser, ResponseFormat, ResponseParser, StandardXmlParser};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
