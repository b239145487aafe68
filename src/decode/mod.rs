//! Record decoder module
//!
//! Supports: COMPACT tables, STANDARD-XML trees
//!
//! # Overview
//!
//! The decode module turns the element tree of a successful reply into
//! records. COMPACT replies carry delimiter-separated rows under a single
//! header; STANDARD-XML replies carry nested elements that are converted
//! into self-describing [`Node`] values.

mod compact;
mod tree;

pub use compact::{split_line, CompactTable, Rows, COLUMNS, DATA, DEFAULT_DELIMITER, DELIMITER};
pub use tree::{element_to_tree, node_value, Node, TEXT_KEY};
