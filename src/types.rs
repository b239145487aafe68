//! Common types used throughout rets-parse
//!
//! This module contains the typed records produced by the parsers and a
//! few shared type aliases.

use crate::decode::Node;
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// One COMPACT data record: column name to value, in column order
pub type Row = IndexMap<String, Option<String>>;

/// Capability name to URL, as returned by a Login transaction
pub type CapabilityUrls = HashMap<String, String>;

// ============================================================================
// Metadata
// ============================================================================

/// One `METADATA-*` container of a GetMetadata reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Container tag without the `METADATA-` prefix (e.g. `RESOURCE`, `TABLE`)
    #[serde(rename = "type")]
    pub metadata_type: String,
    /// `Resource` attribute
    pub resource: Option<String>,
    /// `Class` attribute
    pub class: Option<String>,
    /// `Version` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// `Date` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Rows of the container's table
    pub rows: Vec<Row>,
}

/// Server description from a `METADATA-SYSTEM` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMetadata {
    pub system_id: String,
    pub system_description: String,
    pub system_date: String,
    pub system_version: String,
    pub time_zone_offset: Option<String>,
    pub comments: Option<String>,
}

impl SystemMetadata {
    /// `system_date` as a timestamp, if it is RFC 3339
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.system_date).ok()
    }
}

// ============================================================================
// Search
// ============================================================================

/// One search record in the shape of its wire format
///
/// Serializes as the bare row or subtree. A row and a flat subtree share a
/// JSON shape, so records are read back as [`Row`] or [`Node`] directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// COMPACT row
    Row(Row),
    /// STANDARD-XML record subtree
    Node(Node),
}

impl Record {
    /// The COMPACT row, if this is one
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Record::Row(row) => Some(row),
            Record::Node(_) => None,
        }
    }

    /// The STANDARD-XML subtree, if this is one
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Record::Node(node) => Some(node),
            Record::Row(_) => None,
        }
    }
}

/// Result of a Search transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// `Records` attribute of `COUNT`, when the server reported one
    pub count: Option<u64>,
    /// Whether the server truncated the result (`MAXROWS` present)
    pub max_rows: bool,
    /// Records, absent when the reply carried no row structure
    pub data: Option<Vec<Record>>,
}

impl SearchResult {
    /// Result of a search that matched nothing
    pub fn empty() -> Self {
        Self {
            count: Some(0),
            max_rows: false,
            data: Some(Vec::new()),
        }
    }

    /// Number of records carried
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    /// Whether no records were carried
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// COMPACT rows of the result
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.data.iter().flatten().filter_map(Record::as_row)
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
