//! Parser types and traits
//!
//! Defines the response format selector and the parser contract shared by
//! both wire formats.

use super::{CompactParser, StandardXmlParser};
use crate::envelope::{Charset, Element, TagNames};
use crate::error::{Error, Result};
use crate::types::{CapabilityUrls, Metadata, SearchResult, SystemMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format name of the tabular encoding
pub const COMPACT_FORMAT: &str = "COMPACT";

/// Format name of the tree encoding
pub const STANDARD_XML_FORMAT: &str = "STANDARD-XML";

/// Wire format of a reply body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResponseFormat {
    /// Delimiter-separated COLUMNS/DATA tables (default)
    #[default]
    Compact,
    /// Namespaced, self-describing element trees
    StandardXml,
}

impl ResponseFormat {
    /// All recognized formats
    pub const ALL: [ResponseFormat; 2] = [ResponseFormat::Compact, ResponseFormat::StandardXml];

    /// Select the format for an exact format name
    pub fn select(name: &str) -> Result<Self> {
        match name {
            COMPACT_FORMAT => Ok(Self::Compact),
            STANDARD_XML_FORMAT => Ok(Self::StandardXml),
            other => Err(Error::unsupported_format(other)),
        }
    }

    /// Format name as sent on the wire
    pub fn name(self) -> &'static str {
        match self {
            Self::Compact => COMPACT_FORMAT,
            Self::StandardXml => STANDARD_XML_FORMAT,
        }
    }

    /// How tag names are normalized when decoding this format
    pub fn tag_names(self) -> TagNames {
        match self {
            Self::Compact => TagNames::Raw,
            Self::StandardXml => TagNames::Local,
        }
    }

    /// How body bytes are turned into text when decoding this format
    pub fn charset(self) -> Charset {
        match self {
            Self::Compact => Charset::Declared,
            Self::StandardXml => Charset::Utf8,
        }
    }

    /// Whether this format implements an operation
    pub fn supports(self, operation: Operation) -> bool {
        match self {
            Self::Compact => true,
            Self::StandardXml => operation == Operation::Search,
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::select(s)
    }
}

impl TryFrom<String> for ResponseFormat {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::select(&value)
    }
}

impl From<ResponseFormat> for String {
    fn from(format: ResponseFormat) -> Self {
        format.name().to_string()
    }
}

/// Extraction operations a parser may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Capability URLs of a Login reply
    CapabilityUrls,
    /// `METADATA-*` containers of a GetMetadata reply
    Metadata,
    /// `METADATA-SYSTEM` reply
    System,
    /// Search reply
    Search,
}

impl Operation {
    /// Operation name used in errors
    pub fn name(self) -> &'static str {
        match self {
            Self::CapabilityUrls => "parse_capability_urls",
            Self::Metadata => "parse_metadata",
            Self::System => "parse_system",
            Self::Search => "parse_search",
        }
    }

    /// Error for an operation a format does not implement
    pub fn unsupported(self, format: ResponseFormat) -> Error {
        Error::NotSupportedByFormat {
            operation: self.name(),
            format: format.name(),
        }
    }
}

/// Trait for parsing reply bodies into typed records
pub trait ResponseParser: Send + Sync {
    /// Wire format handled by this parser
    fn format(&self) -> ResponseFormat;

    /// Decode the reply envelope, failing on an error status
    fn parse_xml(&self, body: &[u8]) -> Result<Element> {
        let format = self.format();
        crate::envelope::decode(body, format.tag_names(), format.charset())
    }

    /// Parse the capability URLs of a Login reply
    fn parse_capability_urls(&self, body: &[u8]) -> Result<CapabilityUrls>;

    /// Parse every `METADATA-*` container of a GetMetadata reply
    fn parse_metadata(&self, body: &[u8]) -> Result<Vec<Metadata>>;

    /// Parse a `METADATA-SYSTEM` reply
    fn parse_system(&self, body: &[u8]) -> Result<SystemMetadata>;

    /// Parse a Search reply
    fn parse_search(&self, body: &[u8]) -> Result<SearchResult>;
}

impl ResponseParser for ResponseFormat {
    fn format(&self) -> ResponseFormat {
        *self
    }

    fn parse_capability_urls(&self, body: &[u8]) -> Result<CapabilityUrls> {
        match self {
            Self::Compact => CompactParser.parse_capability_urls(body),
            Self::StandardXml => StandardXmlParser.parse_capability_urls(body),
        }
    }

    fn parse_metadata(&self, body: &[u8]) -> Result<Vec<Metadata>> {
        match self {
            Self::Compact => CompactParser.parse_metadata(body),
            Self::StandardXml => StandardXmlParser.parse_metadata(body),
        }
    }

    fn parse_system(&self, body: &[u8]) -> Result<SystemMetadata> {
        match self {
            Self::Compact => CompactParser.parse_system(body),
            Self::StandardXml => StandardXmlParser.parse_system(body),
        }
    }

    fn parse_search(&self, body: &[u8]) -> Result<SearchResult> {
        match self {
            Self::Compact => CompactParser.parse_search(body),
            Self::StandardXml => StandardXmlParser.parse_search(body),
        }
    }
}
