//! STANDARD-XML reply parser

use super::types::{Operation, ResponseFormat, ResponseParser};
use super::{parse_search_with, RESPONSE_ELEMENT};
use crate::decode::node_value;
use crate::error::{Error, Result};
use crate::types::{CapabilityUrls, Metadata, Record, SearchResult, SystemMetadata};

/// Parser for STANDARD-XML replies
///
/// Only Search is implemented; the other transactions fail with
/// [`Error::NotSupportedByFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardXmlParser;

impl StandardXmlParser {
    /// Create a new STANDARD-XML parser
    pub fn new() -> Self {
        Self
    }
}

impl ResponseParser for StandardXmlParser {
    fn format(&self) -> ResponseFormat {
        ResponseFormat::StandardXml
    }

    fn parse_capability_urls(&self, _body: &[u8]) -> Result<CapabilityUrls> {
        Err(Operation::CapabilityUrls.unsupported(self.format()))
    }

    fn parse_metadata(&self, _body: &[u8]) -> Result<Vec<Metadata>> {
        Err(Operation::Metadata.unsupported(self.format()))
    }

    fn parse_system(&self, _body: &[u8]) -> Result<SystemMetadata> {
        Err(Operation::System.unsupported(self.format()))
    }

    /// Records are the element children of `RETS-RESPONSE`:
    ///
    /// ```text
    /// <RETS xmlns="http://rets.org/xsd/RETS" ReplyCode="0" ReplyText="Success">
    ///     <COUNT Records="2"/>
    ///     <RETS-RESPONSE>
    ///         <PropertyDetails>...</PropertyDetails>
    ///         <PropertyDetails>...</PropertyDetails>
    ///     </RETS-RESPONSE>
    /// </RETS>
    /// ```
    fn parse_search(&self, body: &[u8]) -> Result<SearchResult> {
        parse_search_with(self, body, |root| {
            let response = root
                .find(RESPONSE_ELEMENT)
                .ok_or_else(|| Error::parse(format!("missing {RESPONSE_ELEMENT} element")))?;

            Ok(response
                .children()
                .iter()
                .map(|record| Record::Node(node_value(record)))
                .collect())
        })
    }
}
