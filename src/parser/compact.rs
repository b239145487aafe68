//! COMPACT reply parser

use super::types::{ResponseFormat, ResponseParser};
use super::{find_or_raise, parse_search_with, RESPONSE_ELEMENT};
use crate::decode::{CompactTable, COLUMNS};
use crate::envelope::Element;
use crate::error::{Error, Result};
use crate::types::{CapabilityUrls, Metadata, Record, SearchResult, SystemMetadata};

/// Tag prefix of metadata containers
pub const METADATA_PREFIX: &str = "METADATA-";

/// Parser for COMPACT replies
///
/// Implements every transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactParser;

impl CompactParser {
    /// Create a new COMPACT parser
    pub fn new() -> Self {
        Self
    }
}

impl ResponseParser for CompactParser {
    fn format(&self) -> ResponseFormat {
        ResponseFormat::Compact
    }

    /// ```text
    /// <RETS ReplyCode="0" ReplyText="Success">
    ///     <RETS-RESPONSE>
    ///         MemberName=member_name
    ///         Login=/rets2_1/Login
    ///         Search=/rets2_1/Search
    ///         GetMetadata=/rets2_1/GetMetadata
    ///     </RETS-RESPONSE>
    /// </RETS>
    /// ```
    fn parse_capability_urls(&self, body: &[u8]) -> Result<CapabilityUrls> {
        let root = self.parse_xml(body)?;
        let Some(response) = root.find(RESPONSE_ELEMENT) else {
            return Ok(CapabilityUrls::new());
        };

        let mut urls = CapabilityUrls::new();
        for line in response.text().unwrap_or_default().trim().lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::parse(format!("capability line without '=': {}", line.trim()))
            })?;
            urls.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(urls)
    }

    /// ```text
    /// <RETS ReplyCode="0" ReplyText="Success">
    ///     <METADATA-RESOURCE Date="2016-11-24T05:24:06Z" Version="01.09.02991">
    ///         <COLUMNS>	ResourceID	StandardName	</COLUMNS>
    ///         <DATA>	ActiveAgent	ActiveAgent	</DATA>
    ///         <DATA>	Property	Property	</DATA>
    ///     </METADATA-RESOURCE>
    /// </RETS>
    /// ```
    fn parse_metadata(&self, body: &[u8]) -> Result<Vec<Metadata>> {
        let root = self.parse_xml(body)?;

        root.children()
            .iter()
            .filter_map(|element| {
                element
                    .name()
                    .strip_prefix(METADATA_PREFIX)
                    .map(|metadata_type| metadata_container(element, metadata_type))
            })
            .collect()
    }

    /// ```text
    /// <RETS ReplyCode="0" ReplyText="Success">
    ///     <METADATA-SYSTEM Date="2016-11-24T05:24:06Z" Version="01.09.02991">
    ///         <SYSTEM SystemDescription="ARMLS" SystemID="az" TimeZoneOffset="-06:00"/>
    ///         <COMMENTS/>
    ///     </METADATA-SYSTEM>
    /// </RETS>
    /// ```
    fn parse_system(&self, body: &[u8]) -> Result<SystemMetadata> {
        let root = self.parse_xml(body)?;
        let metadata_system = find_or_raise(&root, "METADATA-SYSTEM")?;
        let system = find_or_raise(metadata_system, "SYSTEM")?;

        let comments = metadata_system
            .find("COMMENTS")
            .and_then(Element::text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(SystemMetadata {
            system_id: required_attr(system, "SystemID")?,
            system_description: required_attr(system, "SystemDescription")?,
            system_date: required_attr(metadata_system, "Date")?,
            system_version: required_attr(metadata_system, "Version")?,
            time_zone_offset: system.attr("TimeZoneOffset").map(str::to_string),
            comments,
        })
    }

    fn parse_search(&self, body: &[u8]) -> Result<SearchResult> {
        parse_search_with(self, body, |root| {
            let table = CompactTable::from_container(root)?;
            let records = table.rows().map(Record::Row).collect();
            Ok(records)
        })
    }
}

fn metadata_container(element: &Element, metadata_type: &str) -> Result<Metadata> {
    let rows = if element.find(COLUMNS).is_some() {
        CompactTable::from_container(element)?.rows().collect()
    } else {
        Vec::new()
    };

    Ok(Metadata {
        metadata_type: metadata_type.to_string(),
        resource: element.attr("Resource").map(str::to_string),
        class: element.attr("Class").map(str::to_string),
        version: element.attr("Version").map(str::to_string),
        date: element.attr("Date").map(str::to_string),
        rows,
    })
}

fn required_attr(element: &Element, key: &str) -> Result<String> {
    element
        .attr(key)
        .map(str::to_string)
        .ok_or_else(|| Error::parse(format!("{} element has no {key} attribute", element.name())))
}
