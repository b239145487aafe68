//! Reply parser module
//!
//! Supports: COMPACT (all transactions), STANDARD-XML (Search only)
//!
//! # Overview
//!
//! Each parser decodes the reply envelope, then extracts typed records with
//! the decoder matching its wire format. [`ResponseFormat`] selects a parser
//! by format name and dispatches to it.
//!
//! ```rust,ignore
//! use rets_parse::parser::{ResponseFormat, ResponseParser};
//!
//! let parser = ResponseFormat::select("COMPACT")?;
//! let result = parser.parse_search(&body)?;
//! println!("{:?} matching records", result.count);
//! ```

mod compact;
mod standard;
mod types;

pub use compact::CompactParser;
pub use standard::StandardXmlParser;
pub use types::{
    Operation, ResponseFormat, ResponseParser, COMPACT_FORMAT, STANDARD_XML_FORMAT,
};

use crate::envelope::Element;
use crate::error::{Error, Result};
use crate::types::{Record, SearchResult};
use tracing::debug;

/// Element carrying the body of a reply (capabilities, STANDARD-XML records)
pub const RESPONSE_ELEMENT: &str = "RETS-RESPONSE";

/// Element reporting the number of matching records
pub const COUNT_ELEMENT: &str = "COUNT";

/// Element present when the server truncated a search result
pub const MAXROWS_ELEMENT: &str = "MAXROWS";

/// Select a parser by format name
pub fn select(name: &str) -> Result<ResponseFormat> {
    ResponseFormat::select(name)
}

/// Find a mandatory child element
fn find_or_raise<'a>(element: &'a Element, name: &str) -> Result<&'a Element> {
    element
        .find(name)
        .ok_or_else(|| Error::parse(format!("missing {name} element")))
}

/// Shared Search flow for both formats
///
/// A "no records found" reply is a successful empty result. Structural
/// failures of `extract` leave `data` absent.
fn parse_search_with<F>(
    parser: &dyn ResponseParser,
    body: &[u8],
    extract: F,
) -> Result<SearchResult>
where
    F: FnOnce(&Element) -> Result<Vec<Record>>,
{
    let root = match parser.parse_xml(body) {
        Ok(root) => root,
        Err(e) if e.is_no_records_found() => {
            debug!(response_format = %parser.format(), "search matched no records");
            return Ok(SearchResult::empty());
        }
        Err(e) => return Err(e),
    };

    let count = root.find(COUNT_ELEMENT).map(parse_count).transpose()?;

    let data = match extract(&root) {
        Ok(records) => Some(records),
        Err(Error::Parse { message }) => {
            debug!(response_format = %parser.format(), %message, "search reply has no row data");
            None
        }
        Err(e) => return Err(e),
    };

    Ok(SearchResult {
        count,
        max_rows: root.find(MAXROWS_ELEMENT).is_some(),
        data,
    })
}

fn parse_count(element: &Element) -> Result<u64> {
    let raw = element
        .attr("Records")
        .ok_or_else(|| Error::parse(format!("{COUNT_ELEMENT} element has no Records attribute")))?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| Error::parse(format!("invalid {COUNT_ELEMENT} Records value '{raw}'")))
}

#[cfg(test)]
mod tests;
