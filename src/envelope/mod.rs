//! Reply envelope module
//!
//! Parses a raw response body into an element tree and resolves the
//! protocol status embedded in it.
//!
//! # Overview
//!
//! Every RETS reply is wrapped in a `<RETS>` element whose `ReplyCode` and
//! `ReplyText` attributes (or those of a nested `<RETS-STATUS>`) report the
//! outcome of the transaction, independently of the HTTP status.

mod element;
mod status;

pub use element::{parse_document, Charset, Element, TagNames};
pub use status::{ReplyStatus, STATUS_ELEMENT, SUCCESS_TEXT};

use crate::error::Result;
use tracing::debug;

/// Decode a reply body, failing with [`crate::Error::Api`] when the embedded
/// status reports an error
pub fn decode(body: &[u8], names: TagNames, charset: Charset) -> Result<Element> {
    let root = parse_document(body, names, charset)?;
    let status = ReplyStatus::from_root(&root)?;

    debug!(
        root = root.name(),
        code = status.code,
        text = status.text.as_deref().unwrap_or_default(),
        "decoded reply envelope"
    );

    status.check(body)?;
    Ok(root)
}
