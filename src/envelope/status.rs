//! Reply status carried inside the response body

use super::element::Element;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Reply text servers send alongside a non-zero code that still means success
pub const SUCCESS_TEXT: &str = "Operation Successful";

/// Element that overrides the root's status when present
pub const STATUS_ELEMENT: &str = "RETS-STATUS";

/// Status resolved from a reply envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyStatus {
    /// `ReplyCode` (0 when the server omits it)
    pub code: i64,
    /// `ReplyText`
    pub text: Option<String>,
}

impl ReplyStatus {
    /// Resolve the status of a reply
    ///
    /// A `RETS-STATUS` child of the root is authoritative; otherwise the
    /// root's own `ReplyCode`/`ReplyText` are used.
    pub fn from_root(root: &Element) -> Result<Self> {
        let source = root.find(STATUS_ELEMENT).unwrap_or(root);

        let code = match source.attr("ReplyCode").map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| Error::parse(format!("invalid ReplyCode '{raw}'")))?,
        };

        Ok(Self {
            code,
            text: source.attr("ReplyText").map(str::to_owned),
        })
    }

    /// Whether the reply reports success
    pub fn is_success(&self) -> bool {
        self.code == 0 || self.text.as_deref() == Some(SUCCESS_TEXT)
    }

    /// Turn a failing status into an API error carrying the raw body
    pub fn check(&self, body: &[u8]) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        Err(Error::api(
            self.code,
            self.text.clone().unwrap_or_default(),
            body,
        ))
    }
}
