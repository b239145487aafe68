//! COMPACT table decoder
//!
//! A COMPACT container holds one `COLUMNS` header and any number of `DATA`
//! records. Every line starts and ends with the delimiter, so the first and
//! last split fields are always empty and are discarded.
//!
//! ```text
//! <RETS ReplyCode="0" ReplyText="Success">
//!     <DELIMITER value="09"/>
//!     <COLUMNS>	LIST_87	LIST_105	LIST_1	</COLUMNS>
//!     <DATA>	2016-12-01T00:08:10	5489015	20160824051756837742000000	</DATA>
//!     <DATA>	2016-12-01T00:10:02	5497756	20160915055426038684000000	</DATA>
//! </RETS>
//! ```

use crate::envelope::Element;
use crate::error::{Error, Result};
use crate::types::Row;
use tracing::debug;

/// Header element
pub const COLUMNS: &str = "COLUMNS";

/// Record element
pub const DATA: &str = "DATA";

/// Optional delimiter declaration element
pub const DELIMITER: &str = "DELIMITER";

/// Delimiter used when no `DELIMITER` element is present
pub const DEFAULT_DELIMITER: char = '\t';

/// Column layout of a COMPACT container, borrowing the decoded tree
#[derive(Debug, Clone)]
pub struct CompactTable<'a> {
    container: &'a Element,
    delimiter: char,
    columns: Vec<&'a str>,
}

impl<'a> CompactTable<'a> {
    /// Read the delimiter and header of a container
    pub fn from_container(container: &'a Element) -> Result<Self> {
        let delimiter = parse_delimiter(container)?;
        let header = container
            .find(COLUMNS)
            .ok_or_else(|| Error::parse(format!("missing {COLUMNS} header element")))?;

        Ok(Self {
            container,
            delimiter,
            columns: split_line(header.text().unwrap_or_default(), delimiter),
        })
    }

    /// Field delimiter
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Column names in header order
    pub fn columns(&self) -> &[&'a str] {
        &self.columns
    }

    /// Number of `DATA` records
    pub fn len(&self) -> usize {
        self.container.find_all(DATA).count()
    }

    /// Whether the container has no `DATA` records
    pub fn is_empty(&self) -> bool {
        self.container.find(DATA).is_none()
    }

    /// Rows in record order, produced lazily from the tree
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            records: self.container.children().iter(),
            columns: &self.columns,
            delimiter: self.delimiter,
        }
    }
}

/// Iterator over the rows of a [`CompactTable`]
#[derive(Debug, Clone)]
pub struct Rows<'t> {
    records: std::slice::Iter<'t, Element>,
    columns: &'t [&'t str],
    delimiter: char,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let record = self.records.find(|child| child.name() == DATA)?;
        let values = split_line(record.text().unwrap_or_default(), self.delimiter);

        // Values past the last column have no name and are dropped.
        if values.len() > self.columns.len() {
            debug!(
                columns = self.columns.len(),
                values = values.len(),
                "dropping excess values in DATA record"
            );
        }

        let row = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| ((*column).to_owned(), values.get(i).map(|v| (*v).to_owned())))
            .collect();
        Some(row)
    }
}

/// Split a delimited line, discarding the bracketing empty fields
pub fn split_line(text: &str, delimiter: char) -> Vec<&str> {
    let fields: Vec<&str> = text.split(delimiter).collect();
    if fields.len() < 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1].to_vec()
}

fn parse_delimiter(container: &Element) -> Result<char> {
    let Some(element) = container.find(DELIMITER) else {
        return Ok(DEFAULT_DELIMITER);
    };

    let value = element.attr("value").unwrap_or_default();
    value
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::invalid_delimiter(value))
}
