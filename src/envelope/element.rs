//! Element tree built from a response body
//!
//! A small owned tree with element-tree semantics: each element keeps its
//! attributes in document order and only the text that precedes its first
//! child element.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8};
use indexmap::IndexMap;
use std::borrow::Cow;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// How tag names and attribute keys are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagNames {
    /// Keep names exactly as written
    #[default]
    Raw,
    /// Strip any namespace prefix (`rets:Count` becomes `Count`)
    Local,
}

/// How the body bytes are turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Byte order mark, then the `encoding` of the XML declaration, then UTF-8
    #[default]
    Declared,
    /// UTF-8 regardless of any declaration
    Utf8,
}

/// One element of a decoded response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by key
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Text preceding the first child element
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child elements in document order
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Whether this element has child elements
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// First direct child with the given tag
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children with the given tag
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Parse a response body into its root element
pub fn parse_document(body: &[u8], names: TagNames, charset: Charset) -> Result<Element> {
    let text = decode_text(body, charset)?;

    let mut reader = Reader::from_str(&text);
    let mut builder = TreeBuilder::default();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(Error::malformed(format!(
                    "invalid XML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        };

        match event {
            Event::Start(start) => {
                let element = open_element(&start, names)?;
                builder.open(element)?;
            }
            Event::Empty(start) => {
                let element = open_element(&start, names)?;
                builder.attach(element)?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::malformed(format!("invalid text content: {e}")))?;
                builder.text(&text)?;
            }
            Event::CData(data) => {
                let data = std::str::from_utf8(&data)
                    .map_err(|e| Error::malformed(format!("invalid CDATA content: {e}")))?;
                builder.text(data)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    builder.finish()
}

/// Decode the body into text, dropping any byte order mark
fn decode_text(body: &[u8], charset: Charset) -> Result<Cow<'_, str>> {
    let (encoding, body) = match (Encoding::for_bom(body), charset) {
        (Some((encoding, bom_len)), Charset::Declared) => (encoding, &body[bom_len..]),
        (Some((encoding, bom_len)), Charset::Utf8) if encoding == UTF_8 => {
            (UTF_8, &body[bom_len..])
        }
        (_, Charset::Declared) => (declared_encoding(body)?.unwrap_or(UTF_8), body),
        (_, Charset::Utf8) => (UTF_8, body),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| Error::malformed(format!("response is not valid {}", encoding.name())))
}

/// Encoding named by the XML declaration, if the body starts with one
fn declared_encoding(body: &[u8]) -> Result<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(body);
    let Ok(Event::Decl(decl)) = reader.read_event() else {
        return Ok(None);
    };
    let Some(Ok(label)) = decl.encoding() else {
        return Ok(None);
    };

    Encoding::for_label(&label).map(Some).ok_or_else(|| {
        Error::malformed(format!(
            "unknown encoding '{}' in XML declaration",
            String::from_utf8_lossy(&label)
        ))
    })
}

/// Stack-based assembly of the owned tree
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) -> Result<()> {
        if self.root.is_some() {
            return Err(Error::malformed(format!(
                "unexpected element <{}> after the root element",
                element.name
            )));
        }
        self.stack.push(element);
        Ok(())
    }

    fn attach(&mut self, element: Element) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(element);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(Error::malformed(format!(
                "unexpected element <{}> after the root element",
                element.name
            )));
        }
        self.root = Some(element);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| Error::malformed("closing tag without a matching opening tag"))?;
        self.attach(element)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) if parent.children.is_empty() => {
                parent.text.get_or_insert_with(String::new).push_str(text);
                Ok(())
            }
            // Tail text after a child element is not kept
            Some(_) => Ok(()),
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::malformed("text outside of the root element")),
        }
    }

    fn finish(self) -> Result<Element> {
        if let Some(open) = self.stack.last() {
            return Err(Error::malformed(format!(
                "unexpected end of document inside <{}>",
                open.name
            )));
        }
        self.root
            .ok_or_else(|| Error::malformed("document has no root element"))
    }
}

fn open_element(start: &BytesStart<'_>, names: TagNames) -> Result<Element> {
    let name = match names {
        TagNames::Raw => decode_name(start.name().as_ref())?,
        TagNames::Local => decode_name(start.local_name().as_ref())?,
    };

    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            Error::malformed(format!("invalid attribute on <{}>: {e}", element.name))
        })?;

        let raw_key = attr.key.as_ref();
        if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
            continue;
        }

        let key = match names {
            TagNames::Raw => decode_name(raw_key)?,
            TagNames::Local => decode_name(attr.key.local_name().as_ref())?,
        };
        let value = attribute_value(&attr.value).map_err(|e| {
            Error::malformed(format!("invalid value for attribute '{key}': {e}"))
        })?;
        element.attributes.insert(key, value);
    }

    Ok(element)
}

/// Attribute value with literal line breaks and tabs folded to spaces,
/// then unescaped; character references such as `&#10;` survive
fn attribute_value(raw: &[u8]) -> std::result::Result<String, String> {
    let raw = std::str::from_utf8(raw).map_err(|e| e.to_string())?;
    let normalized = raw.replace("\r\n", " ").replace(['\t', '\r', '\n'], " ");
    quick_xml::escape::unescape(&normalized)
        .map(Cow::into_owned)
        .map_err(|e| e.to_string())
}

fn decode_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| Error::malformed(format!("invalid name: {e}")))
}
