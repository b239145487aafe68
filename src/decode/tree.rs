//! STANDARD-XML tree decoder
//!
//! STANDARD-XML replies have no tabular convention: each record is a nested,
//! self-describing subtree. Elements are converted bottom-up into [`Node`]
//! values, keeping the distinction between tags that appear once (unwrapped)
//! and tags that repeat (lists).

use crate::envelope::Element;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key holding an element's own text when it also has children or attributes
pub const TEXT_KEY: &str = "#text";

/// Nested value produced from an element subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Text of a leaf element, absent when empty
    Scalar(Option<String>),
    /// Values of a tag that occurs more than once, in document order
    List(Vec<Node>),
    /// Child tags and attributes of an element
    Record(IndexMap<String, Node>),
}

impl Node {
    /// Text of a scalar node
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => text.as_deref(),
            _ => None,
        }
    }

    /// Items of a list node
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a record node
    pub fn as_record(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Record(entries) => Some(entries),
            _ => None,
        }
    }

    /// Entry of a record node by key
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_record().and_then(|entries| entries.get(key))
    }

    /// Whether this is an absent scalar
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(None))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Scalar(Some(text.to_owned()))
    }
}

/// Convert an element into a single-entry record `{tag: value}`
pub fn element_to_tree(element: &Element) -> Node {
    let mut entries = IndexMap::with_capacity(1);
    entries.insert(element.name().to_owned(), node_value(element));
    Node::Record(entries)
}

/// Convert an element into its value, without the enclosing tag
pub fn node_value(element: &Element) -> Node {
    let text = element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty());

    if !element.has_children() && element.attributes().is_empty() {
        return Node::Scalar(text.map(str::to_owned));
    }

    let mut groups: IndexMap<String, Vec<Node>> = IndexMap::new();
    for child in element.children() {
        groups
            .entry(child.name().to_owned())
            .or_default()
            .push(node_value(child));
    }

    let mut entries: IndexMap<String, Node> = groups
        .into_iter()
        .map(|(tag, mut values)| {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Node::List(values)
            };
            (tag, value)
        })
        .collect();

    for (key, value) in element.attributes() {
        entries.insert(key.clone(), Node::from(value.as_str()));
    }

    if let Some(text) = text {
        entries.insert(TEXT_KEY.to_owned(), Node::from(text));
    }

    Node::Record(entries)
}
