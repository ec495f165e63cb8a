//! The generic attribute/element tree a manifest arrives in.
//! The converter that produces it writes attributes as `_name` keys, child
//! elements under their element name and mixed text under `__text`. A child
//! that occurs once is stored as a single node, several occurrences as a list,
//! so every collection read goes through [`normalize_to_list`].

pub mod xml;

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Key prefix the converter uses for attributes.
pub const ATTRIBUTE_PREFIX: &str = "_";
/// Key the converter uses for the text of an element that also has attributes.
pub const TEXT_KEY: &str = "__text";

/// One node of a manifest tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    List(Vec<Node>),
    Object(IndexMap<String, Node>),
}

impl Node {
    /// Looks up a child element or raw key on an object node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up an attribute by its manifest name, e.g. `attr("mimeType")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.get(&format!("{ATTRIBUTE_PREFIX}{name}"))
            .and_then(Node::text)
    }

    /// Text content of a text node, or of an element holding `__text`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.as_str()),
            Node::Object(map) => map.get(TEXT_KEY).and_then(Node::text),
            Node::List(_) => None,
        }
    }

    /// All occurrences of a child element, in document order.
    pub fn children(&self, name: &str) -> Vec<&Node> {
        normalize_to_list(self.get(name))
    }

    pub fn first_child(&self, name: &str) -> Option<&Node> {
        self.children(name).into_iter().next()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Parses a tree from the JSON form an x2js-style converter emits.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Resolves a maybe-single-maybe-list field into an ordered list.
/// A list is returned as-is, a single node becomes a one-element list and an
/// absent field becomes an empty list.
pub fn normalize_to_list(node: Option<&Node>) -> Vec<&Node> {
    match node {
        Some(Node::List(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a manifest tree node")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Text(v))
    }

    // Converters are not consistent about quoting numbers and booleans, so
    // scalars are kept as their textual form.
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Option<Node>>()? {
            if let Some(item) = item {
                items.push(item);
            }
        }
        Ok(Node::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = IndexMap::new();
        while let Some((key, value)) = map.next_entry::<String, Option<Node>>()? {
            // null is how converters spell "absent"
            if let Some(value) = value {
                entries.insert(key, value);
            }
        }
        Ok(Node::Object(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn single_node_becomes_one_element_list() {
        let node = text("a");
        assert_eq!(normalize_to_list(Some(&node)), vec![&node]);
    }

    #[test]
    fn absent_node_becomes_empty_list() {
        assert!(normalize_to_list(None).is_empty());
    }

    #[test]
    fn list_keeps_source_order() {
        let node = Node::List(vec![text("a"), text("b"), text("c")]);
        let list = normalize_to_list(Some(&node));
        let texts: Vec<_> = list.iter().filter_map(|n| n.text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn normalizing_twice_yields_the_same_content() {
        for node in [text("a"), Node::List(vec![text("a"), text("b")])] {
            let once: Vec<Node> = normalize_to_list(Some(&node)).into_iter().cloned().collect();
            let wrapped = Node::List(once.clone());
            let twice: Vec<Node> = normalize_to_list(Some(&wrapped)).into_iter().cloned().collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn json_scalars_and_nulls() {
        let node = Node::from_json(
            r#"{"_bandwidth": 500000, "_lang": null, "BaseURL": "v.mp4", "Flags": [true, null]}"#,
        )
        .unwrap();
        assert_eq!(node.attr("bandwidth"), Some("500000"));
        assert_eq!(node.attr("lang"), None);
        assert_eq!(node.first_child("BaseURL").and_then(Node::text), Some("v.mp4"));
        assert_eq!(node.children("Flags"), vec![&text("true")]);
    }

    #[test]
    fn text_of_element_with_attributes() {
        let node = Node::from_json(r#"{"_serviceLocation": "a", "__text": "http://cdn/"}"#).unwrap();
        assert_eq!(node.text(), Some("http://cdn/"));
    }
}
