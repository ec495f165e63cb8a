//! Turns an MPD document into a [`Node`] tree using the same conventions as the
//! x2js converter browsers feed the player with. The tree returned is the
//! content of the root element, so `tree.get("Period")` works directly.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::{Node, ATTRIBUTE_PREFIX, TEXT_KEY};
use crate::error::ManifestError;

struct Frame {
    name: String,
    entries: IndexMap<String, Node>,
    text: String,
}

impl Frame {
    fn open(e: &BytesStart) -> Result<Self, ManifestError> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let mut entries = IndexMap::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.to_string();
            entries.insert(format!("{ATTRIBUTE_PREFIX}{key}"), Node::Text(value));
        }
        Ok(Self {
            name,
            entries,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Node) {
        let node = if self.entries.is_empty() {
            Node::Text(self.text)
        } else {
            let mut entries = self.entries;
            if !self.text.is_empty() {
                entries.insert(TEXT_KEY.to_string(), Node::Text(self.text));
            }
            Node::Object(entries)
        };
        (self.name, node)
    }

    // A repeated child turns the existing single entry into a list.
    fn push_child(&mut self, name: String, child: Node) {
        match self.entries.get_mut(&name) {
            Some(Node::List(items)) => items.push(child),
            Some(existing) => {
                let first = std::mem::replace(existing, Node::List(Vec::new()));
                *existing = Node::List(vec![first, child]);
            }
            None => {
                self.entries.insert(name, child);
            }
        }
    }
}

/// Parses an MPD document into the content tree of its root element.
pub fn parse_xml(xml: &str) -> Result<Node, ManifestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => stack.push(Frame::open(e)?),
            Event::Empty(ref e) => {
                let (name, node) = Frame::open(e)?.close();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, node),
                    None => root = Some(node),
                }
            }
            Event::Text(ref e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let frame = stack
                    .pop()
                    .ok_or_else(|| ManifestError::Unbalanced(name.clone()))?;
                if frame.name != name {
                    return Err(ManifestError::Unbalanced(name));
                }
                let (name, node) = frame.close();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, node),
                    None => {
                        debug!("Converted <{}> manifest root", name);
                        root = Some(node);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(frame) = stack.pop() {
        return Err(ManifestError::Unbalanced(frame.name));
    }
    root.ok_or(ManifestError::EmptyDocument)
}
