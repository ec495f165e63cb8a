use crate::tree::Node;

use super::{AdaptationSet, Representation, RepresentationSummary};

pub fn base_url(rep: &Node) -> Option<&str> {
    rep.first_child("BaseURL").and_then(Node::text)
}

pub fn mime_type(rep: &Node) -> Option<&str> {
    rep.attr("mimeType")
}

pub fn codecs(rep: &Node) -> Option<&str> {
    rep.attr("codecs")
}

pub fn start_with_sap(rep: &Node) -> Option<u32> {
    rep.attr("startWithSAP").and_then(|v| v.trim().parse().ok())
}

pub fn bandwidth(rep: &Node) -> Option<u64> {
    rep.attr("bandwidth").and_then(|v| v.trim().parse().ok())
}

impl Representation {
    pub fn from_node(node: &Node, index: usize) -> Self {
        Self {
            id: node.attr("id").map(str::to_string),
            bandwidth: bandwidth(node),
            mime_type: mime_type(node).map(str::to_string),
            codecs: codecs(node).map(str::to_string),
            base_url: base_url(node).map(str::to_string),
            start_with_sap: start_with_sap(node),
            index,
        }
    }

    pub fn summary(&self) -> RepresentationSummary {
        RepresentationSummary {
            bandwidth: self.bandwidth,
            mime_type: self.mime_type.clone(),
            codecs: self.codecs.clone(),
            base_url: self.base_url.clone(),
            url: None,
            index: self.index,
        }
    }
}

/// Representations of an adaptation set in document order, indexed `0..n`.
pub fn list_representations(set: &AdaptationSet<'_>) -> Vec<Representation> {
    set.node()
        .children("Representation")
        .into_iter()
        .enumerate()
        .map(|(index, node)| Representation::from_node(node, index))
        .collect()
}

pub fn representation_summaries(reps: &[Representation]) -> Vec<RepresentationSummary> {
    reps.iter().map(Representation::summary).collect()
}
