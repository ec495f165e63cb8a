use crate::error::ExtractError;
use crate::tree::Node;

use super::{list_representations, AdaptationSet, ContentComponent, ContentType, Representation};

fn infer_content_type(mime_type: &str) -> ContentType {
    if mime_type.contains("audio") {
        ContentType::Audio
    } else if mime_type.contains("video") {
        ContentType::Video
    } else if mime_type.starts_with("text")
        || mime_type.starts_with("application/mp4")
        || mime_type.contains("vtt")
        || mime_type.contains("ttml")
    {
        ContentType::Text
    } else {
        ContentType::Unknown
    }
}

/// Number of Period elements in the manifest.
pub fn period_count(tree: &Node) -> usize {
    tree.children("Period").len()
}

/// The Period that is read. Only the first one is handled.
pub fn first_period(tree: &Node) -> Result<&Node, ExtractError> {
    tree.first_child("Period")
        .ok_or(ExtractError::missing("MPD", "Period"))
}

/// Adaptation sets of the first Period, in manifest order.
pub fn list_adaptation_sets(tree: &Node) -> Result<Vec<AdaptationSet<'_>>, ExtractError> {
    let period = first_period(tree)?;
    let sets = period.children("AdaptationSet");
    if sets.is_empty() {
        return Err(ExtractError::missing("Period", "AdaptationSet"));
    }
    Ok(sets
        .into_iter()
        .enumerate()
        .map(|(index, node)| AdaptationSet { node, index })
        .collect())
}

impl<'a> AdaptationSet<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attr("id")
    }

    pub fn mime_type(&self) -> Option<&'a str> {
        self.node.attr("mimeType")
    }

    pub fn lang(&self) -> Option<&'a str> {
        self.node.attr("lang")
    }

    /// `contentType` when declared, otherwise guessed from the mime type of
    /// the set or of its first representation.
    pub fn content_type(&self) -> ContentType {
        match self.node.attr("contentType") {
            Some("video") => return ContentType::Video,
            Some("audio") => return ContentType::Audio,
            Some("text") => return ContentType::Text,
            _ => {}
        }
        self.mime_type()
            .or_else(|| {
                self.node
                    .first_child("Representation")
                    .and_then(|rep| rep.attr("mimeType"))
            })
            .map(infer_content_type)
            .unwrap_or(ContentType::Unknown)
    }

    pub fn content_components(&self) -> Vec<ContentComponent> {
        self.node
            .children("ContentComponent")
            .into_iter()
            .map(|node| ContentComponent {
                id: node.attr("id").map(str::to_string),
                content_type: node.attr("contentType").map(str::to_string),
                lang: node.attr("lang").map(str::to_string),
            })
            .collect()
    }

    pub fn representations(&self) -> Vec<Representation> {
        list_representations(self)
    }

    /// True when the set holds at most one representation.
    pub fn has_single_representation(&self) -> bool {
        self.node.children("Representation").len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> Node {
        Node::from_json(json).unwrap()
    }

    #[test]
    fn single_adaptation_set_is_listed() {
        let tree = tree(r#"{"Period": {"AdaptationSet": {"_mimeType": "video/mp4", "_lang": "en"}}}"#);
        let sets = list_adaptation_sets(&tree).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].mime_type(), Some("video/mp4"));
        assert_eq!(sets[0].lang(), Some("en"));
        assert_eq!(sets[0].content_type(), ContentType::Video);
    }

    #[test]
    fn sets_keep_manifest_order() {
        let tree = tree(
            r#"{"Period": {"AdaptationSet": [
                {"_id": "v", "_mimeType": "video/mp4"},
                {"_id": "a", "_mimeType": "audio/mp4"},
                {"_id": "t", "_mimeType": "text/vtt"}
            ]}}"#,
        );
        let sets = list_adaptation_sets(&tree).unwrap();
        let ids: Vec<_> = sets.iter().map(|s| (s.index(), s.id().unwrap())).collect();
        assert_eq!(ids, vec![(0, "v"), (1, "a"), (2, "t")]);
        assert_eq!(sets[1].content_type(), ContentType::Audio);
        assert_eq!(sets[2].content_type(), ContentType::Text);
    }

    #[test]
    fn missing_period_or_sets_is_reported() {
        assert_eq!(
            list_adaptation_sets(&tree(r#"{"_type": "static"}"#)).unwrap_err(),
            ExtractError::missing("MPD", "Period")
        );
        assert_eq!(
            list_adaptation_sets(&tree(r#"{"Period": {"_start": "PT0S"}}"#)).unwrap_err(),
            ExtractError::missing("Period", "AdaptationSet")
        );
    }

    #[test]
    fn only_the_first_period_is_read() {
        let tree = tree(
            r#"{"Period": [
                {"AdaptationSet": {"_id": "first"}},
                {"AdaptationSet": {"_id": "second"}}
            ]}"#,
        );
        assert_eq!(period_count(&tree), 2);
        let sets = list_adaptation_sets(&tree).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id(), Some("first"));
    }

    #[test]
    fn content_components_single_or_list() {
        let tree = tree(
            r#"{"Period": {"AdaptationSet": [
                {"ContentComponent": {"_id": "1", "_contentType": "video"}},
                {"ContentComponent": [{"_id": "1", "_contentType": "video"}, {"_id": "2", "_contentType": "audio", "_lang": "en"}]},
                {}
            ]}}"#,
        );
        let sets = list_adaptation_sets(&tree).unwrap();
        assert_eq!(sets[0].content_components().len(), 1);
        let components = sets[1].content_components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[1].lang.as_deref(), Some("en"));
        assert!(sets[2].content_components().is_empty());
    }

    #[test]
    fn text_mime_types() {
        for mime in ["text/vtt", "application/mp4", "application/ttml+xml", "wvtt"] {
            assert_eq!(infer_content_type(mime), ContentType::Text, "{mime}");
        }
        assert_eq!(infer_content_type("image/png"), ContentType::Unknown);
    }

    #[test]
    fn content_type_from_first_representation() {
        let tree = tree(r#"{"Period": {"AdaptationSet": {"Representation": {"_mimeType": "audio/mp4"}}}}"#);
        let sets = list_adaptation_sets(&tree).unwrap();
        assert_eq!(sets[0].content_type(), ContentType::Audio);
        assert!(sets[0].has_single_representation());
    }
}
