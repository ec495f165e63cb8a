use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExtractError;
use crate::tree::Node;

use super::{AdaptationSet, MediaTemplateParts, SegmentTemplate};

/// Numbering placeholder a media template is split around.
pub const NUMBER_PLACEHOLDER: &str = "$Number$";

/// Widest `$Number%0Nd$` padding honored, the digit count of `u64::MAX`.
const MAX_NUMBER_WIDTH: usize = 20;

static NUMBER_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$Number(?::%0(\d+)d|%0(\d+)d)?\$").expect("valid number pattern"));

fn parse_u64(node: &Node, name: &str) -> Option<u64> {
    node.attr(name).and_then(|v| v.trim().parse().ok())
}

impl SegmentTemplate {
    pub fn from_node(node: &Node) -> Self {
        Self {
            duration: parse_u64(node, "duration"),
            timescale: parse_u64(node, "timescale"),
            start_number: parse_u64(node, "startNumber"),
            initialization: node.attr("initialization").map(str::to_string),
            media: node.attr("media").map(str::to_string),
        }
    }

    /// Segment duration in manifest units, 0 when the attribute is missing.
    pub fn duration(&self) -> u64 {
        self.duration.unwrap_or(0)
    }

    /// Initialization path template, empty when missing.
    pub fn initialization_path(&self) -> &str {
        self.initialization.as_deref().unwrap_or("")
    }

    /// Splits the media template around `placeholder`.
    pub fn media_template_parts(&self, placeholder: &str) -> Result<MediaTemplateParts, ExtractError> {
        let media = self
            .media
            .as_deref()
            .ok_or(ExtractError::missing("SegmentTemplate", "media"))?;
        Ok(split_media_template(media, placeholder))
    }

    /// Segment duration in seconds, using `timescale` (default 1).
    pub fn duration_seconds(&self) -> f64 {
        let timescale = self.timescale.filter(|t| *t > 0).unwrap_or(1);
        self.duration() as f64 / timescale as f64
    }

    /// Media URL of segment `number`, relative to the stream base URL.
    /// Handles `$Number$`, `$Number%05d$` and `$RepresentationID$`.
    pub fn media_url(&self, representation_id: &str, number: u64) -> String {
        let media = self
            .media
            .as_deref()
            .unwrap_or("")
            .replace("$RepresentationID$", representation_id);
        replace_number_format(&media, number)
    }

    pub fn initialization_url(&self, representation_id: &str) -> String {
        self.initialization_path()
            .replace("$RepresentationID$", representation_id)
    }
}

fn replace_number_format(template: &str, number: u64) -> String {
    NUMBER_FORMAT
        .replace_all(template, |caps: &regex::Captures| {
            match caps.get(1).or_else(|| caps.get(2)) {
                Some(width) => {
                    let width = width
                        .as_str()
                        .parse::<usize>()
                        .map_or(MAX_NUMBER_WIDTH, |w| w.min(MAX_NUMBER_WIDTH));
                    format!("{:0width$}", number, width = width)
                }
                None => number.to_string(),
            }
        })
        .to_string()
}

/// Splits `media` on the first `placeholder`. Without the placeholder the
/// whole template is the prefix and the suffix is empty.
pub fn split_media_template(media: &str, placeholder: &str) -> MediaTemplateParts {
    match media.split_once(placeholder) {
        Some((prefix, suffix)) => MediaTemplateParts {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        },
        None => MediaTemplateParts {
            prefix: media.to_string(),
            suffix: String::new(),
        },
    }
}

/// The adaptation set's `SegmentTemplate`, if it has one.
pub fn segment_template(set: &AdaptationSet<'_>) -> Option<SegmentTemplate> {
    set.node()
        .first_child("SegmentTemplate")
        .map(SegmentTemplate::from_node)
}

/// The template to address segments with. Looks at the adaptation set, then at
/// its first representation. Explicit segment lists and single-segment
/// addressing are refused rather than guessed at.
pub fn segment_addressing(set: &AdaptationSet<'_>) -> Result<SegmentTemplate, ExtractError> {
    if let Some(template) = segment_template(set) {
        return Ok(template);
    }

    let first_rep = set.node().first_child("Representation");
    if let Some(node) = first_rep.and_then(|rep| rep.first_child("SegmentTemplate")) {
        return Ok(SegmentTemplate::from_node(node));
    }

    for node in std::iter::once(set.node()).chain(first_rep) {
        if node.get("SegmentList").is_some() {
            return Err(ExtractError::UnsupportedAddressing("SegmentList"));
        }
        if node.get("SegmentBase").is_some() {
            return Err(ExtractError::UnsupportedAddressing("SegmentBase"));
        }
    }

    Err(ExtractError::missing("AdaptationSet", "SegmentTemplate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpd::list_adaptation_sets;

    fn template(media: Option<&str>) -> SegmentTemplate {
        SegmentTemplate {
            duration: Some(4000),
            timescale: Some(1000),
            start_number: None,
            initialization: Some("$RepresentationID$/init.mp4".to_string()),
            media: media.map(str::to_string),
        }
    }

    #[test]
    fn media_template_is_split_around_the_number() {
        let parts = template(Some("chunk-$Number$-stream.m4s"))
            .media_template_parts(NUMBER_PLACEHOLDER)
            .unwrap();
        assert_eq!(parts.prefix, "chunk-");
        assert_eq!(parts.suffix, "-stream.m4s");
    }

    #[test]
    fn template_without_number_is_all_prefix() {
        let parts = split_media_template("video.mp4", NUMBER_PLACEHOLDER);
        assert_eq!(parts.prefix, "video.mp4");
        assert_eq!(parts.suffix, "");
    }

    #[test]
    fn missing_media_is_reported() {
        assert_eq!(
            template(None).media_template_parts(NUMBER_PLACEHOLDER),
            Err(ExtractError::missing("SegmentTemplate", "media"))
        );
    }

    #[test]
    fn urls_and_durations() {
        let t = template(Some("$RepresentationID$/seg-$Number%05d$.m4s"));
        assert_eq!(t.media_url("v1", 42), "v1/seg-00042.m4s");
        assert_eq!(t.initialization_url("v1"), "v1/init.mp4");
        assert_eq!(t.duration(), 4000);
        assert_eq!(t.duration_seconds(), 4.0);

        let plain = template(Some("chunk-$Number$.m4s"));
        assert_eq!(plain.media_url("ignored", 7), "chunk-7.m4s");
    }

    #[test]
    fn number_padding_is_capped() {
        let wide = template(Some("seg-$Number%0999999999d$.m4s"));
        assert_eq!(wide.media_url("v1", 42), format!("seg-{:020}.m4s", 42));

        let overflowing = template(Some("seg-$Number%099999999999999999999999d$.m4s"));
        assert_eq!(overflowing.media_url("v1", 7), format!("seg-{:020}.m4s", 7));
    }

    #[test]
    fn addressing_modes() {
        let tree = Node::from_json(
            r#"{"Period": {"AdaptationSet": [
                {"SegmentTemplate": {"_duration": "10", "_media": "a-$Number$.m4s", "_initialization": "a-init.mp4"}},
                {"Representation": {"SegmentTemplate": {"_duration": "5", "_media": "b-$Number$.m4s"}}},
                {"Representation": {"SegmentList": {"SegmentURL": [{"_media": "1.m4s"}]}}},
                {"SegmentBase": {"_indexRange": "0-100"}},
                {"Representation": {"BaseURL": "c.mp4"}}
            ]}}"#,
        )
        .unwrap();
        let sets = list_adaptation_sets(&tree).unwrap();

        let a = segment_addressing(&sets[0]).unwrap();
        assert_eq!(a.duration(), 10);
        assert_eq!(a.initialization_path(), "a-init.mp4");
        assert_eq!(segment_template(&sets[0]), Some(a));

        assert_eq!(segment_template(&sets[1]), None);
        assert_eq!(segment_addressing(&sets[1]).unwrap().duration(), 5);

        assert_eq!(segment_addressing(&sets[2]), Err(ExtractError::UnsupportedAddressing("SegmentList")));
        assert_eq!(segment_addressing(&sets[3]), Err(ExtractError::UnsupportedAddressing("SegmentBase")));
        assert_eq!(
            segment_addressing(&sets[4]),
            Err(ExtractError::missing("AdaptationSet", "SegmentTemplate"))
        );
    }
}
