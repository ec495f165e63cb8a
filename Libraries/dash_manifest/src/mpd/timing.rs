use crate::duration::{parse_duration, parse_segment_duration_seconds};
use crate::error::ExtractError;
use crate::tree::Node;

/// Total media duration from `mediaPresentationDuration`.
pub fn media_duration_seconds(tree: &Node) -> Result<f64, ExtractError> {
    let text = tree
        .attr("mediaPresentationDuration")
        .ok_or(ExtractError::missing("MPD", "mediaPresentationDuration"))?;
    Ok(parse_duration(text)?)
}

/// Longest segment duration from `maxSegmentDuration`, or `fallback` when the
/// manifest leaves it out.
pub fn max_segment_duration_seconds(tree: &Node, fallback: &str) -> Result<f64, ExtractError> {
    Ok(parse_segment_duration_seconds(tree.attr("maxSegmentDuration"), fallback)?)
}

/// Whole-second segment duration used to pace segment requests.
pub fn average_segment_duration_seconds(tree: &Node, fallback: &str) -> Result<f64, ExtractError> {
    max_segment_duration_seconds(tree, fallback).map(f64::trunc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DurationError;

    #[test]
    fn presentation_duration() {
        let tree = Node::from_json(r#"{"_mediaPresentationDuration": "PT1H2M10S"}"#).unwrap();
        assert_eq!(media_duration_seconds(&tree), Ok(3730.0));

        let tree = Node::from_json(r#"{"_mediaPresentationDuration": "P0DT0H10M0S"}"#).unwrap();
        assert_eq!(media_duration_seconds(&tree), Ok(600.0));
    }

    #[test]
    fn presentation_duration_missing_or_malformed() {
        let empty = Node::from_json("{}").unwrap();
        assert_eq!(
            media_duration_seconds(&empty),
            Err(ExtractError::missing("MPD", "mediaPresentationDuration"))
        );
        let tree = Node::from_json(r#"{"_mediaPresentationDuration": "PT1H2M"}"#).unwrap();
        assert_eq!(
            media_duration_seconds(&tree),
            Err(ExtractError::Duration(DurationError::Malformed("PT1H2M".into())))
        );
    }

    #[test]
    fn segment_durations() {
        let tree = Node::from_json(r#"{"_maxSegmentDuration": "PT0H0M4.800S"}"#).unwrap();
        assert_eq!(max_segment_duration_seconds(&tree, "M10.000S"), Ok(4.8));
        assert_eq!(average_segment_duration_seconds(&tree, "M10.000S"), Ok(4.0));

        let empty = Node::from_json("{}").unwrap();
        assert_eq!(average_segment_duration_seconds(&empty, "M10.000S"), Ok(10.0));
    }
}
