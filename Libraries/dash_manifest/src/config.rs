use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;
use crate::mpd::segment::NUMBER_PLACEHOLDER;
use crate::mpd::subtitle::WEBVTT_MARKER;

/// Settings of one parser instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserSettings {
    /// Report diagnostics as warnings instead of debug events.
    pub debug_mode: bool,
    /// Used when the manifest has no `maxSegmentDuration`.
    pub default_segment_duration: String,
    /// Mime type fragment identifying subtitle representations.
    pub subtitle_mime_marker: String,
    /// Token the media template is split around.
    pub number_placeholder: String,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            debug_mode: true,
            default_segment_duration: "M10.000S".to_string(),
            subtitle_mime_marker: WEBVTT_MARKER.to_string(),
            number_placeholder: NUMBER_PLACEHOLDER.to_string(),
        }
    }
}

impl ParserSettings {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
