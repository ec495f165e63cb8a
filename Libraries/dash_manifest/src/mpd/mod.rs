//! Typed view of a DASH manifest tree: adaptation sets, representations,
//! segment templates, subtitle tracks and timing derived from the tree.

pub mod adaptation;
pub mod representation;
pub mod segment;
pub mod subtitle;
pub mod timing;

use serde::Serialize;

use crate::tree::Node;

pub use adaptation::{first_period, list_adaptation_sets, period_count};
pub use representation::{list_representations, representation_summaries};
pub use segment::{segment_addressing, segment_template, split_media_template};
pub use subtitle::list_subtitle_tracks;

/// Media kind of an adaptation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Audio,
    Text,
    Unknown,
}

/// An adaptation set of the active Period. Borrows the tree it was read from.
#[derive(Debug, Clone, Copy)]
pub struct AdaptationSet<'a> {
    node: &'a Node,
    /// Position among the Period's adaptation sets.
    index: usize,
}

/// A content component declared inside an adaptation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentComponent {
    pub id: Option<String>,
    pub content_type: Option<String>,
    pub lang: Option<String>,
}

/// One bitrate/codec variant within an adaptation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Representation {
    pub id: Option<String>,
    /// Bandwidth in bits per second.
    pub bandwidth: Option<u64>,
    pub mime_type: Option<String>,
    pub codecs: Option<String>,
    /// Relative or absolute URL from the `BaseURL` child.
    pub base_url: Option<String>,
    pub start_with_sap: Option<u32>,
    /// Position in the adaptation set's representation list; bitrate
    /// switching refers to representations by this value.
    pub index: usize,
}

/// What the bitrate menu needs to know about a representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentationSummary {
    pub bandwidth: Option<u64>,
    pub mime_type: Option<String>,
    pub codecs: Option<String>,
    pub base_url: Option<String>,
    /// `base_url` resolved against the stream base URL, when both are known.
    pub url: Option<String>,
    pub index: usize,
}

/// `SegmentTemplate` attributes of an adaptation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTemplate {
    /// Segment duration in `timescale` units.
    pub duration: Option<u64>,
    pub timescale: Option<u64>,
    pub start_number: Option<u64>,
    /// Initialization segment path template.
    pub initialization: Option<String>,
    /// Media segment URL template, normally holding a `$Number$` placeholder.
    pub media: Option<String>,
}

/// A media template split around its numbering placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTemplateParts {
    pub prefix: String,
    pub suffix: String,
}

/// A WebVTT subtitle track found in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleTrack {
    pub subtitle_url: String,
    pub subtitle_language: String,
    /// 1-based, in adaptation-set order; only stable within one extraction.
    pub subtitle_id: u32,
}

/// Timing values derived from the manifest, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamTiming {
    pub total_duration: f64,
    pub max_segment_duration: f64,
    pub average_segment_duration: f64,
}
