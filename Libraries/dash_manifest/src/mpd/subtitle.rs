use tracing::debug;

use crate::error::ExtractError;
use crate::tree::Node;

use super::{list_adaptation_sets, list_representations, AdaptationSet, SubtitleTrack};

/// Mime type fragment that marks a WebVTT representation.
pub const WEBVTT_MARKER: &str = "vtt";

/// Subtitle tracks of the manifest, one per adaptation set whose first
/// representation is WebVTT.
pub fn list_subtitle_tracks(tree: &Node, marker: &str) -> Result<Vec<SubtitleTrack>, ExtractError> {
    let sets = list_adaptation_sets(tree)?;
    Ok(subtitle_tracks_from(&sets, marker))
}

/// Same as [`list_subtitle_tracks`] over sets that were already extracted.
/// Subtitle sets carry a single representation by convention, so only the
/// first one is looked at; sets without representations are skipped.
pub fn subtitle_tracks_from(sets: &[AdaptationSet<'_>], marker: &str) -> Vec<SubtitleTrack> {
    let mut tracks = Vec::new();
    let mut subtitle_id = 1;

    for set in sets {
        let Some(first) = list_representations(set).into_iter().next() else {
            continue;
        };
        let is_subtitle = first
            .mime_type
            .as_deref()
            .is_some_and(|mime| mime.contains(marker));
        if !is_subtitle {
            continue;
        }

        debug!("Adaptation set {} carries subtitles ({:?})", set.index(), set.lang());
        tracks.push(SubtitleTrack {
            subtitle_url: first.base_url.unwrap_or_default(),
            subtitle_language: set.lang().unwrap_or_default().to_string(),
            subtitle_id,
        });
        subtitle_id += 1;
    }

    tracks
}
