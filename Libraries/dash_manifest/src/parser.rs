//! Per-player manifest context. It owns the manifest store, the settings and
//! the diagnostics callback, and turns extraction failures into fallback
//! values so a broken field never stops the rest of the manifest from being
//! used.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::base_url;
use crate::config::ParserSettings;
use crate::diagnostics::{tracing_callback, Diagnostic, DiagnosticCallback, MODULE_NAME};
use crate::error::{ExtractError, ManifestError};
use crate::mpd::{
    self, segment, subtitle, timing, AdaptationSet, ContentComponent, ContentType, MediaTemplateParts,
    Representation, RepresentationSummary, SegmentTemplate, StreamTiming, SubtitleTrack,
};
use crate::store::ManifestStore;
use crate::tree::{xml, Node};

pub struct MpdParser {
    store: ManifestStore,
    settings: ParserSettings,
    diagnostics: DiagnosticCallback,
}

impl std::fmt::Debug for MpdParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpdParser")
            .field("store", &self.store)
            .field("settings", &self.settings)
            .field("diagnostics", &"<callback>")
            .finish()
    }
}

impl Default for MpdParser {
    fn default() -> Self {
        Self::new(ParserSettings::default())
    }
}

impl MpdParser {
    /// A parser that reports diagnostics through `tracing`.
    pub fn new(settings: ParserSettings) -> Self {
        let diagnostics = tracing_callback(settings.debug_mode);
        Self::with_diagnostics(settings, diagnostics)
    }

    pub fn with_diagnostics(settings: ParserSettings, diagnostics: DiagnosticCallback) -> Self {
        Self {
            store: ManifestStore::new(),
            settings,
            diagnostics,
        }
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Makes `tree` the active manifest.
    pub fn set_manifest(&self, tree: Node) {
        self.store.set(tree);
        info!("Manifest loaded");
    }

    /// Converts an MPD document and makes it the active manifest. On error the
    /// previous manifest stays active.
    pub fn load_xml(&self, xml: &str) -> Result<(), ManifestError> {
        let tree = xml::parse_xml(xml)?;
        self.set_manifest(tree);
        Ok(())
    }

    /// Same as [`MpdParser::load_xml`] for the JSON form of the tree.
    pub fn load_json(&self, json: &str) -> Result<(), ManifestError> {
        let tree = Node::from_json(json)?;
        self.set_manifest(tree);
        Ok(())
    }

    pub fn manifest(&self) -> Option<Arc<Node>> {
        self.store.get()
    }

    pub fn clear(&self) {
        self.store.clear();
        info!("Manifest unloaded");
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    /// A consistent view of the active manifest. Everything read through one
    /// view comes from the same tree, even if a reload happens meanwhile.
    pub fn snapshot(&self) -> Option<ManifestView<'_>> {
        self.view("snapshot")
    }

    // An empty store is reported against the operation that fell back.
    fn view(&self, method_name: &'static str) -> Option<ManifestView<'_>> {
        match self.store.get() {
            Some(tree) => Some(ManifestView { tree, parser: self }),
            None => {
                self.report(method_name, &ExtractError::NoManifest);
                None
            }
        }
    }

    pub fn stream_base_url(&self, manifest_url: &str) -> String {
        let base = base_url::stream_base_url(manifest_url);
        if base.is_empty() {
            self.emit("stream_base_url", format!("no path separator in {manifest_url:?}"));
        }
        base
    }

    pub fn stream_timing(&self) -> StreamTiming {
        self.view("stream_timing").map(|view| view.timing()).unwrap_or_default()
    }

    pub fn media_duration_seconds(&self) -> f64 {
        self.view("media_duration_seconds")
            .map(|view| view.media_duration_seconds())
            .unwrap_or(0.0)
    }

    pub fn max_segment_duration_seconds(&self) -> f64 {
        self.view("max_segment_duration_seconds")
            .map(|view| view.max_segment_duration_seconds())
            .unwrap_or(0.0)
    }

    pub fn average_segment_duration_seconds(&self) -> f64 {
        self.view("average_segment_duration_seconds")
            .map(|view| view.average_segment_duration_seconds())
            .unwrap_or(0.0)
    }

    pub fn subtitle_tracks(&self) -> Vec<SubtitleTrack> {
        self.view("subtitle_tracks")
            .map(|view| view.subtitle_tracks())
            .unwrap_or_default()
    }

    pub fn summary(&self, manifest_url: Option<&str>) -> Option<ManifestSummary> {
        self.view("summary").map(|view| view.summary(manifest_url))
    }

    fn report(&self, method_name: &'static str, err: &ExtractError) {
        self.emit(method_name, err.to_string());
    }

    fn emit(&self, method_name: &'static str, message: String) {
        (self.diagnostics)(Diagnostic {
            module_name: MODULE_NAME,
            method_name,
            message,
        });
    }

    fn or_fallback<T>(&self, method_name: &'static str, result: Result<T, ExtractError>, fallback: T) -> T {
        result.unwrap_or_else(|err| {
            self.report(method_name, &err);
            fallback
        })
    }
}

/// One manifest tree pinned for reading.
pub struct ManifestView<'p> {
    tree: Arc<Node>,
    parser: &'p MpdParser,
}

impl<'p> ManifestView<'p> {
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Adaptation sets of the first Period; empty when there are none.
    pub fn adaptation_sets(&self) -> Vec<AdaptationSet<'_>> {
        let periods = mpd::period_count(&self.tree);
        if periods > 1 {
            self.parser.emit(
                "adaptation_sets",
                format!("manifest has {periods} periods, only the first one is read"),
            );
        }
        self.parser
            .or_fallback("adaptation_sets", mpd::list_adaptation_sets(&self.tree), Vec::new())
    }

    pub fn content_components(&self, set: &AdaptationSet<'_>) -> Vec<ContentComponent> {
        set.content_components()
    }

    pub fn representations(&self, set: &AdaptationSet<'_>) -> Vec<Representation> {
        mpd::list_representations(set)
    }

    pub fn representation_summaries(&self, set: &AdaptationSet<'_>) -> Vec<RepresentationSummary> {
        mpd::representation_summaries(&mpd::list_representations(set))
    }

    pub fn segment_template(&self, set: &AdaptationSet<'_>) -> Option<SegmentTemplate> {
        mpd::segment_template(set)
    }

    /// Template to build segment URLs with; `None` (plus a diagnostic) for
    /// addressing modes that are not supported.
    pub fn segment_addressing(&self, set: &AdaptationSet<'_>) -> Option<SegmentTemplate> {
        match mpd::segment_addressing(set) {
            Ok(template) => Some(template),
            Err(err) => {
                self.parser.report("segment_addressing", &err);
                None
            }
        }
    }

    /// Resolves a `BaseURL` against the stream base URL. `None` (plus a
    /// diagnostic) when the base is not a usable URL.
    pub fn resolve_url(&self, base: &str, relative: &str) -> Option<String> {
        match base_url::resolve_url(base, relative) {
            Ok(url) => Some(url),
            Err(err) => {
                self.parser
                    .emit("resolve_url", format!("cannot resolve {relative:?} against {base:?}: {err}"));
                None
            }
        }
    }

    pub fn media_template_parts(&self, template: &SegmentTemplate) -> MediaTemplateParts {
        self.parser.or_fallback(
            "media_template_parts",
            template.media_template_parts(&self.parser.settings.number_placeholder),
            MediaTemplateParts::default(),
        )
    }

    pub fn subtitle_tracks(&self) -> Vec<SubtitleTrack> {
        let sets = self.adaptation_sets();
        subtitle::subtitle_tracks_from(&sets, &self.parser.settings.subtitle_mime_marker)
    }

    pub fn media_duration_seconds(&self) -> f64 {
        self.parser.or_fallback(
            "media_duration_seconds",
            timing::media_duration_seconds(&self.tree),
            0.0,
        )
    }

    pub fn max_segment_duration_seconds(&self) -> f64 {
        self.parser.or_fallback(
            "max_segment_duration_seconds",
            timing::max_segment_duration_seconds(&self.tree, &self.parser.settings.default_segment_duration),
            0.0,
        )
    }

    pub fn average_segment_duration_seconds(&self) -> f64 {
        self.parser.or_fallback(
            "average_segment_duration_seconds",
            timing::average_segment_duration_seconds(&self.tree, &self.parser.settings.default_segment_duration),
            0.0,
        )
    }

    pub fn timing(&self) -> StreamTiming {
        StreamTiming {
            total_duration: self.media_duration_seconds(),
            max_segment_duration: self.max_segment_duration_seconds(),
            average_segment_duration: self.average_segment_duration_seconds(),
        }
    }

    /// Everything the player needs from the manifest, in one pass.
    pub fn summary(&self, manifest_url: Option<&str>) -> ManifestSummary {
        let sets = self.adaptation_sets();
        debug!("Summarizing {} adaptation sets", sets.len());
        let base_url = manifest_url
            .map(|url| self.parser.stream_base_url(url))
            .filter(|base| !base.is_empty());

        let adaptation_sets = sets
            .iter()
            .map(|set| {
                let segment_template = segment::segment_template(set);
                let media_parts = segment_template
                    .as_ref()
                    .map(|template| self.media_template_parts(template));
                AdaptationSetSummary {
                    index: set.index(),
                    id: set.id().map(str::to_string),
                    mime_type: set.mime_type().map(str::to_string),
                    lang: set.lang().map(str::to_string),
                    content_type: set.content_type(),
                    content_components: set.content_components(),
                    representations: self.resolved_summaries(set, base_url.as_deref()),
                    segment_template,
                    media_parts,
                }
            })
            .collect();

        ManifestSummary {
            version: MpdParser::version(),
            base_url,
            timing: self.timing(),
            subtitles: subtitle::subtitle_tracks_from(&sets, &self.parser.settings.subtitle_mime_marker),
            adaptation_sets,
        }
    }

    fn resolved_summaries(&self, set: &AdaptationSet<'_>, base: Option<&str>) -> Vec<RepresentationSummary> {
        let mut summaries = self.representation_summaries(set);
        if let Some(base) = base {
            for summary in &mut summaries {
                summary.url = summary
                    .base_url
                    .as_deref()
                    .and_then(|relative| self.resolve_url(base, relative));
            }
        }
        summaries
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationSetSummary {
    pub index: usize,
    pub id: Option<String>,
    pub mime_type: Option<String>,
    pub lang: Option<String>,
    pub content_type: ContentType,
    pub content_components: Vec<ContentComponent>,
    pub representations: Vec<RepresentationSummary>,
    pub segment_template: Option<SegmentTemplate>,
    pub media_parts: Option<MediaTemplateParts>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSummary {
    pub version: &'static str,
    pub base_url: Option<String>,
    pub timing: StreamTiming,
    pub adaptation_sets: Vec<AdaptationSetSummary>,
    pub subtitles: Vec<SubtitleTrack>,
}
