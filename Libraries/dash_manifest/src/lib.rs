pub mod args;
pub mod base_url;
pub mod config;
pub mod diagnostics;
pub mod duration;
pub mod error;
pub mod mpd;
pub mod parser;
pub mod store;
pub mod tree;

pub use config::ParserSettings;
pub use diagnostics::{Diagnostic, DiagnosticCallback};
pub use error::{DurationError, ExtractError, ManifestError};
pub use parser::{ManifestSummary, ManifestView, MpdParser};
pub use store::ManifestStore;
pub use tree::{normalize_to_list, Node};
