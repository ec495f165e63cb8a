use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

/// Module name diagnostics from the manifest parser are tagged with.
pub const MODULE_NAME: &str = "MPD PARSER";

/// Raised when an extraction had to fall back to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub module_name: &'static str,
    pub method_name: &'static str,
    pub message: String,
}

pub type DiagnosticCallback = Arc<dyn Fn(Diagnostic) + Send + Sync>;

/// Forwards diagnostics to `tracing`: as warnings in debug mode, as debug
/// events otherwise.
pub fn tracing_callback(debug_mode: bool) -> DiagnosticCallback {
    Arc::new(move |diagnostic: Diagnostic| {
        if debug_mode {
            warn!(
                module = diagnostic.module_name,
                method = diagnostic.method_name,
                version = env!("CARGO_PKG_VERSION"),
                "{}",
                diagnostic.message
            );
        } else {
            debug!(
                module = diagnostic.module_name,
                method = diagnostic.method_name,
                "{}",
                diagnostic.message
            );
        }
    })
}
