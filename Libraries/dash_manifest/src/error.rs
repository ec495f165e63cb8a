use thiserror::Error;

/// A duration attribute that matches none of the accepted grammars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("malformed duration: {0:?}")]
    Malformed(String),
}

/// Failures while reading a manifest tree. These never escape the `MpdParser`
/// context; it turns them into fallback values plus a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no manifest is loaded")]
    NoManifest,
    #[error("{element} has no {field}")]
    MissingField {
        element: &'static str,
        field: &'static str,
    },
    #[error("unsupported segment addressing mode: {0}")]
    UnsupportedAddressing(&'static str),
    #[error(transparent)]
    Duration(#[from] DurationError),
}

impl ExtractError {
    pub(crate) fn missing(element: &'static str, field: &'static str) -> Self {
        ExtractError::MissingField { element, field }
    }
}

/// Errors at the boundary where a manifest document becomes a tree.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document has no root element")]
    EmptyDocument,
    #[error("unbalanced element: {0}")]
    Unbalanced(String),
}
