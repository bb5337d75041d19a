use std::path::PathBuf;

use thiserror::Error;

use crate::state::GradientError;

/// Failure of an inflation call.
///
/// Inflation is all-or-nothing: when one of these is returned the target
/// drawable keeps the state it had before the call.
#[derive(Debug, Error)]
pub enum InflateError {
    #[error("malformed xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected <{expected}> element, found <{found}>")]
    UnexpectedTag { expected: &'static str, found: String },

    #[error("<icon-font> requires a non-empty `code` attribute")]
    MissingCode,

    #[error("`code` is not a valid hexadecimal code point: {0:?}")]
    InvalidCode(String),

    #[error("attribute `{name}` has malformed value {value:?}")]
    InvalidAttribute { name: String, value: String },

    #[error("invalid <gradient>: {0}")]
    Gradient(#[from] GradientError),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InflateError {
    pub(crate) fn attribute(name: &str, value: &str) -> Self {
        InflateError::InvalidAttribute { name: name.to_string(), value: value.to_string() }
    }
}

/// Failure to read a bundled asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("reading asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset {path} is not a valid icon manifest: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Font(#[from] iconfont_engine::text::FontLoadError),
}
