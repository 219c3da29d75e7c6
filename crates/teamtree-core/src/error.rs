use std::path::PathBuf;
use thiserror::Error;

/// Errors on the data-loading path (file/CLI/fetch).
///
/// Shape problems inside an otherwise valid JSON document are not
/// errors: the normalizer degrades them to defaults or to a `None`
/// root instead.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document contains no referral data")]
    Empty,
}
