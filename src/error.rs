use std::path::PathBuf;

use thiserror::Error;

use crate::engine::session::UnitFilter;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("word list has no usable entries (each row needs a term and an example sentence)")]
    Empty,

    #[error("could not read {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not parse JSON word list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unsupported word list format: {0}")]
    UnsupportedFormat(String),

    #[error("bundled word list {0} is missing")]
    MissingBundle(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no words found for {filter}")]
    Empty { filter: UnitFilter },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid unit {0:?}: expected \"all\" or a unit number")]
pub struct InvalidUnitFilter(pub String);
