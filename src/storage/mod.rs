pub mod local;
pub mod naming;

pub use local::*;

use std::path::PathBuf;

/// Errors raised by the file store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage directory {path:?} is not usable: {reason}")]
    Unusable { path: PathBuf, reason: String },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid stored file name: {0:?}")]
    InvalidName(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
