//! Errors from the I/O edges of the tutor: embedded content, config, logs.
//! Scoring itself never fails.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No embedded content pack for the language
    #[error("Content pack not found: {name}")]
    ContentNotFound { name: String },

    #[error("Invalid content pack {name}: {source}")]
    InvalidContent {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not resolve a state directory for {}", purpose)]
    NoStateDir { purpose: String },

    #[error("Logging setup failed for {}: {}", path.display(), reason)]
    Logging { path: PathBuf, reason: String },
}
