//! Error types for deptrec-core.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

/// All errors that can arise from store and codec operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Add would violate a uniqueness invariant.
    #[error("duplicate {0}")]
    Duplicate(String),

    /// Remove or edit referenced an absent entity.
    #[error("{0} not found")]
    NotFound(String),

    /// The department already holds the maximum number of research groups.
    #[error("department already holds {0} research groups")]
    CapacityExceeded(usize),

    /// Scheduling a seminar whose date-time is not strictly in the future.
    #[error("seminar date {0} has already passed")]
    DatePassed(NaiveDateTime),

    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context.
    #[error("failed to parse data file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but its contents are semantically malformed
    /// (bad date tuple, in-document invariant violation). The store is
    /// left empty: load clears before parsing and does not roll back.
    #[error("corrupt data file at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The mutation was applied in memory but writing the document failed.
    /// Recoverable by a later explicit `save()`; nothing is rolled back.
    #[error("change applied but saving to {path} failed: {source}")]
    Unsaved {
        path: PathBuf,
        #[source]
        source: Box<StoreError>,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.deptrec/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
