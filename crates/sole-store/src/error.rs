//! # Backup Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / ValidationError                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path and shape context                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (back office) ← Serialized for the UI                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use sole_core::ValidationError;
use thiserror::Error;

/// Backup read/write errors.
///
/// A restore that fails with any of these leaves the running store
/// untouched: parsing happens before anything is dispatched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid JSON, or an entity has the wrong shape.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited file
    /// - A product without `sellingPriceCents`
    /// - An unknown payment method or stock log reason
    #[error("Invalid backup file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("Backup must be a JSON object")]
    NotAnObject,

    /// A required top-level section is absent.
    #[error("Backup is missing the '{0}' section")]
    MissingSection(&'static str),

    /// Well-shaped but inconsistent (duplicate ids, bad totals, ...).
    #[error("Backup rejected: {0}")]
    Invalid(#[from] ValidationError),

    /// No platform data directory could be resolved.
    #[error("No backup directory available on this platform")]
    NoBackupDir,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for backup operations.
pub type StoreResult<T> = Result<T, StoreError>;
