//! Store error types.

use thiserror::Error;

/// Errors that can occur when reading or writing stored records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A key that cannot be used as a record name (empty, or a path).
    #[error("invalid {kind} key: {key:?}")]
    InvalidKey { kind: &'static str, key: String },

    /// No assessment is stored for the job.
    #[error("no assessment stored for job '{0}'")]
    NotFound(String),

    /// A stored record could not be decoded.
    #[error("corrupt record {path}: {message}")]
    Corrupt { path: String, message: String },
}

impl StoreError {
    /// Reject keys that would escape the store's directory.
    pub fn check_key(kind: &'static str, key: &str) -> Result<(), StoreError> {
        let bad = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0']);
        if bad {
            Err(StoreError::InvalidKey {
                kind,
                key: key.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
