//! Structural error types.
//!
//! Returned by the builder operations when they are handed an id or index
//! that does not exist. These indicate a caller bug rather than bad user
//! input, so they are never retried or logged by the core.

use thiserror::Error;

/// Errors raised by schema mutation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A section or question id that is not part of the assessment.
    #[error("no {kind} with id '{id}'")]
    InvalidReference { kind: RefKind, id: String },

    /// A position outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What kind of element an [`StructuralError::InvalidReference`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Section,
    Question,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefKind::Section => write!(f, "section"),
            RefKind::Question => write!(f, "question"),
        }
    }
}

impl StructuralError {
    pub(crate) fn section(id: &str) -> Self {
        StructuralError::InvalidReference {
            kind: RefKind::Section,
            id: id.to_string(),
        }
    }

    pub(crate) fn question(id: &str) -> Self {
        StructuralError::InvalidReference {
            kind: RefKind::Question,
            id: id.to_string(),
        }
    }

    /// Fails with `IndexOutOfRange` unless `index < len`.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(StructuralError::IndexOutOfRange { index, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            StructuralError::section("s9").to_string(),
            "no section with id 's9'"
        );
        assert_eq!(
            StructuralError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "index 3 out of range for length 2"
        );
    }

    #[test]
    fn check_index_bounds() {
        assert!(StructuralError::check_index(0, 1).is_ok());
        assert_eq!(
            StructuralError::check_index(1, 1),
            Err(StructuralError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(StructuralError::check_index(0, 0).is_err());
    }
}
