//! Error types for element kernel operations.

use crate::model::ElementKind;
use thiserror::Error;

/// Result type alias using felt Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evaluating an element kernel.
///
/// Every failure is local to a single element evaluation. Evaluations are
/// deterministic, so none of these are worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An element of the wrong kind (or wrong node count) was handed to a kernel.
    #[error("element kind mismatch: expected {expected:?}, found {found:?} with {nodes} nodes")]
    ElementKindMismatch {
        expected: ElementKind,
        found: ElementKind,
        nodes: usize,
    },

    /// Natural coordinate outside the iso-parametric domain [-1, 1].
    #[error("natural coordinate {coordinate} = {value} is outside [-1, 1]")]
    OutOfDomain { coordinate: &'static str, value: f64 },

    /// Row index out of range for a partial strain-displacement accessor.
    #[error("strain-displacement row {row} does not exist (matrix has {rows} rows)")]
    InvalidRow { row: usize, rows: usize },

    /// The operation is not implemented for this element or load kind.
    #[error("{operation} is not supported for {subject}")]
    Unsupported {
        operation: &'static str,
        subject: String,
    },

    /// Zero-length or otherwise collapsed element geometry.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Invalid material properties.
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    /// Invalid cross-section properties.
    #[error("invalid section: {0}")]
    InvalidSection(String),

    /// Malformed load definition.
    #[error("invalid load: {0}")]
    InvalidLoad(String),

    /// Quadrature requested with an unusable point count.
    #[error("invalid quadrature: {0}")]
    InvalidQuadrature(String),

    /// Matrices of incompatible shapes were combined.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl Error {
    /// Shorthand for an [`Error::Unsupported`] value.
    pub fn unsupported(operation: &'static str, subject: impl Into<String>) -> Self {
        Error::Unsupported {
            operation,
            subject: subject.into(),
        }
    }

    /// Whether this error marks a missing feature rather than a failed computation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = Error::unsupported("load displacement recovery", "Bar elements");
        assert!(err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "load displacement recovery is not supported for Bar elements"
        );
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = Error::ElementKindMismatch {
            expected: ElementKind::Bar,
            found: ElementKind::Triangle,
            nodes: 3,
        };
        assert!(!err.is_unsupported());
        assert!(err.to_string().contains("expected Bar, found Triangle"));
    }
}
