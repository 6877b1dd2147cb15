//! # Mesh Errors
//!
//! Error types for primitive construction and boolean operations.

use thiserror::Error;

/// Errors that can occur while building or combining meshes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A primitive was requested with a non-positive or non-finite size.
    #[error("Primitive construction failed: {message}")]
    PrimitiveConstruction { message: String },

    /// Boolean operation failed
    #[error("Boolean {operation} failed: {message}")]
    BooleanFailed {
        operation: &'static str,
        message: String,
    },

    /// The boolean result does not bound a closed volume.
    #[error("Boolean {operation} produced a non-manifold mesh ({open_edges} unmatched edges)")]
    NonManifold {
        operation: &'static str,
        open_edges: usize,
    },

    /// The boolean result has no faces left.
    #[error("Boolean {operation} produced an empty mesh")]
    EmptyResult { operation: &'static str },

    /// One of the boolean operands has no faces.
    #[error("Boolean {operation} received an empty operand")]
    EmptyOperand { operation: &'static str },
}

impl MeshError {
    /// Creates a primitive construction error.
    pub fn primitive(message: impl Into<String>) -> Self {
        Self::PrimitiveConstruction {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            operation,
            message: message.into(),
        }
    }

    /// Returns true for errors raised by the primitive factory.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::PrimitiveConstruction { .. })
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::NonManifold {
            operation: "difference",
            open_edges: 4,
        };
        assert!(err.to_string().contains("difference"));
        assert!(err.to_string().contains("4 unmatched"));

        let err = MeshError::primitive("radius must be positive");
        assert!(err.is_primitive());
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
