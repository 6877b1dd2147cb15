//! # Generation Errors
//!
//! Error types for parameter validation and mechanism assembly.

use geneva_mesh::MeshError;
use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenevaError {
    /// Input rejected before any geometry was built.
    #[error("Invalid parameter `{parameter}`: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    /// A boolean operation produced an unusable solid.
    #[error("CSG failure at step '{step}': {source}")]
    CsgFailure {
        step: &'static str,
        #[source]
        source: MeshError,
    },

    /// The primitive factory refused a request.
    #[error("Primitive construction failed at step '{step}': {source}")]
    PrimitiveConstructionFailure {
        step: &'static str,
        #[source]
        source: MeshError,
    },
}

impl GenevaError {
    /// Creates an invalid parameter error.
    pub fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Attributes a mesh error to an assembly step.
    pub fn at_step(step: &'static str, source: MeshError) -> Self {
        if source.is_primitive() {
            Self::PrimitiveConstructionFailure { step, source }
        } else {
            Self::CsgFailure { step, source }
        }
    }

    /// Returns true for errors raised during validation.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Result type alias for generation.
pub type GenevaResult<T> = Result<T, GenevaError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenevaError::invalid("slot_quantity", "must be at least 3, got 2");
        assert!(err.to_string().contains("slot_quantity"));
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_mesh_errors_map_by_kind() {
        let err = GenevaError::at_step("wheel body", MeshError::primitive("radius"));
        assert!(matches!(err, GenevaError::PrimitiveConstructionFailure { .. }));

        let err = GenevaError::at_step(
            "drill wheel hole",
            MeshError::NonManifold {
                operation: "difference",
                open_edges: 2,
            },
        );
        assert!(matches!(err, GenevaError::CsgFailure { step: "drill wheel hole", .. }));
        assert!(err.to_string().contains("2 unmatched"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenevaError>();
    }
}
