//! Unified error type for the ore-stockyard planning core.
//!
//! [`OrePlanError`] represents both the recoverable conditions the core is
//! specified to surface (an infeasible blending model) and the precondition
//! violations that indicate a caller bug. Domain-specific error sources are
//! converted into it at the boundary so driver code has one error type to
//! match on.

use thiserror::Error;

/// Unified error type for all ore-planning operations.
#[derive(Error, Debug)]
pub enum OrePlanError {
    /// The blending model (OMP) produced no feasible solution.
    #[error("infeasible or unbounded blending model: {0}")]
    Infeasible(String),

    /// A precondition required by the constructive or a move was violated.
    ///
    /// These indicate a programming error at the call site (e.g. calling
    /// `build` before routes are set) and are never recovered from.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The external MILP solver failed for a reason unrelated to
    /// infeasibility (numerical failure, solver panic, etc).
    #[error("solver error: {0}")]
    Solver(String),

    /// Input validation errors for a deserialized problem instance.
    #[error("validation error: {0}")]
    Validation(String),

    /// Parsing/deserialization errors.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O errors (file access).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors (for wrapping external errors).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for results using [`OrePlanError`].
pub type OrePlanResult<T> = Result<T, OrePlanError>;

impl From<String> for OrePlanError {
    fn from(s: String) -> Self {
        OrePlanError::Other(s)
    }
}

impl From<&str> for OrePlanError {
    fn from(s: &str) -> Self {
        OrePlanError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for OrePlanError {
    fn from(err: serde_json::Error) -> Self {
        OrePlanError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OrePlanError::Infeasible("quality bounds disjoint".into());
        assert!(err.to_string().contains("infeasible"));
        assert!(err.to_string().contains("quality bounds disjoint"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: OrePlanError = io_err.into();
        assert!(matches!(err, OrePlanError::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn example() -> OrePlanResult<i32> {
            Ok(7)
        }
        assert_eq!(example().unwrap(), 7);
    }
}
