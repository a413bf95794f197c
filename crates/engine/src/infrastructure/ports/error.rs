//! Error types for port operations.

use std::time::Duration;

/// Collaborator operation errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepoError {
    /// Backend operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Business constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Call did not complete within the configured collaborator timeout.
    #[error("Timed out in {operation} after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Create a Timeout error.
    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::Timeout { operation, after }
    }

    /// Check if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_names_operation() {
        let err = RepoError::database("load_graph", "connection reset");
        assert_eq!(
            err.to_string(),
            "Database error in load_graph: connection reset"
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_error() {
        let err = RepoError::timeout("persist_gate_add", Duration::from_millis(250));
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Timed out in persist_gate_add after 250ms");
    }
}
