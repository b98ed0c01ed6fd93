//! Domain error taxonomy.
//!
//! Every user-facing variant maps to one HTTP status in the API layer.
//! `Internal` is logged there and never shown to the caller verbatim.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed registration input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No live session, or credentials did not verify.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role does not match.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Hashing or task failure. Logged, never shown verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CoreError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_internal_is_a_server_fault() {
        assert!(CoreError::Validation("x".into()).is_client_error());
        assert!(CoreError::Unauthorized("x".into()).is_client_error());
        assert!(CoreError::Forbidden("x".into()).is_client_error());
        assert!(!CoreError::Internal("x".into()).is_client_error());
    }
}
