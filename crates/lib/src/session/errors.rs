//! Error types for session management.

use thiserror::Error;

/// Errors raised by session minting and lookup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session is registered under this id.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The id that was looked up
        id: String,
    },

    /// Unknown login or password mismatch at session open.
    #[error("Invalid login or password")]
    InvalidCredentials,
}

impl SessionError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::SessionNotFound { .. })
    }

    /// Check if this error is credential-related.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, SessionError::InvalidCredentials)
    }
}

impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
