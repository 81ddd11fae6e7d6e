//! Error types for the identity store.

use thiserror::Error;

/// Errors raised by identity registration, lookup and profile editing.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No identity is registered under this login.
    #[error("User not found: {login}")]
    UserNotFound {
        /// The login that was looked up
        login: String,
    },

    /// An identity with this login already exists.
    #[error("An account with this login already exists: {login}")]
    DuplicateUser {
        /// The login that was already registered
        login: String,
    },

    /// Registration was attempted without a login.
    #[error("Invalid login")]
    InvalidLogin,

    /// Registration was attempted without a password.
    #[error("Invalid password")]
    InvalidPassword,

    /// A login rename targeted a login that is already registered.
    #[error("Login already taken: {login}")]
    LoginTaken {
        /// The login the rename collided with
        login: String,
    },

    /// An extra attribute was read before ever being set.
    #[error("Attribute not set: {name}")]
    AttributeNotSet {
        /// The attribute key that was looked up
        name: String,
    },
}

impl IdentityError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IdentityError::UserNotFound { .. })
    }

    /// Check if this error indicates a duplicate registration.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, IdentityError::DuplicateUser { .. })
    }

    /// Check if this error is credential-related.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(
            self,
            IdentityError::InvalidLogin
                | IdentityError::InvalidPassword
                | IdentityError::LoginTaken { .. }
                | IdentityError::AttributeNotSet { .. }
        )
    }
}

// Conversion from IdentityError to the main Error type
impl From<IdentityError> for crate::Error {
    fn from(err: IdentityError) -> Self {
        crate::Error::Identity(err)
    }
}
