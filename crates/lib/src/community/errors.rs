//! Error types for the community table.

use thiserror::Error;

/// Errors raised by community registration, lookup and membership.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommunityError {
    /// No community is registered under this name.
    #[error("Community does not exist: {name}")]
    CommunityNotFound {
        /// The name that was looked up
        name: String,
    },

    /// A community with this name already exists.
    #[error("A community with this name already exists: {name}")]
    DuplicateCommunity {
        /// The name that was already registered
        name: String,
    },

    /// The identity is already a member of this community.
    #[error("User is already a member of this community: {name}")]
    AlreadyMember {
        /// The community the duplicate join targeted
        name: String,
    },
}

impl CommunityError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommunityError::CommunityNotFound { .. })
    }

    /// Check if this error indicates a duplicate registration or membership.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            CommunityError::DuplicateCommunity { .. } | CommunityError::AlreadyMember { .. }
        )
    }
}

impl From<CommunityError> for crate::Error {
    fn from(err: CommunityError) -> Self {
        crate::Error::Community(err)
    }
}
