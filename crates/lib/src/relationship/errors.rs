//! Error types for the relationship graph.

use thiserror::Error;

use super::Relation;

/// Errors raised by relationship transitions.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RelationshipError {
    /// The target already holds this relation toward the actor, or vice versa.
    #[error("User is already listed as {relation}")]
    DuplicateRelation {
        /// The relation set the duplicate insertion targeted
        relation: Relation,
    },

    /// A friend request toward this login is already pending acceptance.
    #[error("Friend request to {login} is already pending, awaiting acceptance")]
    RequestPending {
        /// The login the earlier request was sent to
        login: String,
    },

    /// The target has declared the actor an enemy, which blocks every positive relation.
    #[error("Invalid operation: {name} is your enemy")]
    EnemyTarget {
        /// Display name of the identity that declared the enmity
        name: String,
    },

    /// An identity tried to hold a relation to itself.
    #[error("User cannot list themselves as {relation}")]
    SelfRelation {
        /// The relation set the self-targeting operation touched
        relation: Relation,
    },
}

impl RelationshipError {
    /// Check if this error indicates a duplicate relation or a still-pending request.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            RelationshipError::DuplicateRelation { .. } | RelationshipError::RequestPending { .. }
        )
    }

    /// Check if this error was raised because the target lists the actor as an enemy.
    pub fn is_enmity_conflict(&self) -> bool {
        matches!(self, RelationshipError::EnemyTarget { .. })
    }

    /// Check if this error was raised by a self-targeting operation.
    pub fn is_self_reference(&self) -> bool {
        matches!(self, RelationshipError::SelfRelation { .. })
    }
}

// Conversion from RelationshipError to the main Error type
impl From<RelationshipError> for crate::Error {
    fn from(err: RelationshipError) -> Self {
        crate::Error::Relationship(err)
    }
}
