//! Error types for message delivery and inbox reads.

use thiserror::Error;

/// Errors raised by the messaging router.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MessagingError {
    /// An identity tried to message itself.
    #[error("User cannot send a message to themselves")]
    SelfMessage,

    /// The receiver has declared the sender an enemy.
    #[error("Invalid operation: {name} is your enemy")]
    EnemyReceiver {
        /// Display name of the receiver that declared the enmity
        name: String,
    },

    /// The personal inbox is empty.
    #[error("There are no messages")]
    NoDirectMessages,

    /// The community inbox is empty.
    #[error("There are no community messages")]
    NoCommunityMessages,
}

impl MessagingError {
    /// Check if this error indicates an empty inbox.
    pub fn is_empty_inbox(&self) -> bool {
        matches!(
            self,
            MessagingError::NoDirectMessages | MessagingError::NoCommunityMessages
        )
    }

    /// Check if this error was raised because the receiver lists the sender as an enemy.
    pub fn is_enmity_conflict(&self) -> bool {
        matches!(self, MessagingError::EnemyReceiver { .. })
    }

    /// Check if this error was raised by a self-targeting send.
    pub fn is_self_reference(&self) -> bool {
        matches!(self, MessagingError::SelfMessage)
    }
}

// Conversion from MessagingError to the main Error type
impl From<MessagingError> for crate::Error {
    fn from(err: MessagingError) -> Self {
        crate::Error::Messaging(err)
    }
}
