//!
//! Sodality: a small social network held in memory and persisted as snapshots.
//! This library provides the core components for building and interacting with a Sodality instance.
//!
//! ## Core Concepts
//!
//! * **Identities (`identity::Identity`)**: registered users, uniquely keyed by login, carrying a
//!   profile, an attribute bag, two message inboxes and their relationship state.
//! * **Relationships (`relationship`)**: the per-identity relationship graph (friends, pending
//!   friend requests, idols/fans, crushes, enemies) and the transition rules between its states.
//! * **Messaging (`messaging`)**: polymorphic message delivery, either directly into one
//!   identity's inbox or fanned out to every member of a community.
//! * **Communities (`community::Community`)**: named groups with a manager and an ordered
//!   member roster.
//! * **Sessions (`session::Session`)**: capability handles binding one authenticated identity
//!   to a unique id for the duration of a process run.
//! * **Instance (`instance::Instance`)**: the context object owning all tables; every operation
//!   of the command surface goes through it.
//! * **Backends (`backend::Backend`)**: a pluggable persistence layer exchanging full
//!   [`backend::Snapshot`]s with the instance.

pub mod backend;
pub mod clock;
pub mod community;
pub mod identity;
pub mod instance;
pub mod messaging;
pub mod relationship;
pub mod render;
pub mod session;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use instance::Instance;

/// Result type used throughout the Sodality library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Sodality library.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured identity errors from the identity module
    #[error(transparent)]
    Identity(identity::IdentityError),

    /// Structured relationship errors from the relationship module
    #[error(transparent)]
    Relationship(relationship::RelationshipError),

    /// Structured messaging errors from the messaging module
    #[error(transparent)]
    Messaging(messaging::MessagingError),

    /// Structured community errors from the community module
    #[error(transparent)]
    Community(community::CommunityError),

    /// Structured session errors from the session module
    #[error(transparent)]
    Session(session::SessionError),

    /// Structured persistence errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Identity(_) => "identity",
            Error::Relationship(_) => "relationship",
            Error::Messaging(_) => "messaging",
            Error::Community(_) => "community",
            Error::Session(_) => "session",
            Error::Backend(_) => "backend",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Identity(err) => err.is_not_found(),
            Error::Session(err) => err.is_not_found(),
            Error::Community(err) => err.is_not_found(),
            Error::Messaging(err) => err.is_empty_inbox(),
            _ => false,
        }
    }

    /// Check if this error indicates a duplicate registration or relation.
    pub fn is_duplicate(&self) -> bool {
        match self {
            Error::Identity(err) => err.is_duplicate(),
            Error::Relationship(err) => err.is_duplicate(),
            Error::Community(err) => err.is_duplicate(),
            _ => false,
        }
    }

    /// Check if this error was raised because the target lists the actor as an enemy.
    pub fn is_enmity_conflict(&self) -> bool {
        match self {
            Error::Relationship(err) => err.is_enmity_conflict(),
            Error::Messaging(err) => err.is_enmity_conflict(),
            _ => false,
        }
    }

    /// Check if this error was raised by a self-targeting operation.
    pub fn is_self_reference(&self) -> bool {
        match self {
            Error::Relationship(err) => err.is_self_reference(),
            Error::Messaging(err) => err.is_self_reference(),
            _ => false,
        }
    }

    /// Check if this error is credential-related (bad or missing login/password,
    /// rejected login rename, unfilled attribute).
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Error::Identity(err) => err.is_invalid_credentials(),
            Error::Session(err) => err.is_invalid_credentials(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Backend(err) => err.is_io_error(),
            _ => false,
        }
    }
}
