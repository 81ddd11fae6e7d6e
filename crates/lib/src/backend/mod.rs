//! Persistence backends.
//!
//! The instance exchanges full [`Snapshot`]s with a pluggable [`Backend`]: the whole
//! identity and community state goes out on save and comes back on load, and the
//! instance re-keys its in-memory maps from the lists. Snapshot bytes are the backend's
//! concern; the library ships [`JsonFile`] for on-disk JSON and [`InMemory`] for tests
//! and ephemeral runs.

use serde::{Deserialize, Serialize};

use crate::community::Community;
use crate::identity::Identity;

pub mod errors;
mod in_memory;
mod json_file;

pub use errors::BackendError;
pub use in_memory::InMemory;
pub use json_file::JsonFile;

/// The full exportable state: every identity and every community.
///
/// Sessions are deliberately absent; they live only for the process run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub communities: Vec<Community>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty() && self.communities.is_empty()
    }
}

/// A persistence collaborator exchanging snapshots with the instance.
pub trait Backend: std::fmt::Debug {
    /// Load the persisted snapshot. A backend with nothing persisted yet returns the
    /// empty snapshot, not an error.
    fn load_snapshot(&mut self) -> Result<Snapshot, BackendError>;

    /// Persist the given snapshot, replacing whatever was stored before.
    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), BackendError>;

    /// Discard the persisted snapshot, if any.
    fn clear(&mut self) -> Result<(), BackendError>;
}
