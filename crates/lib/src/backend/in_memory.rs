//! In-memory backend for tests and ephemeral runs.

use super::{Backend, BackendError, Snapshot};

/// Backend holding the persisted snapshot in memory. Loading a fresh instance from it
/// yields the empty initial state.
#[derive(Debug, Default)]
pub struct InMemory {
    snapshot: Snapshot,
}

impl InMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with a snapshot, as if it had been saved by a previous run.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// The currently stored snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl Backend for InMemory {
    fn load_snapshot(&mut self) -> Result<Snapshot, BackendError> {
        Ok(self.snapshot.clone())
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), BackendError> {
        self.snapshot = snapshot.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BackendError> {
        self.snapshot = Snapshot::default();
        Ok(())
    }
}
