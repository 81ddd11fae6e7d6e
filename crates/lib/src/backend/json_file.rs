//! JSON-file backend.
//!
//! Persists the snapshot as a single versioned JSON file. A missing file loads as the
//! empty initial state; an unsupported format version is a deserialization error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use super::{Backend, BackendError, Snapshot};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable envelope around the snapshot for persistence
#[derive(Serialize, Deserialize)]
struct SerializableSnapshot {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(flatten)]
    snapshot: Snapshot,
}

/// Backend storing the snapshot in one JSON file on disk.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Create a backend persisting to `path`. Nothing is read or written until the
    /// instance loads or saves.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for JsonFile {
    fn load_snapshot(&mut self) -> Result<Snapshot, BackendError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let envelope: SerializableSnapshot = serde_json::from_str(&json)
                    .map_err(|e| BackendError::DeserializationFailed { source: e })?;
                Ok(envelope.snapshot)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::default()),
            Err(e) => Err(BackendError::FileIo { source: e }),
        }
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), BackendError> {
        let envelope = SerializableSnapshot {
            version: PERSISTENCE_VERSION,
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| BackendError::SerializationFailed { source: e })?;
        fs::write(&self.path, json).map_err(|e| BackendError::FileIo { source: e })
    }

    fn clear(&mut self) -> Result<(), BackendError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BackendError::FileIo { source: e }),
        }
    }
}
