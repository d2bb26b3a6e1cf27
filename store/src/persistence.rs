//! State snapshot persistence.
//!
//! The state is written to `state.json` in the LessPass home directory so a
//! session survives restarts. Snapshots carry a schema version; a snapshot
//! written by an incompatible version is ignored and the caller starts fresh.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use lesspass_utils::{atomic_write, recover_bak_file};

use crate::State;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access {}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed state snapshot at {}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub state: State,
    /// Schema version for forward compatibility.
    pub version: u32,
}

impl StateSnapshot {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Filename for the state snapshot.
    pub const FILENAME: &'static str = "state.json";

    #[must_use]
    pub fn new(state: State) -> Self {
        Self {
            state,
            version: Self::CURRENT_VERSION,
        }
    }
}

/// On-disk shape of any snapshot version; `state` is only decoded once the
/// version matches.
#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: Value,
}

/// Write `state` to `path`, creating the parent directory if needed.
pub fn save_state(path: &Path, state: &State) -> Result<(), PersistError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| PersistError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let snapshot = StateSnapshot::new(state.clone());
    let json = serde_json::to_vec_pretty(&snapshot).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &json).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "Saved state snapshot");
    Ok(())
}

/// Read the snapshot at `path`.
///
/// Returns `Ok(None)` when there is no snapshot or it has an incompatible version.
pub fn load_state(path: &Path) -> Result<Option<State>, PersistError> {
    recover_bak_file(path);
    if !path.exists() {
        return Ok(None);
    }

    let malformed = |source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    };
    let bytes = fs::read(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let envelope: Envelope = serde_json::from_slice(&bytes).map_err(malformed)?;

    if envelope.version != StateSnapshot::CURRENT_VERSION {
        tracing::warn!(
            path = %path.display(),
            found = envelope.version,
            expected = StateSnapshot::CURRENT_VERSION,
            "Ignoring state snapshot with incompatible version"
        );
        return Ok(None);
    }

    serde_json::from_value(envelope.state)
        .map(Some)
        .map_err(malformed)
}
