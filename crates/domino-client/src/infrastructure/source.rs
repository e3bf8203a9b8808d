//! Loading game-state snapshots from disk.
//!
//! Polling the game server is outside this crate; whatever does it drops the
//! latest snapshot JSON somewhere this module can read it.

use std::path::{Path, PathBuf};

use domino_core::{GameState, StateError};
use thiserror::Error;

/// Error type for snapshot loading.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading game state at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    State(#[from] StateError),
}

/// Reads and parses the snapshot stored at `path`.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be read and
/// [`SourceError::State`] if its contents are not a valid snapshot.
pub fn load_state(path: &Path) -> Result<GameState, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(GameState::from_json(&text)?)
}
