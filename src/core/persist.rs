//! Persistence adapter
//!
//! Serializes a diagram to a named slot: one TOML file per slot under a
//! diagrams directory. Saving overwrites the slot; loading tolerates absence
//! (first run) and rejects malformed files without crashing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::models::{Edge, Node};
use crate::core::store::DiagramStore;

/// Persisted shape of a diagram: the node and edge lists
///
/// Both fields are required; a file missing either is treated as corrupt.
#[derive(Debug, Serialize, Deserialize)]
struct SavedDiagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Why a save failed
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage medium could not be written
    #[error("diagram storage unavailable: {0}")]
    Unavailable(#[from] io::Error),
    /// The diagram could not be encoded
    #[error("could not encode diagram: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Why a load failed
#[derive(Debug, Error)]
pub enum LoadError {
    /// No slot with this name has been saved
    #[error("no saved diagram named \"{0}\"")]
    NotFound(String),
    /// The slot exists but is not parseable as a diagram
    #[error("saved diagram \"{0}\" is corrupt: {1}")]
    Corrupt(String, toml::de::Error),
    /// The storage medium could not be read
    #[error("diagram storage unavailable: {0}")]
    Unavailable(io::Error),
}

/// File-backed diagram storage rooted at a diagrams directory
#[derive(Debug, Clone)]
pub struct DiagramStorage {
    dir: PathBuf,
}

impl DiagramStorage {
    /// Storage rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory
    ///
    /// Returns:
    /// - Linux: `~/.local/share/ermodeler/diagrams`
    /// - macOS: `~/Library/Application Support/ermodeler/diagrams`
    /// - Windows: `%APPDATA%\ermodeler\diagrams`
    #[must_use]
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ermodeler")
            .join("diagrams");
        Self::new(dir)
    }

    /// Directory slots are stored under
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path of a slot
    #[must_use]
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.toml"))
    }

    /// Save the diagram to `slot`, overwriting any prior value
    ///
    /// # Errors
    /// [`StorageError::Unavailable`] when the directory cannot be created or
    /// the file cannot be written.
    pub fn save(&self, store: &DiagramStore, slot: &str) -> Result<(), StorageError> {
        let saved = SavedDiagram {
            nodes: store.nodes().to_vec(),
            edges: store.edges().to_vec(),
        };
        let encoded = toml::to_string_pretty(&saved)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(slot), encoded)?;
        Ok(())
    }

    /// Load the diagram saved in `slot`
    ///
    /// # Errors
    /// [`LoadError::NotFound`] when the slot is absent,
    /// [`LoadError::Corrupt`] when present but not parseable,
    /// [`LoadError::Unavailable`] when the medium cannot be read.
    pub fn load(&self, slot: &str) -> Result<DiagramStore, LoadError> {
        let raw = match fs::read_to_string(self.slot_path(slot)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(slot.to_string()));
            }
            Err(err) => return Err(LoadError::Unavailable(err)),
        };

        let saved: SavedDiagram =
            toml::from_str(&raw).map_err(|err| LoadError::Corrupt(slot.to_string(), err))?;
        Ok(DiagramStore::from_parts(saved.nodes, saved.edges))
    }

    /// Whether `slot` has been saved
    #[must_use]
    pub fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_file()
    }
}
