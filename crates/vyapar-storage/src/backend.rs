//! # Storage Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StateBackend implementations                     │
//! │                                                                         │
//! │   LocalStore (primary, always on)      DataFolderBackend (desktop)     │
//! │   ───────────────────────────────      ───────────────────────────     │
//! │   <data_dir>/<key>.json                <dataFolderPath>/vyapar_data.json│
//! │   compact JSON                         pretty JSON                     │
//! │   tmp file + rename                    skipped when no folder is set   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use vyapar_core::AppState;

use crate::error::{StorageError, StorageResult};

/// Somewhere a full state snapshot can be written.
pub trait StateBackend: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Writes the whole tree.
    fn save(&self, state: &AppState) -> StorageResult<()>;
}

// =============================================================================
// Local key-value store
// =============================================================================

/// Directory-backed string store holding one file per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
    key: String,
}

impl LocalStore {
    /// Store rooted at `dir`; the state lives under `key`.
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        LocalStore {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Raw value for `key`, `None` when never set.
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stores `value` under `key`.
    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;

        debug!(path = ?target, bytes = value.len(), "Local store updated");
        Ok(())
    }

    /// Decodes the stored state, `None` when nothing has been saved yet.
    pub fn load(&self) -> StorageResult<Option<AppState>> {
        match self.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

impl StateBackend for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    fn save(&self, state: &AppState) -> StorageResult<()> {
        let payload = serde_json::to_string(state)?;
        self.set(&self.key, &payload)
    }
}

// =============================================================================
// Data folder
// =============================================================================

/// Mirrors the state into the folder named by `settings.dataFolderPath`.
#[derive(Debug, Clone)]
pub struct DataFolderBackend {
    file_name: String,
}

impl DataFolderBackend {
    pub fn new(file_name: impl Into<String>) -> Self {
        DataFolderBackend {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Target file for `state`, if a folder is configured.
    pub fn target(&self, state: &AppState) -> Option<PathBuf> {
        state
            .settings
            .data_folder()
            .map(|folder| Path::new(folder).join(&self.file_name))
    }

    /// Checks that `path` is an existing directory and returns its canonical form.
    pub fn select_folder(path: impl AsRef<Path>) -> StorageResult<PathBuf> {
        let path = path.as_ref();
        let canonical =
            fs::canonicalize(path).map_err(|_| StorageError::FolderNotFound(path.to_path_buf()))?;

        if !canonical.is_dir() {
            return Err(StorageError::FolderNotFound(path.to_path_buf()));
        }

        Ok(canonical)
    }
}

impl StateBackend for DataFolderBackend {
    fn name(&self) -> &'static str {
        "data_folder"
    }

    fn save(&self, state: &AppState) -> StorageResult<()> {
        let Some(target) = self.target(state) else {
            debug!("No data folder set, skipping");
            return Ok(());
        };

        let payload = serde_json::to_string_pretty(state)?;
        fs::write(&target, payload)?;

        debug!(path = ?target, "Data folder copy written");
        Ok(())
    }
}
