//! # Persistence
//!
//! Composes the backends chosen by [`StorageConfig`] and exposes the
//! load/save/export entry points the app uses.
//!
//! ## Save Flow
//! ```text
//! save_state(&AppState)
//!      │
//!      ├──► LocalStore::save         (always; failure logged)
//!      │
//!      └──► DataFolderBackend::save  (desktop only, folder set; failure logged)
//! ```
//!
//! Load and save never return errors. A broken store degrades to the default
//! state rather than stopping the app.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info};
use vyapar_core::AppState;

use crate::backend::{DataFolderBackend, LocalStore, StateBackend};
use crate::backup;
use crate::config::StorageConfig;
use crate::error::StorageResult;

#[derive(Debug, Clone)]
pub struct Persistence {
    local: LocalStore,
    folder: Option<DataFolderBackend>,
}

impl Persistence {
    pub fn new(local: LocalStore, folder: Option<DataFolderBackend>) -> Self {
        Persistence { local, folder }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        let local = LocalStore::new(&config.data_dir, &config.storage_key);
        let folder = config
            .desktop_folder
            .then(|| DataFolderBackend::new(&config.data_file_name));

        debug!(
            data_dir = ?config.data_dir,
            desktop_folder = config.desktop_folder,
            "Persistence ready"
        );
        Persistence { local, folder }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Whether the data folder capability is on.
    pub fn has_folder_backend(&self) -> bool {
        self.folder.is_some()
    }

    /// Stored state, or the default when nothing (or nothing readable) is stored.
    pub fn load_state(&self) -> AppState {
        match self.local.load() {
            Ok(Some(state)) => {
                debug!(
                    customers = state.customers.len(),
                    finances = state.finances.len(),
                    orders = state.orders.len(),
                    "State loaded"
                );
                state
            }
            Ok(None) => {
                info!("No stored state, starting fresh");
                AppState::default()
            }
            Err(e) => {
                error!(error = %e, key = self.local.key(), "Failed to load stored state");
                AppState::default()
            }
        }
    }

    /// Writes `state` to every active backend.
    pub fn save_state(&self, state: &AppState) {
        let backends = std::iter::once(&self.local as &dyn StateBackend)
            .chain(self.folder.iter().map(|f| f as &dyn StateBackend));

        for backend in backends {
            if let Err(e) = backend.save(state) {
                error!(backend = backend.name(), error = %e, "Failed to save state");
            }
        }
    }

    /// Writes a dated backup into `dir`.
    pub fn export_data(&self, state: &AppState, dir: &Path) -> StorageResult<PathBuf> {
        backup::write_backup(state, dir, Local::now().date_naive())
    }
}
