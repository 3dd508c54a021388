//! # vyapar-storage: Persistence Layer for Vyapar Flow
//!
//! Reads and writes the whole [`AppState`](vyapar_core::AppState) tree. The
//! store in `vyapar-core` never touches a file; this crate is attached to it
//! as a [`StateObserver`](vyapar_core::StateObserver) by the application.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            vyapar-storage                               │
//! │                                                                         │
//! │   StorageConfig ──► Persistence ──┬──► LocalStore        (primary)     │
//! │   (storage.toml,                  └──► DataFolderBackend (desktop)     │
//! │    VYAPAR_* env)        ▲                                               │
//! │                         │ save_state                                    │
//! │                      AutoSave ◄── Store observer callback               │
//! │                                                                         │
//! │   backup: export_data / parse_backup / read_backup                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vyapar_core::Store;
//! use vyapar_storage::{AutoSave, Persistence, StorageConfig};
//!
//! # async fn demo() {
//! let config = StorageConfig::load_or_default(None);
//! let persistence = Arc::new(Persistence::from_config(&config));
//!
//! let mut store = Store::new(persistence.load_state());
//! let autosave = AutoSave::spawn(Arc::clone(&persistence));
//! store.subscribe(autosave.clone());
//!
//! // ... mutate the store ...
//!
//! autosave.shutdown().await;
//! # }
//! ```

pub mod autosave;
pub mod backend;
pub mod backup;
pub mod config;
pub mod error;
pub mod persistence;

pub use autosave::AutoSave;
pub use backend::{DataFolderBackend, LocalStore, StateBackend};
pub use backup::{backup_file_name, parse_backup, read_backup};
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use persistence::Persistence;
