//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / toml errors                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module)                                            │
//! │       │                                                                 │
//! │       ├──► load_state / save_state: logged, never returned             │
//! │       │                                                                 │
//! │       └──► export / import / config: returned to the caller            │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            CliError (in app) ← shown to the user                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State payload could not be encoded or decoded.
    #[error("Invalid data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A backup file is missing one of the required collections.
    ///
    /// ## When This Occurs
    /// - File is valid JSON but not an export (e.g. some other app's data)
    /// - `customers`, `finances` or `orders` is absent or `null`
    #[error("Not a valid backup: missing {}", .missing.join(", "))]
    InvalidBackup { missing: Vec<String> },

    /// Chosen data folder does not exist or is not a directory.
    #[error("Data folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    /// storage.toml could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// storage.toml could not be written.
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration is internally inconsistent.
    #[error("Invalid storage config: {0}")]
    InvalidConfig(String),

    /// No platform data/config directory could be determined.
    #[error("No storage location available: {0}")]
    NoLocation(String),
}

impl StorageError {
    /// Creates an InvalidBackup error naming the absent keys.
    pub fn invalid_backup<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StorageError::InvalidBackup {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
