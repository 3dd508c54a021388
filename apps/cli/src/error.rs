//! # CLI Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  command handler                                                        │
//! │       │                                                                 │
//! │       ├── ValidationError ("name is required") ──┐                     │
//! │       ├── CoreError ("Customer not found: …") ───┤                     │
//! │       ├── StorageError ("Not a valid backup…") ──┼──► CliError         │
//! │       └── io::Error (stdout closed) ─────────────┘      │              │
//! │                                                         ▼              │
//! │                                     main: "error: <message>", exit 1   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use vyapar_core::{CoreError, ValidationError};
use vyapar_storage::StorageError;

/// Error returned from a command.
///
/// ## Serialization
/// With `--json` a failure is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Customer not found: 3f2a…"
/// }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced customer/order/entry does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Import file rejected
    InvalidBackup,

    /// Reading or writing the store failed
    StorageError,

    /// Feature disabled in this configuration
    Unsupported,

    /// Anything else
    Internal,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Unsupported, message)
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound(id) => CliError::not_found("Customer", &id),
            CoreError::OrderNotFound(id) => CliError::not_found("Work order", &id),
            CoreError::FinanceEntryNotFound(id) => CliError::not_found("Finance entry", &id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidBackup { .. } => {
                CliError::new(ErrorCode::InvalidBackup, err.to_string())
            }
            StorageError::Serialization(e) => {
                CliError::new(ErrorCode::InvalidBackup, format!("Invalid data: {}", e))
            }
            StorageError::FolderNotFound(_) => CliError::validation(err.to_string()),
            other => {
                tracing::error!("Storage operation failed: {}", other);
                CliError::new(ErrorCode::StorageError, other.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Internal, format!("Output failed: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
