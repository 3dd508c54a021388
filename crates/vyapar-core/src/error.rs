//! # Error Types
//!
//! Domain-specific error types for vyapar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vyapar-core errors (this file)                                        │
//! │  ├── CoreError        - Lookups that a caller asked to be strict       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vyapar-storage errors (separate crate)                                │
//! │  └── StorageError     - Local store / data folder / backup failures    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on silent no-ops
//! Store mutations that reference an unknown id (`update_order` on a deleted
//! order, `add_transaction` for a missing customer) are NOT errors. They are
//! absorbed as no-ops. `CoreError::CustomerNotFound` / `OrderNotFound` exist
//! for front ends that look an entity up before acting on it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core ledger errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer cannot be found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Work order cannot be found.
    #[error("Work order not found: {0}")]
    OrderNotFound(String),

    /// Finance entry cannot be found.
    #[error("Finance entry not found: {0}")]
    FinanceEntryNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used by the entity constructors before anything reaches the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Amount must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., unparseable amount or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
