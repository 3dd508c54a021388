//! # Validation Module
//!
//! Input validation for entities created by a front end.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (form / CLI argument parsing)                      │
//! │  └── Type validation (amount parses, date parses)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity constructors (Customer::new, WorkOrder::new, ...)     │
//! │  └── THIS MODULE: business rules                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store mutations                                              │
//! │  └── NO validation. They accept whatever entity they are handed,       │
//! │      exactly like an imported backup.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest customer name accepted.
pub const MAX_NAME_LEN: usize = 100;

/// Longest mobile number accepted (free text, not format checked).
pub const MAX_MOBILE_LEN: usize = 20;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use vyapar_core::validation::validate_customer_name;
///
/// assert_eq!(validate_customer_name("  Ramesh ").unwrap(), "Ramesh");
/// assert!(validate_customer_name("   ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a mobile number. Empty is fine; no format is enforced.
pub fn validate_mobile(mobile: &str) -> ValidationResult<String> {
    let mobile = mobile.trim();

    if mobile.chars().count() > MAX_MOBILE_LEN {
        return Err(ValidationError::TooLong {
            field: "mobile".to_string(),
            max: MAX_MOBILE_LEN,
        });
    }

    Ok(mobile.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is zero or more.
///
/// ## Example
/// ```rust
/// use vyapar_core::money::Money;
/// use vyapar_core::validation::validate_amount;
///
/// assert!(validate_amount("amount", Money::zero()).is_ok());
/// assert!(validate_amount("advance", Money::from_paisa(-1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<Money> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

/// Parses and validates a user-entered amount in one step.
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    let amount: Money = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected a number like 500 or 12.50".to_string(),
    })?;
    validate_amount(field, amount)
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}
