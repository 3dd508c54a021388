//! # vyapar-core: Pure Ledger Logic for Vyapar Flow
//!
//! This crate is the **heart** of Vyapar Flow. It holds the shop's data model,
//! the store that owns it, and the folds that turn it into balances. There is
//! no I/O in here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vyapar Flow Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (vyapar CLI / web / desktop)             │   │
//! │  │   Customers ── Finances ── Work Orders ── Settings ── Dashboard │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Store mutations / reads                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vyapar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │  summary  │  │   money   │  │   │
//! │  │   │ AppState  │  │ Mutation  │  │ balances  │  │  Money    │  │   │
//! │  │   │ Customer  │  │ Observer  │  │  totals   │  │ (paisa)   │  │   │
//! │  │   └───────────┘  └─────┬─────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────┼───────────────────────────────────────┘   │
//! │                            │ StateObserver::on_state_changed            │
//! │  ┌─────────────────────────▼───────────────────────────────────────┐   │
//! │  │                      vyapar-storage                             │   │
//! │  │        local store + data folder + backup export/import         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - AppState, Customer, Transaction, FinanceEntry, WorkOrder, ShopSettings
//! - [`money`] - Integer paisa with rupee-number serialization
//! - [`store`] - The state container and its mutations
//! - [`summary`] - Balances, totals and dashboard figures
//! - [`validation`] - Rules applied by the entity constructors
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vyapar_core::{Customer, Money, Store, Transaction, TransactionKind};
//!
//! let mut store = Store::default();
//! let ramesh = Customer::new("Ramesh", "").unwrap();
//! let id = ramesh.id.clone();
//! store.add_customer(ramesh);
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! store.add_transaction(&id, Transaction::new(date, Money::from_rupees(100), TransactionKind::Jama, "").unwrap());
//! store.add_transaction(&id, Transaction::new(date, Money::from_rupees(40), TransactionKind::Udhaar, "").unwrap());
//!
//! assert_eq!(store.customer(&id).unwrap().balance(), Money::from_rupees(60));
//! ```

pub mod error;
pub mod money;
pub mod store;
pub mod summary;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::{Mutation, StateObserver, Store};
pub use types::*;
