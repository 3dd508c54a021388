//! # State Store
//!
//! Single owner of the [`AppState`] tree.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Mutation Flow                              │
//! │                                                                         │
//! │  Front end                                                              │
//! │     │  store.add_transaction(customer_id, txn)                          │
//! │     ▼                                                                   │
//! │  Mutation::AddTransaction ──► apply(&current) ──► next AppState         │
//! │     │                              (pure, no I/O)                       │
//! │     ▼                                                                   │
//! │  next == current? ── yes ──► done (nothing to persist)                  │
//! │     │ no                                                                │
//! │     ▼                                                                   │
//! │  self.state = Arc::new(next)        ◄── atomic swap, old Arc untouched  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  observers[i].on_state_changed(&snapshot)                               │
//! │     │                                                                   │
//! │     └──► AutoSave (vyapar-storage) queues the snapshot and returns      │
//! │          immediately; the write happens on a worker task                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The store is an explicit value owned by the application's composition
//! root and passed by `&mut` to whatever handles a user action. There is no
//! global instance.
//!
//! ## Unknown ids
//! Updates and deletes that match nothing leave the state as it was. They
//! are not reported as errors.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::types::{
    AppState, Customer, FinanceEntry, OrderStatus, ShopSettings, Transaction, TransactionKind,
    WorkOrder,
};

// =============================================================================
// Mutations
// =============================================================================

/// Every change the store knows how to make.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Append to `customers`.
    AddCustomer(Customer),
    /// Replace the customer with the same id.
    UpdateCustomer(Customer),
    /// Remove the customer with this id.
    DeleteCustomer(String),
    /// Prepend to a customer's transactions.
    AddTransaction {
        customer_id: String,
        transaction: Transaction,
    },
    /// Prepend to `finances`.
    AddFinanceEntry(FinanceEntry),
    /// Remove the finance entry with this id.
    DeleteFinanceEntry(String),
    /// Prepend to `orders`.
    AddOrder(WorkOrder),
    /// Replace the order with the same id.
    UpdateOrder(WorkOrder),
    /// Replace settings wholesale.
    UpdateSettings(ShopSettings),
    /// Replace the whole tree.
    ImportData(AppState),
}

impl Mutation {
    /// Computes the state that results from applying this mutation.
    ///
    /// Pure: `current` is never modified.
    pub fn apply(self, current: &AppState) -> AppState {
        match self {
            Mutation::AddCustomer(customer) => {
                let mut next = current.clone();
                next.customers.push(customer);
                next
            }

            Mutation::UpdateCustomer(customer) => AppState {
                customers: replace_by_id(&current.customers, customer, |c| &c.id),
                ..current.clone()
            },

            Mutation::DeleteCustomer(id) => AppState {
                customers: remove_by_id(&current.customers, &id, |c| &c.id),
                ..current.clone()
            },

            Mutation::AddTransaction {
                customer_id,
                transaction,
            } => AppState {
                customers: current
                    .customers
                    .iter()
                    .map(|c| {
                        if c.id == customer_id {
                            let mut transactions = Vec::with_capacity(c.transactions.len() + 1);
                            transactions.push(transaction.clone());
                            transactions.extend(c.transactions.iter().cloned());
                            Customer {
                                transactions,
                                ..c.clone()
                            }
                        } else {
                            c.clone()
                        }
                    })
                    .collect(),
                ..current.clone()
            },

            Mutation::AddFinanceEntry(entry) => AppState {
                finances: prepend(&current.finances, entry),
                ..current.clone()
            },

            Mutation::DeleteFinanceEntry(id) => AppState {
                finances: remove_by_id(&current.finances, &id, |f| &f.id),
                ..current.clone()
            },

            Mutation::AddOrder(order) => AppState {
                orders: prepend(&current.orders, order),
                ..current.clone()
            },

            Mutation::UpdateOrder(order) => AppState {
                orders: replace_by_id(&current.orders, order, |o| &o.id),
                ..current.clone()
            },

            Mutation::UpdateSettings(settings) => AppState {
                settings,
                ..current.clone()
            },

            Mutation::ImportData(state) => state,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddCustomer(_) => "add_customer",
            Mutation::UpdateCustomer(_) => "update_customer",
            Mutation::DeleteCustomer(_) => "delete_customer",
            Mutation::AddTransaction { .. } => "add_transaction",
            Mutation::AddFinanceEntry(_) => "add_finance_entry",
            Mutation::DeleteFinanceEntry(_) => "delete_finance_entry",
            Mutation::AddOrder(_) => "add_order",
            Mutation::UpdateOrder(_) => "update_order",
            Mutation::UpdateSettings(_) => "update_settings",
            Mutation::ImportData(_) => "import_data",
        }
    }
}

fn prepend<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(item);
    out.extend(items.iter().cloned());
    out
}

fn replace_by_id<T: Clone>(items: &[T], replacement: T, id: impl Fn(&T) -> &String) -> Vec<T> {
    items
        .iter()
        .map(|item| {
            if id(item) == id(&replacement) {
                replacement.clone()
            } else {
                item.clone()
            }
        })
        .collect()
}

fn remove_by_id<T: Clone>(items: &[T], target: &str, id: impl Fn(&T) -> &String) -> Vec<T> {
    items.iter().filter(|item| id(item) != target).cloned().collect()
}

// =============================================================================
// Observers
// =============================================================================

/// Receives every new state snapshot.
///
/// Implementations must return quickly; anything slow (disk, network)
/// belongs on another task.
pub trait StateObserver: Send + Sync {
    fn on_state_changed(&self, state: &Arc<AppState>);
}

// =============================================================================
// Store
// =============================================================================

/// Owner of the current [`AppState`].
pub struct Store {
    state: Arc<AppState>,
    observers: Vec<Arc<dyn StateObserver>>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("customers", &self.state.customers.len())
            .field("finances", &self.state.finances.len())
            .field("orders", &self.state.orders.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(AppState::default())
    }
}

impl Store {
    /// Creates a store around an already loaded state.
    pub fn new(initial: AppState) -> Self {
        Store {
            state: Arc::new(initial),
            observers: Vec::new(),
        }
    }

    /// Current state for reading.
    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shared handle to the current snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Registers an observer for all future changes.
    pub fn subscribe(&mut self, observer: Arc<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Applies a mutation and notifies observers if the state changed.
    ///
    /// Returns `true` when the state changed.
    pub fn dispatch(&mut self, mutation: Mutation) -> bool {
        let next = mutation.apply(&self.state);
        if next == *self.state {
            return false;
        }

        self.state = Arc::new(next);
        for observer in &self.observers {
            observer.on_state_changed(&self.state);
        }
        true
    }

    // =========================================================================
    // Mutation Shorthands
    // =========================================================================

    pub fn add_customer(&mut self, customer: Customer) {
        self.dispatch(Mutation::AddCustomer(customer));
    }

    pub fn update_customer(&mut self, customer: Customer) {
        self.dispatch(Mutation::UpdateCustomer(customer));
    }

    pub fn delete_customer(&mut self, id: &str) {
        self.dispatch(Mutation::DeleteCustomer(id.to_string()));
    }

    /// Prepends `transaction` to the customer's ledger. Silently ignored
    /// when no customer has `customer_id`.
    pub fn add_transaction(&mut self, customer_id: &str, transaction: Transaction) {
        self.dispatch(Mutation::AddTransaction {
            customer_id: customer_id.to_string(),
            transaction,
        });
    }

    pub fn add_finance_entry(&mut self, entry: FinanceEntry) {
        self.dispatch(Mutation::AddFinanceEntry(entry));
    }

    pub fn delete_finance_entry(&mut self, id: &str) {
        self.dispatch(Mutation::DeleteFinanceEntry(id.to_string()));
    }

    pub fn add_order(&mut self, order: WorkOrder) {
        self.dispatch(Mutation::AddOrder(order));
    }

    pub fn update_order(&mut self, order: WorkOrder) {
        self.dispatch(Mutation::UpdateOrder(order));
    }

    pub fn update_settings(&mut self, settings: ShopSettings) {
        self.dispatch(Mutation::UpdateSettings(settings));
    }

    /// Replaces the whole tree. The caller validates first.
    pub fn import_data(&mut self, state: AppState) {
        self.dispatch(Mutation::ImportData(state));
    }

    // =========================================================================
    // Workflows
    // =========================================================================

    /// Adds an order and, for a linked customer with an advance, books the
    /// advance as a JAMA line on their ledger.
    ///
    /// ## User Workflow
    /// ```text
    /// New order: "Gate welding", ₹1000, advance ₹300, customer Ramesh
    ///      │
    ///      ├──► orders:   [new order, ...]
    ///      │
    ///      └──► Ramesh:   [JAMA ₹300 "Advance for Order: Gate welding", ...]
    /// ```
    pub fn record_order(&mut self, order: WorkOrder) {
        let advance_line = (order.is_linked() && order.advance.is_positive()).then(|| {
            (
                order.customer_id.clone(),
                Transaction {
                    id: crate::types::new_id(),
                    date: order.date,
                    amount: order.advance,
                    kind: TransactionKind::Jama,
                    description: format!("Advance for Order: {}", order.detail),
                },
            )
        });

        self.add_order(order);

        if let Some((customer_id, transaction)) = advance_line {
            self.add_transaction(&customer_id, transaction);
        }
    }

    /// Changes only the status of an order. Returns `false` if the id is
    /// unknown.
    pub fn set_order_status(&mut self, order_id: &str, status: OrderStatus) -> bool {
        let Some(order) = self.order(order_id) else {
            return false;
        };

        let updated = WorkOrder {
            status,
            ..order.clone()
        };
        self.update_order(updated);
        true
    }

    /// Points the desktop data folder somewhere else (or clears it with
    /// `None`). All other settings are kept.
    pub fn set_data_folder(&mut self, path: Option<String>) {
        let settings = ShopSettings {
            data_folder_path: Some(path.unwrap_or_default()),
            ..self.state.settings.clone()
        };
        self.update_settings(settings);
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.state.customers.iter().find(|c| c.id == id)
    }

    pub fn order(&self, id: &str) -> Option<&WorkOrder> {
        self.state.orders.iter().find(|o| o.id == id)
    }

    /// Customers whose name contains `term` (case-insensitive) or whose
    /// mobile contains it. An empty term matches everyone.
    pub fn search_customers(&self, term: &str) -> Vec<&Customer> {
        let needle = term.trim().to_lowercase();
        self.state
            .customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle) || c.mobile.contains(term.trim()))
            .collect()
    }

    /// Finance entries, newest date first. Entries on the same date keep
    /// their stored order.
    pub fn finances_by_date(&self) -> Vec<&FinanceEntry> {
        let mut entries: Vec<&FinanceEntry> = self.state.finances.iter().collect();
        entries.sort_by_key(|e| Reverse::<NaiveDate>(e.date));
        entries
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
