//! # Domain Types
//!
//! The ledger data model. The whole tree serializes to the JSON layout used by
//! backups, so field names (camelCase) and enum strings (`UDHAAR`, `JAMA`,
//! `INCOME`, `EXPENSE`, `PENDING`, `IN_PROCESS`, `COMPLETED`) are a contract.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            AppState                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   customers[]   │   │   finances[]    │   │    orders[]     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name, mobile   │   │  INCOME/EXPENSE │   │  customerId ──┐ │       │
//! │  │  transactions[] │   │  amount         │   │  customerName │ │       │
//! │  │   UDHAAR/JAMA   │   │  category       │   │  amount       │ │       │
//! │  └────────▲────────┘   └─────────────────┘   │  advance      │ │       │
//! │           │                                  └───────────────┼─┘       │
//! │           └──────────────── (may dangle, "" = walk-in) ──────┘         │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  settings       │  shopName, ownerName, contactNumber, address,     │
//! │  │                 │  dataFolderPath                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `WorkOrder::customer_name` is frozen when the order is created, so the
//! order still reads correctly after the customer is renamed or deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_amount, validate_customer_name, validate_mobile, ValidationResult};

/// Category given to every new finance entry.
pub const DEFAULT_FINANCE_CATEGORY: &str = "General";

/// Generates a fresh entity id (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Customer Ledger
// =============================================================================

/// Direction of a customer ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Credit extended to the customer. Increases what they owe.
    Udhaar,
    /// Payment received from the customer. Decreases what they owe.
    Jama,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Udhaar => write!(f, "UDHAAR"),
            TransactionKind::Jama => write!(f, "JAMA"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "udhaar" | "udhar" | "credit" | "given" => Ok(TransactionKind::Udhaar),
            "jama" | "jma" | "payment" | "received" => Ok(TransactionKind::Jama),
            _ => Err(format!("Unknown transaction type: {} (use udhaar or jama)", s)),
        }
    }
}

/// One line in a customer's khata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(type = "number")]
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
}

impl Transaction {
    /// Creates a new ledger line with a fresh id.
    pub fn new(
        date: NaiveDate,
        amount: Money,
        kind: TransactionKind,
        description: impl Into<String>,
    ) -> ValidationResult<Self> {
        Ok(Transaction {
            id: new_id(),
            date,
            amount: validate_amount("amount", amount)?,
            kind,
            description: description.into().trim().to_string(),
        })
    }

    /// Effect of this line on the customer balance: +amount for JAMA,
    /// -amount for UDHAAR.
    #[inline]
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Jama => self.amount,
            TransactionKind::Udhaar => -self.amount,
        }
    }
}

/// A customer and their running ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub mobile: String,
    /// Newest first.
    pub transactions: Vec<Transaction>,
}

impl Customer {
    /// Creates a customer with a fresh id and an empty ledger.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::Customer;
    ///
    /// let c = Customer::new(" Ramesh ", "98765").unwrap();
    /// assert_eq!(c.name, "Ramesh");
    /// assert!(c.transactions.is_empty());
    /// ```
    pub fn new(name: &str, mobile: &str) -> ValidationResult<Self> {
        Ok(Customer {
            id: new_id(),
            name: validate_customer_name(name)?,
            mobile: validate_mobile(mobile)?,
            transactions: Vec::new(),
        })
    }

    /// Running balance.
    ///
    /// Positive: the customer has money with the shop.
    /// Negative: the customer owes the shop.
    pub fn balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }
}

// =============================================================================
// Shop Finances
// =============================================================================

/// Direction of a shop-wide finance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinanceKind {
    Income,
    Expense,
}

impl fmt::Display for FinanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinanceKind::Income => write!(f, "INCOME"),
            FinanceKind::Expense => write!(f, "EXPENSE"),
        }
    }
}

impl FromStr for FinanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Ok(FinanceKind::Income),
            "expense" | "out" => Ok(FinanceKind::Expense),
            _ => Err(format!("Unknown finance type: {} (use income or expense)", s)),
        }
    }
}

/// A shop-level income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinanceEntry {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(type = "number")]
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: FinanceKind,
    pub category: String,
    pub description: String,
}

impl FinanceEntry {
    /// Creates an entry with a fresh id in the `"General"` category.
    pub fn new(
        date: NaiveDate,
        amount: Money,
        kind: FinanceKind,
        description: impl Into<String>,
    ) -> ValidationResult<Self> {
        Ok(FinanceEntry {
            id: new_id(),
            date,
            amount: validate_amount("amount", amount)?,
            kind,
            category: DEFAULT_FINANCE_CATEGORY.to_string(),
            description: description.into().trim().to_string(),
        })
    }
}

// =============================================================================
// Work Orders
// =============================================================================

/// Progress of a work order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProcess,
    Completed,
}

impl OrderStatus {
    /// True for PENDING and IN_PROCESS.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::InProcess => write!(f, "IN_PROCESS"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "in_process" | "in_progress" | "process" => Ok(OrderStatus::InProcess),
            "completed" | "done" => Ok(OrderStatus::Completed),
            _ => Err(format!(
                "Unknown order status: {} (use pending, in-process or completed)",
                s
            )),
        }
    }
}

/// Who a new order is for.
#[derive(Debug, Clone, Copy)]
pub enum OrderCustomer<'a> {
    /// A customer in the ledger. The order links to their id.
    Linked(&'a Customer),
    /// A walk-in with no ledger account. The order stores only the name.
    WalkIn(&'a str),
}

/// A job for a customer with a total price and an advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Customer id, or empty for a walk-in.
    pub customer_id: String,
    /// Name at creation time (frozen).
    pub customer_name: String,
    pub detail: String,
    pub status: OrderStatus,
    /// Total order value.
    #[ts(type = "number")]
    pub amount: Money,
    /// Already received. Not bounded by `amount`.
    #[ts(type = "number")]
    pub advance: Money,
}

impl WorkOrder {
    /// Creates an order with a fresh id.
    pub fn new(
        date: NaiveDate,
        customer: OrderCustomer<'_>,
        detail: impl Into<String>,
        status: OrderStatus,
        amount: Money,
        advance: Money,
    ) -> ValidationResult<Self> {
        let (customer_id, customer_name) = match customer {
            OrderCustomer::Linked(c) => (c.id.clone(), c.name.clone()),
            OrderCustomer::WalkIn(name) => (String::new(), validate_customer_name(name)?),
        };

        Ok(WorkOrder {
            id: new_id(),
            date,
            customer_id,
            customer_name,
            detail: detail.into().trim().to_string(),
            status,
            amount: validate_amount("amount", amount)?,
            advance: validate_amount("advance", advance)?,
        })
    }

    /// Whether the order is tied to a ledger customer.
    #[inline]
    pub fn is_linked(&self) -> bool {
        !self.customer_id.is_empty()
    }

    /// Amount still to be collected. May be negative if overpaid.
    #[inline]
    pub fn remaining(&self) -> Money {
        self.amount - self.advance
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Shop profile plus the optional data folder used by the desktop build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopSettings {
    pub shop_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    /// Folder that receives a readable copy of the data on every save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_folder_path: Option<String>,
}

impl ShopSettings {
    /// The data folder, if one is set and non-blank.
    pub fn data_folder(&self) -> Option<&str> {
        self.data_folder_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            shop_name: "My Workshop".to_string(),
            owner_name: "Shop Owner".to_string(),
            contact_number: String::new(),
            address: String::new(),
            data_folder_path: Some(String::new()),
        }
    }
}

// =============================================================================
// Root Aggregate
// =============================================================================

/// Everything the app persists.
///
/// `settings` falls back to defaults when a payload omits it; the three
/// collections are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub customers: Vec<Customer>,
    pub finances: Vec<FinanceEntry>,
    pub orders: Vec<WorkOrder>,
    #[serde(default)]
    pub settings: ShopSettings,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_customer_balance_sign_convention() {
        let mut c = Customer::new("Ramesh", "").unwrap();
        c.transactions = vec![
            Transaction::new(day(1), Money::from_rupees(40), TransactionKind::Udhaar, "").unwrap(),
            Transaction::new(day(2), Money::from_rupees(100), TransactionKind::Jama, "").unwrap(),
        ];
        assert_eq!(c.balance(), Money::from_rupees(60));
    }

    #[test]
    fn test_work_order_remaining_not_clamped() {
        let order = WorkOrder::new(
            day(3),
            OrderCustomer::WalkIn("Guest"),
            "Gate welding",
            OrderStatus::Pending,
            Money::from_rupees(1000),
            Money::from_rupees(300),
        )
        .unwrap();
        assert_eq!(order.remaining(), Money::from_rupees(700));
        assert!(!order.is_linked());

        let overpaid = WorkOrder {
            advance: Money::from_rupees(1200),
            ..order
        };
        assert_eq!(overpaid.remaining(), Money::from_rupees(-200));
    }

    #[test]
    fn test_linked_order_snapshots_customer() {
        let c = Customer::new("Anita", "").unwrap();
        let order = WorkOrder::new(
            day(3),
            OrderCustomer::Linked(&c),
            "Stitching",
            OrderStatus::default(),
            Money::from_rupees(500),
            Money::zero(),
        )
        .unwrap();
        assert_eq!(order.customer_id, c.id);
        assert_eq!(order.customer_name, "Anita");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_constructors_reject_negative_amounts() {
        assert!(Transaction::new(day(1), Money::from_paisa(-1), TransactionKind::Jama, "").is_err());
        assert!(FinanceEntry::new(day(1), Money::from_paisa(-1), FinanceKind::Income, "").is_err());
        assert!(WorkOrder::new(
            day(1),
            OrderCustomer::WalkIn("X"),
            "",
            OrderStatus::Pending,
            Money::zero(),
            Money::from_paisa(-1),
        )
        .is_err());
    }

    #[test]
    fn test_finance_entry_default_category() {
        let entry = FinanceEntry::new(day(1), Money::from_rupees(5), FinanceKind::Expense, "tea").unwrap();
        assert_eq!(entry.category, "General");
    }

    #[test]
    fn test_wire_format_field_names_and_enums() {
        let order = WorkOrder {
            id: "o1".to_string(),
            date: day(9),
            customer_id: String::new(),
            customer_name: "Guest".to_string(),
            detail: "Frame".to_string(),
            status: OrderStatus::InProcess,
            amount: Money::from_rupees(1000),
            advance: Money::from_paisa(30050),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "o1",
                "date": "2024-05-09",
                "customerId": "",
                "customerName": "Guest",
                "detail": "Frame",
                "status": "IN_PROCESS",
                "amount": 1000,
                "advance": 300.5
            })
        );

        let txn = json!({
            "id": "t1", "date": "2024-05-01", "amount": 40,
            "type": "UDHAAR", "description": ""
        });
        let parsed: Transaction = serde_json::from_value(txn).unwrap();
        assert_eq!(parsed.kind, TransactionKind::Udhaar);
    }

    #[test]
    fn test_settings_default_and_missing_fields() {
        let settings: ShopSettings = serde_json::from_value(json!({ "shopName": "Kumar Tailors" })).unwrap();
        assert_eq!(settings.shop_name, "Kumar Tailors");
        assert_eq!(settings.owner_name, "Shop Owner");
        assert_eq!(settings.data_folder(), None);

        let cleared = ShopSettings {
            data_folder_path: None,
            ..ShopSettings::default()
        };
        let value = serde_json::to_value(&cleared).unwrap();
        assert!(value.get("dataFolderPath").is_none());
        assert_eq!(serde_json::from_value::<ShopSettings>(value).unwrap(), ShopSettings::default());

        let state: AppState =
            serde_json::from_value(json!({ "customers": [], "finances": [], "orders": [] })).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("udhaar".parse::<TransactionKind>().unwrap(), TransactionKind::Udhaar);
        assert_eq!("JAMA".parse::<TransactionKind>().unwrap(), TransactionKind::Jama);
        assert_eq!("in-process".parse::<OrderStatus>().unwrap(), OrderStatus::InProcess);
        assert_eq!("expense".parse::<FinanceKind>().unwrap(), FinanceKind::Expense);
        assert!("refund".parse::<FinanceKind>().is_err());
    }
}
