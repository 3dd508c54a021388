//! # Derived Aggregates
//!
//! Balances and totals computed from the stored collections on every read.
//! Nothing here is ever written back into [`AppState`], so a stored total can
//! never disagree with the entries it summarises.
//!
//! ```text
//! customers[].transactions ──► customer_balance ──┬──► customer_exposure
//!                                                 └──► overall_balance
//! finances[]               ──► finance_totals
//! orders[]                 ──► order_stats
//!                                   │
//!                      all of it ───┴──► dashboard(&AppState)
//! ```

use serde::Serialize;

use crate::money::Money;
use crate::types::{AppState, Customer, FinanceEntry, FinanceKind, OrderStatus, WorkOrder};

/// Balance of one customer: +JAMA, -UDHAAR.
#[inline]
pub fn customer_balance(customer: &Customer) -> Money {
    customer.balance()
}

/// Sum of every customer's balance.
pub fn overall_balance(customers: &[Customer]) -> Money {
    customers.iter().map(customer_balance).sum()
}

// =============================================================================
// Finances
// =============================================================================

/// Shop-wide income/expense position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceTotals {
    pub income: Money,
    pub expense: Money,
    /// income - expense
    pub net: Money,
}

pub fn finance_totals(entries: &[FinanceEntry]) -> FinanceTotals {
    let sum_of = |kind: FinanceKind| -> Money {
        entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.amount)
            .sum()
    };

    let income = sum_of(FinanceKind::Income);
    let expense = sum_of(FinanceKind::Expense);

    FinanceTotals {
        income,
        expense,
        net: income - expense,
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Receivables/payables split across all customers.
///
/// ```text
/// balance < 0  ──► customer owes the shop      ──► receivables += |balance|
/// balance >= 0 ──► shop holds customer's money ──► payables    += balance
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerExposure {
    pub receivables: Money,
    pub payables: Money,
}

pub fn customer_exposure(customers: &[Customer]) -> CustomerExposure {
    customers
        .iter()
        .map(customer_balance)
        .fold(CustomerExposure::default(), |mut acc, balance| {
            if balance.is_negative() {
                acc.receivables += balance.abs();
            } else {
                acc.payables += balance;
            }
            acc
        })
}

// =============================================================================
// Orders
// =============================================================================

/// Counts by status plus the total booked value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub in_process: usize,
    pub completed: usize,
    /// Not yet completed.
    pub active: usize,
    /// Sum of order amounts (all statuses).
    pub total_value: Money,
}

pub fn order_stats(orders: &[WorkOrder]) -> OrderStats {
    orders.iter().fold(OrderStats::default(), |mut stats, order| {
        stats.total += 1;
        match order.status {
            OrderStatus::Pending => stats.pending += 1,
            OrderStatus::InProcess => stats.in_process += 1,
            OrderStatus::Completed => stats.completed += 1,
        }
        if order.status.is_active() {
            stats.active += 1;
        }
        stats.total_value += order.amount;
        stats
    })
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the overview screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub finances: FinanceTotals,
    pub customers: CustomerExposure,
    pub customer_count: usize,
    pub active_orders: usize,
}

pub fn dashboard(state: &AppState) -> DashboardSummary {
    DashboardSummary {
        finances: finance_totals(&state.finances),
        customers: customer_exposure(&state.customers),
        customer_count: state.customers.len(),
        active_orders: order_stats(&state.orders).active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderCustomer, Transaction, TransactionKind};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn fin(kind: FinanceKind, rupees: i64) -> FinanceEntry {
        FinanceEntry::new(day(), Money::from_rupees(rupees), kind, "").unwrap()
    }

    fn customer_with(lines: &[(TransactionKind, i64)]) -> Customer {
        let mut c = Customer::new("C", "").unwrap();
        c.transactions = lines
            .iter()
            .map(|(kind, rupees)| {
                Transaction::new(day(), Money::from_rupees(*rupees), *kind, "").unwrap()
            })
            .collect();
        c
    }

    fn order(status: OrderStatus, rupees: i64) -> WorkOrder {
        WorkOrder::new(
            day(),
            OrderCustomer::WalkIn("Guest"),
            "",
            status,
            Money::from_rupees(rupees),
            Money::zero(),
        )
        .unwrap()
    }

    #[test]
    fn test_finance_totals() {
        let totals = finance_totals(&[fin(FinanceKind::Income, 500), fin(FinanceKind::Expense, 200)]);
        assert_eq!(totals.income, Money::from_rupees(500));
        assert_eq!(totals.expense, Money::from_rupees(200));
        assert_eq!(totals.net, Money::from_rupees(300));

        assert_eq!(finance_totals(&[]), FinanceTotals::default());
    }

    #[test]
    fn test_customer_balance() {
        let c = customer_with(&[(TransactionKind::Jama, 100), (TransactionKind::Udhaar, 40)]);
        assert_eq!(customer_balance(&c), Money::from_rupees(60));
    }

    #[test]
    fn test_balance_independent_of_order() {
        let a = customer_with(&[
            (TransactionKind::Udhaar, 10),
            (TransactionKind::Udhaar, 25),
            (TransactionKind::Jama, 5),
        ]);
        let b = customer_with(&[
            (TransactionKind::Jama, 5),
            (TransactionKind::Udhaar, 25),
            (TransactionKind::Udhaar, 10),
        ]);
        assert_eq!(customer_balance(&a), customer_balance(&b));
        assert_eq!(customer_balance(&a), Money::from_rupees(-30));
    }

    #[test]
    fn test_customer_exposure_partitions_by_sign() {
        let customers = vec![
            customer_with(&[(TransactionKind::Udhaar, 300)]),
            customer_with(&[(TransactionKind::Jama, 120)]),
            customer_with(&[(TransactionKind::Udhaar, 50), (TransactionKind::Jama, 10)]),
            customer_with(&[]),
        ];

        let exposure = customer_exposure(&customers);
        assert_eq!(exposure.receivables, Money::from_rupees(340));
        assert_eq!(exposure.payables, Money::from_rupees(120));
        assert_eq!(overall_balance(&customers), Money::from_rupees(-220));
    }

    #[test]
    fn test_order_stats() {
        let stats = order_stats(&[
            order(OrderStatus::Pending, 100),
            order(OrderStatus::InProcess, 200),
            order(OrderStatus::Completed, 300),
            order(OrderStatus::Pending, 50),
        ]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.in_process, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.total_value, Money::from_rupees(650));
    }

    #[test]
    fn test_dashboard() {
        let state = AppState {
            customers: vec![customer_with(&[(TransactionKind::Udhaar, 75)])],
            finances: vec![fin(FinanceKind::Income, 500), fin(FinanceKind::Expense, 200)],
            orders: vec![order(OrderStatus::Completed, 1), order(OrderStatus::Pending, 1)],
            ..AppState::default()
        };

        let summary = dashboard(&state);
        assert_eq!(summary.finances.net, Money::from_rupees(300));
        assert_eq!(summary.customers.receivables, Money::from_rupees(75));
        assert_eq!(summary.customer_count, 1);
        assert_eq!(summary.active_orders, 1);
    }
}
