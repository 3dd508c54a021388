//! # Dashboard
//!
//! ```text
//! ┌───────────────────────────────┐
//! │ My Workshop                   │
//! │ Income / Expense / Net        │
//! │ To collect / Customer advance │
//! │ Customers / Active orders     │
//! └───────────────────────────────┘
//! ```

use std::io::Write;

use vyapar_core::summary::dashboard;

use super::{write_json, Context};
use crate::error::CliResult;

pub fn run<W: Write>(ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    let state = ctx.store.state();
    let summary = dashboard(state);

    if ctx.json {
        return write_json(out, &summary);
    }

    writeln!(out, "{}", state.settings.shop_name)?;
    writeln!(out)?;
    writeln!(out, "Income:         {:>14}", summary.finances.income.to_string())?;
    writeln!(out, "Expense:        {:>14}", summary.finances.expense.to_string())?;
    writeln!(out, "Net:            {:>14}", summary.finances.net.to_string())?;
    writeln!(out)?;
    // receivables: customers owe the shop; payables: customers' money held
    writeln!(out, "To collect:     {:>14}", summary.customers.receivables.to_string())?;
    writeln!(out, "Advance held:   {:>14}", summary.customers.payables.to_string())?;
    writeln!(out)?;
    writeln!(out, "Customers:      {:>14}", summary.customer_count)?;
    writeln!(out, "Active orders:  {:>14}", summary.active_orders)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::args::{Command, CustomerCommand, FinanceCommand};
    use crate::commands::test_support::Harness;
    use vyapar_core::{FinanceKind, Money, TransactionKind};

    #[test]
    fn test_dashboard_figures() {
        let mut h = Harness::new();
        let id = h.run_for_id(Command::Customer(CustomerCommand::Add {
            name: "Ramesh".into(),
            mobile: String::new(),
        }));
        h.run(Command::Customer(CustomerCommand::Txn {
            id,
            kind: TransactionKind::Udhaar,
            amount: Money::from_rupees(250),
            date: None,
            note: String::new(),
        }))
        .unwrap();
        h.run(Command::Finance(FinanceCommand::Add {
            kind: FinanceKind::Income,
            amount: Money::from_paisa(50_050),
            date: None,
            category: None,
            note: String::new(),
        }))
        .unwrap();

        let out = h.run(Command::Dashboard).unwrap();
        assert!(out.starts_with("My Workshop"));
        assert!(out.contains("₹500.50"));
        assert!(out.contains("₹250.00"));

        h.json = true;
        let out = h.run(Command::Dashboard).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["finances"]["income"], 500.5);
        assert_eq!(summary["customers"]["receivables"], 250);
        assert_eq!(summary["customerCount"], 1);
        assert_eq!(summary["activeOrders"], 0);
    }
}
