//! # Work Order Commands
//!
//! ## Booking Flow
//! ```text
//! order add "Gate welding" 1000 --advance 300 --customer <id>
//!      │
//!      ├──► WorkOrder::new (linked to the ledger customer)
//!      │
//!      └──► Store::record_order
//!               ├──► orders:           [new order, ...]
//!               └──► customer ledger:  [JAMA ₹300 "Advance for Order: …", ...]
//!
//! order add "Chair repair" 400 --walk-in "Guest"
//!      └──► order only, no ledger line
//! ```

use std::io::Write;

use serde::Serialize;
use tracing::debug;
use vyapar_core::summary::{order_stats, OrderStats};
use vyapar_core::{CoreError, OrderCustomer, WorkOrder};

use super::{clip, write_json, Context};
use crate::args::OrderCommand;
use crate::error::{CliError, CliResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderListing<'a> {
    orders: Vec<&'a WorkOrder>,
    stats: OrderStats,
}

pub fn run<W: Write>(cmd: OrderCommand, ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    match cmd {
        OrderCommand::Add {
            detail,
            amount,
            advance,
            customer,
            walk_in,
            status,
            date,
        } => {
            let date = date.unwrap_or(ctx.today);
            let order = match (customer, walk_in) {
                (Some(id), _) => {
                    let linked = ctx
                        .store
                        .customer(&id)
                        .ok_or(CoreError::CustomerNotFound(id.clone()))?;
                    WorkOrder::new(
                        date,
                        OrderCustomer::Linked(linked),
                        detail,
                        status,
                        amount,
                        advance,
                    )?
                }
                (None, Some(name)) => WorkOrder::new(
                    date,
                    OrderCustomer::WalkIn(&name),
                    detail,
                    status,
                    amount,
                    advance,
                )?,
                (None, None) => {
                    return Err(CliError::validation(
                        "an order needs --customer or --walk-in",
                    ))
                }
            };

            let id = order.id.clone();
            let books_advance = order.is_linked() && order.advance.is_positive();
            let summary = format!("{} for {}", order.amount, order.customer_name);

            debug!(order_id = %id, linked = order.is_linked(), "Work order recorded");
            ctx.store.record_order(order);

            writeln!(out, "{}", id)?;
            if books_advance {
                writeln!(out, "Advance booked as jama. Order: {}", summary)?;
            }
        }

        OrderCommand::List { active } => {
            let state = ctx.store.state();
            let orders: Vec<&WorkOrder> = state
                .orders
                .iter()
                .filter(|o| !active || o.status.is_active())
                .collect();
            let stats = order_stats(&state.orders);

            if ctx.json {
                return write_json(out, &OrderListing { orders, stats });
            }

            if orders.is_empty() {
                writeln!(out, "No work orders.")?;
            } else {
                writeln!(
                    out,
                    "{:<36}  {:<10} {:<10} {:<18} {:<24} {:>12} {:>12}",
                    "ID", "DATE", "STATUS", "CUSTOMER", "DETAIL", "AMOUNT", "DUE"
                )?;
                for o in &orders {
                    writeln!(
                        out,
                        "{:<36}  {:<10} {:<10} {:<18} {:<24} {:>12} {:>12}",
                        o.id,
                        o.date.to_string(),
                        o.status.to_string(),
                        clip(&o.customer_name, 18),
                        clip(&o.detail, 24),
                        o.amount.to_string(),
                        o.remaining().to_string()
                    )?;
                }
            }

            writeln!(
                out,
                "{} orders: {} pending, {} in process, {} completed. Booked value {}",
                stats.total, stats.pending, stats.in_process, stats.completed, stats.total_value
            )?;
        }

        OrderCommand::Status { id, status } => {
            if !ctx.store.set_order_status(&id, status) {
                return Err(CoreError::OrderNotFound(id).into());
            }
            debug!(order_id = %id, %status, "Order status changed");
            writeln!(out, "{} is now {}", id, status)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::args::{Command, CustomerCommand, OrderCommand};
    use crate::commands::test_support::Harness;
    use crate::error::ErrorCode;
    use vyapar_core::{Money, OrderStatus, TransactionKind};

    fn add_customer(h: &mut Harness, name: &str) -> String {
        h.run_for_id(Command::Customer(CustomerCommand::Add {
            name: name.into(),
            mobile: String::new(),
        }))
    }

    fn add_order(h: &mut Harness, customer: Option<&str>, walk_in: Option<&str>, advance: i64) -> String {
        let out = h
            .run(Command::Order(OrderCommand::Add {
                detail: "Gate welding".into(),
                amount: Money::from_rupees(1000),
                advance: Money::from_rupees(advance),
                customer: customer.map(String::from),
                walk_in: walk_in.map(String::from),
                status: OrderStatus::Pending,
                date: None,
            }))
            .unwrap();
        out.lines().next().unwrap().to_string()
    }

    #[test]
    fn test_linked_order_books_advance() {
        let mut h = Harness::new();
        let customer_id = add_customer(&mut h, "Ramesh");
        let order_id = add_order(&mut h, Some(&customer_id), None, 300);

        let order = h.store.order(&order_id).unwrap();
        assert_eq!(order.customer_id, customer_id);
        assert_eq!(order.customer_name, "Ramesh");
        assert_eq!(order.remaining(), Money::from_rupees(700));

        let customer = h.store.customer(&customer_id).unwrap();
        assert_eq!(customer.transactions.len(), 1);
        let line = &customer.transactions[0];
        assert_eq!(line.kind, TransactionKind::Jama);
        assert_eq!(line.amount, Money::from_rupees(300));
        assert_eq!(line.description, "Advance for Order: Gate welding");
    }

    #[test]
    fn test_no_ledger_line_without_link_or_advance() {
        let mut h = Harness::new();
        let customer_id = add_customer(&mut h, "Ramesh");

        add_order(&mut h, None, Some("Guest"), 300);
        add_order(&mut h, Some(&customer_id), None, 0);

        assert_eq!(h.store.state().orders.len(), 2);
        assert!(h.store.customer(&customer_id).unwrap().transactions.is_empty());
    }

    #[test]
    fn test_unknown_customer_rejected() {
        let mut h = Harness::new();
        let err = h
            .run(Command::Order(OrderCommand::Add {
                detail: "x".into(),
                amount: Money::from_rupees(1),
                advance: Money::zero(),
                customer: Some("missing".into()),
                walk_in: None,
                status: OrderStatus::Pending,
                date: None,
            }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(h.store.state().orders.is_empty());
    }

    #[test]
    fn test_status_change_and_active_filter() {
        let mut h = Harness::new();
        let first = add_order(&mut h, None, Some("A"), 0);
        let second = add_order(&mut h, None, Some("B"), 0);

        h.run(Command::Order(OrderCommand::Status {
            id: first.clone(),
            status: OrderStatus::Completed,
        }))
        .unwrap();
        assert_eq!(h.store.order(&first).unwrap().status, OrderStatus::Completed);

        let out = h
            .run(Command::Order(OrderCommand::List { active: true }))
            .unwrap();
        assert!(out.contains(&second));
        assert!(!out.contains(&first));
        assert!(out.contains("2 orders: 1 pending, 0 in process, 1 completed"));

        let err = h
            .run(Command::Order(OrderCommand::Status {
                id: "missing".into(),
                status: OrderStatus::Pending,
            }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
