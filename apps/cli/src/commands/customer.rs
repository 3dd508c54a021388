//! # Customer Commands
//!
//! The khata: customers and their udhaar / jama lines.
//!
//! ## Balance Convention
//! ```text
//! JAMA   (payment received) ──► balance goes up
//! UDHAAR (credit given)     ──► balance goes down
//!
//! balance < 0 : customer owes the shop
//! balance > 0 : shop holds the customer's money
//! ```

use std::io::Write;

use serde::Serialize;
use tracing::debug;
use vyapar_core::summary::overall_balance;
use vyapar_core::validation::{validate_customer_name, validate_mobile};
use vyapar_core::{CoreError, Customer, Money, Transaction};

use super::{clip, write_json, Context};
use crate::args::CustomerCommand;
use crate::error::CliResult;

/// List row for `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRow<'a> {
    id: &'a str,
    name: &'a str,
    mobile: &'a str,
    balance: Money,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerDetail<'a> {
    #[serde(flatten)]
    customer: &'a Customer,
    balance: Money,
}

pub fn run<W: Write>(cmd: CustomerCommand, ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    match cmd {
        CustomerCommand::Add { name, mobile } => {
            let customer = Customer::new(&name, &mobile)?;
            let id = customer.id.clone();
            debug!(customer_id = %id, "Customer added");
            ctx.store.add_customer(customer);
            writeln!(out, "{}", id)?;
        }

        CustomerCommand::List { search } => {
            let (customers, total) = match search.as_deref() {
                Some(term) => {
                    let found = ctx.store.search_customers(term);
                    let total = found.iter().map(|c| c.balance()).sum::<Money>();
                    (found, total)
                }
                None => {
                    let all = &ctx.store.state().customers;
                    (all.iter().collect::<Vec<_>>(), overall_balance(all))
                }
            };
            list(&customers, total, ctx.json, out)?;
        }

        CustomerCommand::Show { id } => {
            let customer = lookup(ctx, &id)?;
            show(&customer, ctx.json, out)?;
        }

        CustomerCommand::Rename { id, name, mobile } => {
            let current = lookup(ctx, &id)?;
            let updated = Customer {
                name: validate_customer_name(&name)?,
                mobile: match mobile {
                    Some(m) => validate_mobile(&m)?,
                    None => current.mobile.clone(),
                },
                ..current
            };
            writeln!(out, "Updated {}", updated.name)?;
            ctx.store.update_customer(updated);
        }

        CustomerCommand::Delete { id } => {
            let customer = lookup(ctx, &id)?;
            ctx.store.delete_customer(&id);
            debug!(customer_id = %id, "Customer deleted");
            writeln!(
                out,
                "Deleted {} ({} ledger lines)",
                customer.name,
                customer.transactions.len()
            )?;
        }

        CustomerCommand::Txn {
            id,
            kind,
            amount,
            date,
            note,
        } => {
            lookup(ctx, &id)?;
            let transaction = Transaction::new(date.unwrap_or(ctx.today), amount, kind, note)?;
            ctx.store.add_transaction(&id, transaction);

            let balance = ctx.store.customer(&id).map(Customer::balance).unwrap_or_default();
            writeln!(out, "{} {} recorded. Balance: {}", kind, amount, balance)?;
        }
    }
    Ok(())
}

fn lookup(ctx: &Context<'_>, id: &str) -> Result<Customer, CoreError> {
    ctx.store
        .customer(id)
        .cloned()
        .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))
}

fn list<W: Write>(customers: &[&Customer], total: Money, json: bool, out: &mut W) -> CliResult<()> {
    if json {
        let rows: Vec<CustomerRow<'_>> = customers
            .iter()
            .map(|c| CustomerRow {
                id: &c.id,
                name: &c.name,
                mobile: &c.mobile,
                balance: c.balance(),
            })
            .collect();
        return write_json(out, &rows);
    }

    if customers.is_empty() {
        writeln!(out, "No customers found.")?;
        return Ok(());
    }

    writeln!(out, "{:<36}  {:<24} {:<14} {:>14}", "ID", "NAME", "MOBILE", "BALANCE")?;
    for c in customers {
        writeln!(
            out,
            "{:<36}  {:<24} {:<14} {:>14}",
            c.id,
            clip(&c.name, 24),
            clip(&c.mobile, 14),
            c.balance().to_string()
        )?;
    }

    writeln!(out, "Total: {}", total)?;
    Ok(())
}

fn show<W: Write>(customer: &Customer, json: bool, out: &mut W) -> CliResult<()> {
    if json {
        return write_json(
            out,
            &CustomerDetail {
                customer,
                balance: customer.balance(),
            },
        );
    }

    writeln!(out, "{}", customer.name)?;
    if !customer.mobile.is_empty() {
        writeln!(out, "Mobile:  {}", customer.mobile)?;
    }
    writeln!(out, "Balance: {}", customer.balance())?;

    if customer.transactions.is_empty() {
        writeln!(out, "No transactions yet.")?;
        return Ok(());
    }

    writeln!(out)?;
    for t in &customer.transactions {
        writeln!(
            out,
            "{}  {:<6} {:>12}  {}",
            t.date,
            t.kind,
            t.amount.to_string(),
            t.description
        )?;
    }
    Ok(())
}
