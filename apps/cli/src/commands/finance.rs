//! Shop income / expense commands.

use std::io::Write;

use serde::Serialize;
use tracing::debug;
use vyapar_core::summary::{finance_totals, FinanceTotals};
use vyapar_core::{CoreError, FinanceEntry};

use super::{clip, write_json, Context};
use crate::args::FinanceCommand;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FinanceListing<'a> {
    entries: Vec<&'a FinanceEntry>,
    totals: FinanceTotals,
}

pub fn run<W: Write>(cmd: FinanceCommand, ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    match cmd {
        FinanceCommand::Add {
            kind,
            amount,
            date,
            category,
            note,
        } => {
            let mut entry = FinanceEntry::new(date.unwrap_or(ctx.today), amount, kind, note)?;
            if let Some(category) = category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                entry.category = category.to_string();
            }

            let id = entry.id.clone();
            debug!(entry_id = %id, %kind, "Finance entry added");
            ctx.store.add_finance_entry(entry);
            writeln!(out, "{}", id)?;
        }

        FinanceCommand::List { kind } => {
            let entries: Vec<&FinanceEntry> = ctx
                .store
                .finances_by_date()
                .into_iter()
                .filter(|e| kind.map_or(true, |k| e.kind == k))
                .collect();
            let totals = finance_totals(&ctx.store.state().finances);

            if ctx.json {
                return write_json(out, &FinanceListing { entries, totals });
            }

            if entries.is_empty() {
                writeln!(out, "No finance entries.")?;
            } else {
                writeln!(
                    out,
                    "{:<36}  {:<10} {:<7} {:>12}  {:<12} {}",
                    "ID", "DATE", "TYPE", "AMOUNT", "CATEGORY", "DESCRIPTION"
                )?;
                for e in &entries {
                    writeln!(
                        out,
                        "{:<36}  {:<10} {:<7} {:>12}  {:<12} {}",
                        e.id,
                        e.date.to_string(),
                        e.kind.to_string(),
                        e.amount.to_string(),
                        clip(&e.category, 12),
                        e.description
                    )?;
                }
            }

            writeln!(
                out,
                "Income: {}  Expense: {}  Net: {}",
                totals.income, totals.expense, totals.net
            )?;
        }

        FinanceCommand::Delete { id } => {
            if !ctx.store.state().finances.iter().any(|e| e.id == id) {
                return Err(CoreError::FinanceEntryNotFound(id).into());
            }
            ctx.store.delete_finance_entry(&id);
            writeln!(out, "Deleted {}", id)?;
        }
    }
    Ok(())
}
