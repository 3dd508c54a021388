//! # CLI Commands
//!
//! One module per command group. Every handler gets the [`Context`] and a
//! writer for stdout, so tests can run them against a temp store and read
//! back what was printed.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Command Modules                                 │
//! │                                                                         │
//! │  customer.rs  ── add, list, show, rename, delete, txn                  │
//! │  finance.rs   ── add, list, delete                                     │
//! │  order.rs     ── add, list, status                                     │
//! │  settings.rs  ── show, set, folder                                     │
//! │  backup.rs    ── export, import                                        │
//! │  dashboard.rs ── overview                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers only read and dispatch to the [`Store`]; saving happens in the
//! autosave observer the app subscribed at startup.

pub mod backup;
pub mod customer;
pub mod dashboard;
pub mod finance;
pub mod order;
pub mod settings;

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use vyapar_core::Store;
use vyapar_storage::Persistence;

use crate::args::Command;
use crate::error::{CliError, CliResult, ErrorCode};

/// Everything a command may touch.
pub struct Context<'a> {
    pub store: &'a mut Store,
    pub persistence: &'a Persistence,
    /// Date used when a command omits `--date`.
    pub today: NaiveDate,
    /// Print JSON instead of tables.
    pub json: bool,
}

pub fn execute<W: Write>(command: Command, ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    match command {
        Command::Customer(cmd) => customer::run(cmd, ctx, out),
        Command::Finance(cmd) => finance::run(cmd, ctx, out),
        Command::Order(cmd) => order::run(cmd, ctx, out),
        Command::Settings(cmd) => settings::run(cmd, ctx, out),
        Command::Backup(cmd) => backup::run(cmd, ctx, out),
        Command::Dashboard => dashboard::run(ctx, out),
    }
}

pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))?;
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Cuts `text` to `width` characters for table columns.
pub(crate) fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
