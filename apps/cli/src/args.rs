use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use vyapar_core::validation::{parse_amount, parse_date};
use vyapar_core::{FinanceKind, Money, OrderStatus, TransactionKind, ValidationError};

/// Shop bookkeeping: customer khata, finances and work orders
#[derive(Parser, Debug)]
#[command(name = "vyapar", version)]
#[command(about = "Shop bookkeeping: customer khata, finances and work orders", long_about = None)]
pub struct CliArgs {
    /// Path to storage.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides the local store directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Customer khata (udhaar / jama ledger)
    #[command(subcommand)]
    Customer(CustomerCommand),

    /// Shop income and expenses
    #[command(subcommand)]
    Finance(FinanceCommand),

    /// Work orders
    #[command(subcommand)]
    Order(OrderCommand),

    /// Shop profile and data folder
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Export or import a JSON backup
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Overview of money and open work
    Dashboard,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CustomerCommand {
    /// Add a customer
    Add {
        name: String,
        #[arg(long, default_value = "")]
        mobile: String,
    },

    /// List customers with their balances
    List {
        /// Match on name (any case) or mobile
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show one customer's ledger
    Show { id: String },

    /// Change a customer's name or mobile
    Rename {
        id: String,
        name: String,
        #[arg(long)]
        mobile: Option<String>,
    },

    /// Delete a customer and their ledger
    Delete { id: String },

    /// Record udhaar (credit given) or jama (payment received)
    Txn {
        id: String,
        #[arg(value_name = "udhaar|jama")]
        kind: TransactionKind,
        #[arg(value_parser = amount_arg)]
        amount: Money,
        /// Defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        note: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FinanceCommand {
    /// Record income or an expense
    Add {
        #[arg(value_name = "income|expense")]
        kind: FinanceKind,
        #[arg(value_parser = amount_arg)]
        amount: Money,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// List entries, newest date first
    List {
        #[arg(long)]
        kind: Option<FinanceKind>,
    },

    /// Delete an entry
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum OrderCommand {
    /// Book a work order
    #[command(group(ArgGroup::new("who").required(true).args(["customer", "walk_in"])))]
    Add {
        detail: String,
        #[arg(value_parser = amount_arg)]
        amount: Money,
        #[arg(long, default_value = "0", value_parser = advance_arg)]
        advance: Money,
        /// Id of a ledger customer; the advance is booked as jama
        #[arg(long)]
        customer: Option<String>,
        /// Name of a customer without a ledger account
        #[arg(long)]
        walk_in: Option<String>,
        #[arg(long, default_value = "pending")]
        status: OrderStatus,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List orders
    List {
        /// Only orders that are not completed
        #[arg(long)]
        active: bool,
    },

    /// Move an order to another status
    Status {
        id: String,
        #[arg(value_name = "pending|in-process|completed")]
        status: OrderStatus,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SettingsCommand {
    /// Print the shop profile
    Show,

    /// Update profile fields; omitted fields are kept
    Set {
        #[arg(long)]
        shop_name: Option<String>,
        #[arg(long)]
        owner_name: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },

    /// Show, choose or clear the data folder
    Folder {
        #[arg(conflicts_with = "clear")]
        path: Option<PathBuf>,
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BackupCommand {
    /// Write backup-<date>.json
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Replace all data with a backup file
    Import { file: PathBuf },
}

fn amount_arg(input: &str) -> Result<Money, ValidationError> {
    parse_amount("amount", input)
}

fn advance_arg(input: &str) -> Result<Money, ValidationError> {
    parse_amount("advance", input)
}

pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Command {
        CliArgs::try_parse_from(args).unwrap().command
    }

    #[rstest]
    #[case::udhaar(&["vyapar", "customer", "txn", "c1", "udhaar", "250"], TransactionKind::Udhaar, Money::from_rupees(250))]
    #[case::jama_decimal(&["vyapar", "customer", "txn", "c1", "JAMA", "12.50"], TransactionKind::Jama, Money::from_paisa(1250))]
    fn test_txn_parsing(
        #[case] args: &[&str],
        #[case] expected_kind: TransactionKind,
        #[case] expected_amount: Money,
    ) {
        match parse(args) {
            Command::Customer(CustomerCommand::Txn {
                id, kind, amount, date, ..
            }) => {
                assert_eq!(id, "c1");
                assert_eq!(kind, expected_kind);
                assert_eq!(amount, expected_amount);
                assert_eq!(date, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[rstest]
    #[case::defaults(&["vyapar", "order", "add", "Gate", "1000", "--walk-in", "Guest"], Money::zero(), OrderStatus::Pending)]
    #[case::linked(
        &["vyapar", "order", "add", "Gate", "1000", "--customer", "c1", "--advance", "300", "--status", "in-process"],
        Money::from_rupees(300),
        OrderStatus::InProcess
    )]
    fn test_order_add_parsing(
        #[case] args: &[&str],
        #[case] expected_advance: Money,
        #[case] expected_status: OrderStatus,
    ) {
        match parse(args) {
            Command::Order(OrderCommand::Add {
                amount,
                advance,
                status,
                ..
            }) => {
                assert_eq!(amount, Money::from_rupees(1000));
                assert_eq!(advance, expected_advance);
                assert_eq!(status, expected_status);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from(["vyapar", "dashboard", "--json", "--data-dir", "/tmp/v"])
            .unwrap();
        assert!(args.json);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/v")));
        assert_eq!(args.command, Command::Dashboard);
    }

    #[test]
    fn test_finance_date_parsing() {
        match parse(&["vyapar", "finance", "add", "expense", "80", "--date", "2024-02-29"]) {
            Command::Finance(FinanceCommand::Add { kind, date, .. }) => {
                assert_eq!(kind, FinanceKind::Expense);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[rstest]
    #[case::missing_command(&["vyapar"])]
    #[case::bad_kind(&["vyapar", "customer", "txn", "c1", "loan", "10"])]
    #[case::three_decimals(&["vyapar", "finance", "add", "income", "1.234"])]
    #[case::bad_date(&["vyapar", "finance", "add", "income", "1", "--date", "05/01/2024"])]
    #[case::negative_amount(&["vyapar", "finance", "add", "--", "income", "-5"])]
    #[case::negative_advance(&["vyapar", "order", "add", "Gate", "10", "--walk-in", "w", "--advance=-3"])]
    #[case::oversized_amount(&["vyapar", "customer", "txn", "c1", "jama", "900000000000000000"])]
    #[case::order_needs_customer(&["vyapar", "order", "add", "Gate", "1000"])]
    #[case::order_both_customers(&["vyapar", "order", "add", "Gate", "1", "--customer", "c", "--walk-in", "w"])]
    #[case::folder_path_and_clear(&["vyapar", "settings", "folder", "/tmp", "--clear"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
