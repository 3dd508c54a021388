//! Backup export / import.
//!
//! A backup is the pretty-printed `AppState` JSON. On import the three
//! collections must be present before the payload is decoded; `settings` is
//! optional and falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};
use vyapar_core::AppState;

use crate::error::{StorageError, StorageResult};

/// Collections every backup must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["customers", "finances", "orders"];

/// `backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("backup-{}.json", date.format("%Y-%m-%d"))
}

/// Writes `state` as `dir/backup-<date>.json` and returns the path.
pub fn write_backup(state: &AppState, dir: &Path, date: NaiveDate) -> StorageResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(backup_file_name(date));
    let payload = serde_json::to_string_pretty(state)?;
    fs::write(&path, payload)?;

    info!(
        path = ?path,
        customers = state.customers.len(),
        finances = state.finances.len(),
        orders = state.orders.len(),
        "Backup exported"
    );
    Ok(path)
}

/// Validates and decodes a backup payload.
pub fn parse_backup(text: &str) -> StorageResult<AppState> {
    let value: Value = serde_json::from_str(text)?;

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| value.get(key).map_or(true, Value::is_null))
        .collect();

    if !missing.is_empty() {
        warn!(?missing, "Rejected backup");
        return Err(StorageError::invalid_backup(missing));
    }

    Ok(serde_json::from_value(value)?)
}

pub fn read_backup(path: impl AsRef<Path>) -> StorageResult<AppState> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_backup(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vyapar_core::{
        Customer, FinanceEntry, FinanceKind, Money, OrderCustomer, OrderStatus, Transaction,
        TransactionKind, WorkOrder,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn populated() -> AppState {
        let mut ramesh = Customer::new("Ramesh", "9876543210").unwrap();
        ramesh.transactions.push(
            Transaction::new(day(), Money::from_paisa(1250), TransactionKind::Udhaar, "cement")
                .unwrap(),
        );
        let order = WorkOrder::new(
            day(),
            OrderCustomer::Linked(&ramesh),
            "Gate welding",
            OrderStatus::InProcess,
            Money::from_rupees(1000),
            Money::from_rupees(300),
        )
        .unwrap();

        AppState {
            customers: vec![ramesh],
            finances: vec![FinanceEntry::new(
                day(),
                Money::from_rupees(500),
                FinanceKind::Income,
                "sales",
            )
            .unwrap()],
            orders: vec![order],
            ..AppState::default()
        }
    }

    #[test]
    fn test_backup_file_name() {
        assert_eq!(backup_file_name(day()), "backup-2024-03-09.json");
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let state = populated();

        let path = write_backup(&state, dir.path(), day()).unwrap();
        assert_eq!(path.file_name().unwrap(), "backup-2024-03-09.json");

        assert_eq!(read_backup(&path).unwrap(), state);
    }

    #[test]
    fn test_missing_collections_rejected() {
        let err = parse_backup(r#"{"customers": [], "orders": null}"#).unwrap_err();
        match err {
            StorageError::InvalidBackup { missing } => {
                assert_eq!(missing, vec!["finances".to_string(), "orders".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            parse_backup("[1, 2, 3]"),
            Err(StorageError::InvalidBackup { .. })
        ));
    }

    #[test]
    fn test_settings_default_when_absent() {
        let state = parse_backup(r#"{"customers": [], "finances": [], "orders": []}"#).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(
            parse_backup("not json"),
            Err(StorageError::Serialization(_))
        ));
        // keys present but wrong shape
        assert!(matches!(
            parse_backup(r#"{"customers": 5, "finances": [], "orders": []}"#),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_oversized_amount_rejected() {
        let mut customer = Customer::new("Ramesh", "").unwrap();
        for _ in 0..2 {
            customer.transactions.push(
                Transaction::new(day(), Money::from_rupees(1), TransactionKind::Jama, "").unwrap(),
            );
        }
        let state = AppState {
            customers: vec![customer],
            ..AppState::default()
        };
        let mut raw = serde_json::to_value(&state).unwrap();

        let max_rupees = Money::MAX_PAISA / 100;
        for txn in raw["customers"][0]["transactions"].as_array_mut().unwrap() {
            txn["amount"] = serde_json::json!(max_rupees);
        }
        let imported = parse_backup(&raw.to_string()).unwrap();
        let dashboard = vyapar_core::summary::dashboard(&imported);
        assert_eq!(dashboard.customers.payables, Money::from_paisa(2 * max_rupees * 100));

        raw["customers"][0]["transactions"][0]["amount"] = serde_json::json!(50_000_000_000_000_000u64);
        assert!(matches!(
            parse_backup(&raw.to_string()),
            Err(StorageError::Serialization(_))
        ));
    }
}
