//! Backup export and import.
//!
//! Import replaces everything. The file is fully read and checked before the
//! store is touched, so a rejected file leaves the data as it was.

use std::io::Write;

use tracing::info;
use vyapar_storage::read_backup;

use super::Context;
use crate::args::BackupCommand;
use crate::error::CliResult;

pub fn run<W: Write>(cmd: BackupCommand, ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    match cmd {
        BackupCommand::Export { dir } => {
            let path = ctx.persistence.export_data(ctx.store.state(), &dir)?;
            writeln!(out, "{}", path.display())?;
        }

        BackupCommand::Import { file } => {
            let state = read_backup(&file)?;
            let counts = (state.customers.len(), state.finances.len(), state.orders.len());

            info!(file = ?file, "Importing backup");
            ctx.store.import_data(state);

            writeln!(
                out,
                "Imported {} customers, {} finance entries, {} work orders.",
                counts.0, counts.1, counts.2
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::args::{BackupCommand, Command, CustomerCommand};
    use crate::commands::test_support::Harness;
    use crate::error::ErrorCode;
    use std::path::PathBuf;
    use vyapar_core::AppState;

    fn export(h: &mut Harness) -> PathBuf {
        let dir = h.dir.path().join("exports");
        let out = h
            .run(Command::Backup(BackupCommand::Export { dir }))
            .unwrap();
        PathBuf::from(out.trim())
    }

    #[test]
    fn test_export_then_import_restores_state() {
        let mut h = Harness::new();
        h.run(Command::Customer(CustomerCommand::Add {
            name: "Ramesh".into(),
            mobile: String::new(),
        }))
        .unwrap();
        let before = h.store.state().clone();

        let path = export(&mut h);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("backup-") && name.ends_with(".json"));

        h.store.import_data(AppState::default());
        let out = h
            .run(Command::Backup(BackupCommand::Import { file: path }))
            .unwrap();
        assert!(out.contains("Imported 1 customers"));
        assert_eq!(*h.store.state(), before);
    }

    #[test]
    fn test_invalid_backup_leaves_state() {
        let mut h = Harness::new();
        h.run(Command::Customer(CustomerCommand::Add {
            name: "Keep".into(),
            mobile: String::new(),
        }))
        .unwrap();
        let before = h.store.state().clone();

        let file = h.dir.path().join("other.json");
        std::fs::write(&file, r#"{"customers": [], "orders": []}"#).unwrap();

        let err = h
            .run(Command::Backup(BackupCommand::Import { file }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBackup);
        assert!(err.message.contains("finances"));
        assert_eq!(*h.store.state(), before);
    }

    #[test]
    fn test_missing_file() {
        let mut h = Harness::new();
        let file = h.dir.path().join("nope.json");
        let err = h
            .run(Command::Backup(BackupCommand::Import { file }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
