//! # Vyapar CLI Library
//!
//! Wires the store, persistence and autosave together and runs one command.
//!
//! ## Module Organization
//! ```text
//! vyapar_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── args.rs         ◄─── clap argument definitions
//! ├── commands/
//! │   ├── mod.rs      ◄─── Context + dispatch
//! │   ├── customer.rs ◄─── Khata commands
//! │   ├── finance.rs  ◄─── Income / expense commands
//! │   ├── order.rs    ◄─── Work order commands
//! │   ├── settings.rs ◄─── Profile + data folder
//! │   ├── backup.rs   ◄─── Export / import
//! │   └── dashboard.rs◄─── Overview
//! └── error.rs        ◄─── CliError for command failures
//! ```

pub mod args;
pub mod commands;
pub mod error;

use std::sync::Arc;

use anyhow::Context as _;
use chrono::Local;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vyapar_core::Store;
use vyapar_storage::{AutoSave, Persistence, StorageConfig};

use args::CliArgs;
use commands::Context;

/// Runs one command end to end.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Lifecycle                                 │
/// │                                                                         │
/// │  1. Load StorageConfig ─── storage.toml + VYAPAR_* env (+ --data-dir)  │
/// │  2. Build Persistence ──── local store (+ data folder if desktop)       │
/// │  3. load_state ─────────── default state if nothing stored              │
/// │  4. Store::new + subscribe AutoSave                                    │
/// │  5. Execute the command ── mutations queue snapshots for autosave      │
/// │  6. AutoSave::shutdown ─── wait until the last snapshot is written     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(path) => StorageConfig::load(Some(path.clone()))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StorageConfig::load_or_default(None),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let persistence = Arc::new(Persistence::from_config(&config));
    let mut store = Store::new(persistence.load_state());

    let autosave = AutoSave::spawn(Arc::clone(&persistence));
    store.subscribe(autosave.clone());

    let result = {
        let mut ctx = Context {
            store: &mut store,
            persistence: &persistence,
            today: Local::now().date_naive(),
            json: args.json,
        };
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        commands::execute(args.command, &mut ctx, &mut out)
    };

    autosave.shutdown().await;
    debug!("Autosave flushed");

    result.map_err(Into::into)
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays pipeable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vyapar_storage=trace` - Trace the storage crate only
/// - Default: warnings, plus info from the vyapar crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,vyapar=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
