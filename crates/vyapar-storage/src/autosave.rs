//! # Background Autosave
//!
//! Saves every new state snapshot off the caller's path.
//!
//! ```text
//! Store::dispatch ──► AutoSave::on_state_changed ──► mpsc (unbounded)
//!                                                        │
//!                                          ┌─────────────▼─────────────┐
//!                                          │ worker task               │
//!                                          │  1. recv snapshot         │
//!                                          │  2. drain to newest       │
//!                                          │  3. spawn_blocking(save)  │
//!                                          └───────────────────────────┘
//! ```
//!
//! A store mutation only pays for a channel send. Bursts of mutations are
//! coalesced; only the newest snapshot is written.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use vyapar_core::{AppState, StateObserver};

use crate::persistence::Persistence;

type Snapshot = Arc<AppState>;

pub struct AutoSave {
    tx: Mutex<Option<mpsc::UnboundedSender<Snapshot>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for AutoSave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let running = self
            .tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false);
        f.debug_struct("AutoSave").field("running", &running).finish()
    }
}

impl AutoSave {
    /// Starts the worker. Must be called inside a tokio runtime.
    pub fn spawn(persistence: Arc<Persistence>) -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(Self::run(persistence, rx));

        Arc::new(AutoSave {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        })
    }

    async fn run(persistence: Arc<Persistence>, mut rx: mpsc::UnboundedReceiver<Snapshot>) {
        while let Some(mut latest) = rx.recv().await {
            let mut skipped = 0usize;
            while let Ok(newer) = rx.try_recv() {
                latest = newer;
                skipped += 1;
            }
            if skipped > 0 {
                debug!(skipped, "Coalesced queued snapshots");
            }

            let persistence = Arc::clone(&persistence);
            let saved = tokio::task::spawn_blocking(move || persistence.save_state(&latest)).await;
            if let Err(e) = saved {
                error!(error = %e, "Autosave task failed");
            }
        }

        info!("Autosave worker stopped");
    }

    /// Closes the queue and waits until everything queued is on disk.
    pub async fn shutdown(&self) {
        drop(self.tx.lock().unwrap_or_else(|e| e.into_inner()).take());

        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                error!(error = %e, "Autosave worker panicked");
            }
        }
    }
}

impl StateObserver for AutoSave {
    fn on_state_changed(&self, state: &Arc<AppState>) {
        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(tx) => {
                if tx.send(Arc::clone(state)).is_err() {
                    debug!("Autosave worker gone, snapshot dropped");
                }
            }
            None => debug!("Autosave stopped, snapshot dropped"),
        }
    }
}
