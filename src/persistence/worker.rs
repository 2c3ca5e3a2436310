//! Background storage I/O
//!
//! A single long-lived thread owns every read and write, taking commands
//! from a channel in the order they were requested. Saves therefore land on
//! disk in press order and the last one wins. Results come back over a
//! second channel and are drained on the UI thread, which is the only place
//! the store is touched.

use anyhow::Result;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

use super::{read_snapshot, save, KeyValueStore, PersistedSnapshot};

#[derive(Debug)]
pub enum PersistenceEvent {
    /// Startup read finished; `Ok(None)` means nothing to restore
    Loaded(Result<Option<PersistedSnapshot>>),
    Saved(Result<()>),
}

#[derive(Debug, Clone, Copy)]
enum PersistenceCommand {
    Load,
    Save(PersistedSnapshot),
}

pub struct PersistenceWorker {
    commands: Sender<PersistenceCommand>,
    events: Receiver<PersistenceEvent>,
}

impl PersistenceWorker {
    /// Spawn the storage thread. It exits once the worker is dropped.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            info!("Persistence worker started");
            run_commands(kv.as_ref(), command_rx, event_tx);
            debug!("Persistence worker stopped");
        });

        Self {
            commands: command_tx,
            events: event_rx,
        }
    }

    pub fn request_load(&self) {
        self.send(PersistenceCommand::Load);
    }

    /// Write `snapshot`, captured by the caller at the moment of the request
    pub fn request_save(&self, snapshot: PersistedSnapshot) {
        self.send(PersistenceCommand::Save(snapshot));
    }

    fn send(&self, command: PersistenceCommand) {
        if self.commands.send(command).is_err() {
            error!(?command, "Persistence worker is gone, dropping request");
        }
    }

    /// Next finished operation, if any. Never blocks.
    pub fn poll(&self) -> Option<PersistenceEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                error!("Persistence channel disconnected");
                None
            }
        }
    }
}

/// Handle commands one at a time until every sender is dropped
fn run_commands(
    kv: &dyn KeyValueStore,
    commands: Receiver<PersistenceCommand>,
    events: Sender<PersistenceEvent>,
) {
    for command in commands {
        let event = match command {
            PersistenceCommand::Load => {
                debug!("Loading saved shader inputs");
                PersistenceEvent::Loaded(read_snapshot(kv))
            }
            PersistenceCommand::Save(snapshot) => PersistenceEvent::Saved(save(kv, &snapshot)),
        };

        if events.send(event).is_err() {
            warn!("UI went away before storage operation completed");
            return;
        }
    }
}
