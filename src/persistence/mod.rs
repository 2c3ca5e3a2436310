//! Saving and restoring shader inputs
//!
//! A single JSON record holds `colors`, `flip` and `alpha`. Restoring never
//! overwrites the store wholesale: the snapshot is replayed as ordinary
//! actions so the store keeps its single-writer discipline.

pub mod storage;
pub mod worker;

pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use worker::{PersistenceEvent, PersistenceWorker};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::storage::RECORD_KEY;
use crate::store::{Action, Channel, ColorTable, Component, FlipFlags, State, Store};

/// Persisted subset of [`State`]; the selected channel is excluded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub colors: ColorTable,
    pub flip: FlipFlags,
    pub alpha: f32,
}

impl PersistedSnapshot {
    pub fn from_state(state: &State) -> Self {
        Self {
            colors: state.colors,
            flip: state.flip,
            alpha: state.alpha,
        }
    }

    /// Actions that reproduce this snapshot when dispatched in order:
    /// every color cell, then every flip flag as an absolute set, then alpha.
    pub fn replay_actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(13);
        for channel in Channel::ALL {
            for component in Component::ALL {
                actions.push(Action::UpdateColors {
                    channel,
                    component,
                    value: self.colors[channel.index()][component.index()],
                });
            }
        }
        for channel in Channel::ALL {
            actions.push(Action::SetFlip {
                channel,
                value: self.flip[channel.index()],
            });
        }
        actions.push(Action::UpdateAlpha { value: self.alpha });
        actions
    }
}

/// Parse a stored record. Anything that doesn't match the snapshot shape
/// counts as "nothing saved".
pub fn parse_snapshot(text: &str) -> Option<PersistedSnapshot> {
    match serde_json::from_str::<PersistedSnapshot>(text) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed saved shader inputs");
            None
        }
    }
}

/// Read the saved record without touching the store
pub fn read_snapshot(kv: &dyn KeyValueStore) -> Result<Option<PersistedSnapshot>> {
    let text = kv
        .get(RECORD_KEY)
        .with_context(|| format!("Failed to read '{RECORD_KEY}' from storage"))?;

    Ok(text.as_deref().and_then(parse_snapshot))
}

/// Replay a snapshot into the store
pub fn restore(store: &mut Store, snapshot: &PersistedSnapshot) {
    let actions = snapshot.replay_actions();
    info!(dispatches = actions.len(), "Restoring saved shader inputs");
    for action in actions {
        store.dispatch(action);
    }
}

/// Read the saved record and, if present, replay it into the store
pub fn load(kv: &dyn KeyValueStore, store: &mut Store) -> Result<Option<PersistedSnapshot>> {
    let snapshot = read_snapshot(kv)?;
    match &snapshot {
        Some(snapshot) => restore(store, snapshot),
        None => info!("No saved shader inputs to restore"),
    }
    Ok(snapshot)
}

/// Overwrite the saved record
pub fn save(kv: &dyn KeyValueStore, snapshot: &PersistedSnapshot) -> Result<()> {
    let text = serde_json::to_string(snapshot).context("Failed to serialize shader inputs")?;
    kv.set(RECORD_KEY, &text)
        .with_context(|| format!("Failed to write '{RECORD_KEY}' to storage"))?;

    info!(alpha = snapshot.alpha, flip = ?snapshot.flip, "Saved shader inputs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("disk on fire"))
        }

        fn set(&self, _key: &str, _text: &str) -> Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    fn custom_snapshot() -> PersistedSnapshot {
        PersistedSnapshot {
            colors: [[1.5, -2.25, 0.3], [0.1, 0.2, 0.9], [-3.0, 3.0, 0.0]],
            flip: [false, true, true],
            alpha: 0.72,
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let kv = MemoryStore::new();
        let snapshot = custom_snapshot();
        save(&kv, &snapshot).unwrap();

        let mut store = Store::new();
        store.dispatch(Action::UpdateSelectedColor { channel: Channel::Blue });
        let loaded = load(&kv, &mut store).unwrap();

        assert_eq!(loaded, Some(snapshot));
        let state = store.state();
        assert_eq!(state.colors, snapshot.colors);
        assert_eq!(state.flip, snapshot.flip);
        assert_eq!(state.alpha, snapshot.alpha);
        assert_eq!(state.selected, Channel::Blue);
    }

    #[test]
    fn test_saved_record_excludes_selected_color() {
        let kv = MemoryStore::new();
        let mut state = State::default();
        state.selected = Channel::Green;

        save(&kv, &PersistedSnapshot::from_state(&state)).unwrap();

        let text = kv.get(RECORD_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("colors"));
        assert!(object.contains_key("flip"));
        assert!(object.contains_key("alpha"));
    }

    #[test]
    fn test_load_absent_record_is_noop() {
        let kv = MemoryStore::new();
        let mut store = Store::new();

        assert_eq!(load(&kv, &mut store).unwrap(), None);
        assert_eq!(store.state(), State::default());
    }

    #[test]
    fn test_load_missing_alpha_is_noop() {
        let kv = MemoryStore::new();
        kv.set(
            RECORD_KEY,
            r#"{"colors":[[1,1,1],[1,1,1],[1,1,1]],"flip":[false,false,false]}"#,
        )
        .unwrap();

        let mut store = Store::new();
        let dispatches = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&dispatches);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert_eq!(load(&kv, &mut store).unwrap(), None);
        assert_eq!(store.state(), State::default());
        assert_eq!(*dispatches.borrow(), 0);
    }

    #[test]
    fn test_malformed_records_read_as_none() {
        let records = [
            "",
            "not json",
            "{}",
            r#"{"colors":[[1,1],[1,1,1],[1,1,1]],"flip":[true,true,true],"alpha":1}"#,
            r#"{"colors":[[1,1,1],[1,1,1]],"flip":[true,true,true],"alpha":1}"#,
            r#"{"colors":[[1,1,1],[1,1,1],[1,1,1]],"flip":[true,true],"alpha":1}"#,
            r#"{"colors":[[1,1,1],[1,1,1],[1,1,1]],"flip":[1,0,0],"alpha":1}"#,
            r#"{"colors":[[1,1,1],[1,1,1],[1,1,1]],"flip":[true,true,true],"alpha":null}"#,
        ];

        for record in records {
            assert_eq!(parse_snapshot(record), None, "record {record:?} should be rejected");
        }
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let snapshot = parse_snapshot(
            r#"{"colors":[[1,2,3],[4,5,6],[7,8,9]],"flip":[true,false,true],"alpha":0.9,"selectedColor":2}"#,
        )
        .unwrap();

        assert_eq!(snapshot.colors[2], [7.0, 8.0, 9.0]);
        assert_eq!(snapshot.flip, [true, false, true]);
        assert_eq!(snapshot.alpha, 0.9);
    }

    #[test]
    fn test_double_precision_record_narrows_to_nearest_f32() {
        let kv = MemoryStore::new();
        kv.set(
            RECORD_KEY,
            r#"{"colors":[[1.23456789012345,0,0],[0,0,0],[0,0,0]],"flip":[false,false,false],"alpha":0.7123456789012}"#,
        )
        .unwrap();

        let loaded = read_snapshot(&kv).unwrap().unwrap();
        assert_eq!(loaded.colors[0][0], 1.23456789012345_f64 as f32);
        assert_eq!(loaded.alpha, 0.7123456789012_f64 as f32);

        // Re-saving the narrowed values is stable
        save(&kv, &loaded).unwrap();
        assert_eq!(read_snapshot(&kv).unwrap(), Some(loaded));
    }

    #[test]
    fn test_restore_replays_thirteen_actions() {
        let mut store = Store::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state: &State| sink.borrow_mut().push(*state));

        restore(&mut store, &custom_snapshot());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 13);
        // alpha is the last field replayed
        assert_eq!(seen[11].alpha, 0.85);
        assert_eq!(seen[12].alpha, 0.72);
    }

    #[test]
    fn test_restore_sets_flip_instead_of_toggling() {
        let snapshot = PersistedSnapshot {
            flip: [true, true, true],
            ..PersistedSnapshot::from_state(&State::default())
        };

        let mut store = Store::new();
        restore(&mut store, &snapshot);
        restore(&mut store, &snapshot);

        assert_eq!(store.state().flip, [true, true, true]);
    }

    #[test]
    fn test_storage_failures_propagate() {
        let mut store = Store::new();

        assert!(load(&BrokenStore, &mut store).is_err());
        assert!(save(&BrokenStore, &custom_snapshot()).is_err());
        assert_eq!(store.state(), State::default());
    }
}
