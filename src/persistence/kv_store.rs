//! Key-value blob storage for the whole domain state.

use super::files::{atomic_write, read_file};
use super::seed;
use crate::domain::AppData;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key the serialized `AppData` is stored under
pub const APP_STATE_KEY: &str = "lifeos-app-state";

/// Minimal string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(self.path_for(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.path_for(key), value)
    }
}

/// In-memory store, handy for scripting and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the stored state, or the seed dataset when it is absent or unreadable.
/// A corrupt blob is left untouched until the next save overwrites it.
pub fn load_state(store: &dyn KeyValueStore, today: NaiveDate) -> AppData {
    let raw = match store.get(APP_STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!("no stored state, starting from seed data");
            return seed::initial_state(today);
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to read stored state, using seed data");
            return seed::initial_state(today);
        }
    };

    match serde_json::from_str::<AppData>(&raw) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(error = %err, "stored state is corrupt, using seed data");
            seed::initial_state(today)
        }
    }
}

/// Rewrite the stored blob
pub fn save_state(store: &mut dyn KeyValueStore, data: &AppData) -> Result<()> {
    let json = serde_json::to_string(data).context("Failed to serialize app state")?;
    store.set(APP_STATE_KEY, &json)?;
    tracing::debug!(bytes = json.len(), "state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActiveTimer, ItemRef};
    use crate::scheduling::DragPayload;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn test_missing_state_falls_back_to_seed() {
        let store = MemoryStore::default();
        assert_eq!(load_state(&store, today()), seed::initial_state(today()));
    }

    #[test]
    fn test_corrupt_state_falls_back_and_is_not_repaired() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());
        store.set(APP_STATE_KEY, "{not json").unwrap();

        assert_eq!(load_state(&store, today()), seed::initial_state(today()));
        assert_eq!(store.get(APP_STATE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_save_and_load_round_trip_through_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        let mut data = seed::initial_state(today());
        data.active_timer = Some(ActiveTimer {
            item: ItemRef::Subtask("s1".into()),
            start_time: Local.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            accumulated_ms: 90_000,
            is_paused: true,
        });
        save_state(&mut store, &data).unwrap();
        assert!(store.path_for(APP_STATE_KEY).exists());

        assert_eq!(load_state(&store, today()), data);
    }

    #[test]
    fn test_drag_slot_is_not_persisted() {
        let mut store = MemoryStore::default();
        let mut data = seed::initial_state(today());
        data.dragged_item = Some(DragPayload::existing_block(crate::domain::Pane::Planned, "sb1", 60));
        save_state(&mut store, &data).unwrap();

        let loaded = load_state(&store, today());
        assert_eq!(loaded.dragged_item, None);
        assert_eq!(loaded.scheduled_blocks, data.scheduled_blocks);
    }
}
