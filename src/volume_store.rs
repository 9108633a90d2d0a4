//! Durable volume storage.
//!
//! The volume survives across sessions under a fixed key. Muting also records
//! the pre-mute level so that unmuting (from the button or the `m` shortcut)
//! restores it, even in a later session.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage key of the current volume.
pub const VOLUME_KEY: &str = "video-player-volume";
/// Storage key of the last non-zero volume, restored on unmute.
pub const PREV_VOLUME_KEY: &str = "prevVolume";
/// Used when nothing usable is stored.
pub const DEFAULT_VOLUME: f64 = 0.8;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no data directory available on this platform")]
    NoDataDir,
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// String key/value storage with the semantics of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store, used in tests and when no data directory exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `key=value` lines in a single file, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => parse_entries(&content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    /// The store file inside the platform data directory.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("dev", "animatrix", "animatrix-player")
            .ok_or(StoreError::NoDataDir)?;
        fs::create_dir_all(dirs.data_dir())?;
        Self::open(dirs.data_dir().join("storage.txt"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let mut content = String::new();
        for (key, value) in &self.entries {
            content.push_str(key);
            content.push('=');
            content.push_str(value);
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }
}

fn parse_entries(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

/// The persisted volume plus its mute memory.
///
/// Store failures are logged and otherwise ignored; the in-memory value always
/// reflects the latest request.
pub struct PersistedVolume {
    store: Box<dyn KeyValueStore>,
    volume: f64,
    prev_volume: f64,
}

impl PersistedVolume {
    /// Read both values from `store`, falling back to `default_volume`.
    pub fn load(store: Box<dyn KeyValueStore>, default_volume: f64) -> Self {
        let volume = read_level(store.as_ref(), VOLUME_KEY).unwrap_or(default_volume.clamp(0.0, 1.0));
        let prev_volume = read_level(store.as_ref(), PREV_VOLUME_KEY)
            .filter(|v| *v > 0.0)
            .unwrap_or(DEFAULT_VOLUME);
        Self {
            store,
            volume,
            prev_volume,
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    /// Level restored by the next unmute.
    pub fn prev_volume(&self) -> f64 {
        self.prev_volume
    }

    /// Store a new volume, clamped to `[0, 1]`. Returns the stored value.
    pub fn set(&mut self, volume: f64) -> f64 {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            self.volume
        };
        self.volume = volume;
        self.write(VOLUME_KEY, volume);
        if volume > 0.0 {
            self.prev_volume = volume;
            self.write(PREV_VOLUME_KEY, volume);
        }
        volume
    }

    /// Mute, or restore the remembered level. Returns the new volume.
    pub fn toggle_mute(&mut self) -> f64 {
        if self.is_muted() {
            let restored = if self.prev_volume > 0.0 {
                self.prev_volume
            } else {
                DEFAULT_VOLUME
            };
            self.set(restored)
        } else {
            self.prev_volume = self.volume;
            self.write(PREV_VOLUME_KEY, self.volume);
            self.set(0.0)
        }
    }

    /// Hand the backing store back, e.g. to reload from it.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    fn write(&mut self, key: &str, value: f64) {
        if let Err(err) = self.store.set(key, &value.to_string()) {
            tracing::warn!("failed to persist {}: {}", key, err);
        }
    }
}

fn read_level(store: &dyn KeyValueStore, key: &str) -> Option<f64> {
    store
        .get(key)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_garbage_values_use_the_default() {
        let volume = PersistedVolume::load(Box::new(MemoryStore::new()), DEFAULT_VOLUME);
        assert_eq!(volume.volume(), 0.8);

        let mut store = MemoryStore::new();
        store.set(VOLUME_KEY, "loud").unwrap();
        let volume = PersistedVolume::load(Box::new(store), 0.5);
        assert_eq!(volume.volume(), 0.5);
    }

    #[test]
    fn stored_values_are_clamped() {
        let mut store = MemoryStore::new();
        store.set(VOLUME_KEY, "3.5").unwrap();
        let volume = PersistedVolume::load(Box::new(store), DEFAULT_VOLUME);
        assert_eq!(volume.volume(), 1.0);
    }

    #[test]
    fn volume_round_trips_through_the_store() {
        let mut volume = PersistedVolume::load(Box::new(MemoryStore::new()), DEFAULT_VOLUME);
        volume.set(0.37);

        let reloaded = PersistedVolume::load(volume.into_store(), DEFAULT_VOLUME);
        assert!((reloaded.volume() - 0.37).abs() < f64::EPSILON);
    }

    #[test]
    fn mute_remembers_the_previous_level() {
        let mut volume = PersistedVolume::load(Box::new(MemoryStore::new()), DEFAULT_VOLUME);
        volume.set(0.6);

        assert_eq!(volume.toggle_mute(), 0.0);
        assert!(volume.is_muted());
        assert_eq!(volume.prev_volume(), 0.6);

        // The remembered level survives a reload.
        let mut reloaded = PersistedVolume::load(volume.into_store(), DEFAULT_VOLUME);
        assert_eq!(reloaded.volume(), 0.0);
        assert_eq!(reloaded.toggle_mute(), 0.6);
    }

    #[test]
    fn unmute_without_memory_restores_the_default() {
        let mut store = MemoryStore::new();
        store.set(VOLUME_KEY, "0").unwrap();
        store.set(PREV_VOLUME_KEY, "0").unwrap();
        let mut volume = PersistedVolume::load(Box::new(store), DEFAULT_VOLUME);
        assert_eq!(volume.toggle_mute(), DEFAULT_VOLUME);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.txt");

        let mut store = FileStore::open(&path).unwrap();
        store.set(VOLUME_KEY, "0.25").unwrap();
        store.set(PREV_VOLUME_KEY, "0.5").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(VOLUME_KEY).as_deref(), Some("0.25"));
        assert_eq!(reopened.get(PREV_VOLUME_KEY).as_deref(), Some("0.5"));
        assert_eq!(reopened.get("missing"), None);
    }
}
