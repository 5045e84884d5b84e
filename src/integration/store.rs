// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration entry storage.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::{ConfigEntry, EntryId};

/// Durable storage for configuration entries.
///
/// Saving an entry whose id already exists replaces it.
pub trait ConfigStore: Send + Sync {
    /// Returns all stored entries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backing storage cannot be read.
    fn load(&self) -> Result<Vec<ConfigEntry>, ConfigError>;

    /// Inserts or replaces an entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backing storage cannot be written.
    fn save(&self, entry: &ConfigEntry) -> Result<(), ConfigError>;

    /// Removes an entry, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backing storage cannot be written.
    fn remove(&self, id: EntryId) -> Result<bool, ConfigError>;
}

fn upsert(entries: &mut Vec<ConfigEntry>, entry: &ConfigEntry) {
    match entries.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => *existing = entry.clone(),
        None => entries.push(entry.clone()),
    }
}

/// In-memory store, mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: Mutex<Vec<ConfigEntry>>,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(self.entries.lock().clone())
    }

    fn save(&self, entry: &ConfigEntry) -> Result<(), ConfigError> {
        upsert(&mut self.entries.lock(), entry);
        Ok(())
    }

    fn remove(&self, id: EntryId) -> Result<bool, ConfigError> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() != before)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntries {
    #[serde(default)]
    entries: Vec<ConfigEntry>,
}

/// Store backed by a pretty-printed JSON file.
///
/// A missing file reads as an empty store. Parent directories are created on
/// first write.
#[derive(Debug)]
pub struct JsonFileConfigStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileConfigStore {
    /// Creates a store reading and writing `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<StoredEntries, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, starting empty");
            return Ok(StoredEntries::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, stored: &StoredEntries) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(stored)?;
        // Replace atomically so a crash never leaves a truncated file.
        let tmp = self.tmp_path();
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "Saved configuration");
        Ok(())
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn load(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let _guard = self.lock.lock();
        Ok(self.read()?.entries)
    }

    fn save(&self, entry: &ConfigEntry) -> Result<(), ConfigError> {
        let _guard = self.lock.lock();
        let mut stored = self.read()?;
        upsert(&mut stored.entries, entry);
        self.write(&stored)
    }

    fn remove(&self, id: EntryId) -> Result<bool, ConfigError> {
        let _guard = self.lock.lock();
        let mut stored = self.read()?;
        let before = stored.entries.len();
        stored.entries.retain(|e| e.id != id);
        let removed = stored.entries.len() != before;
        if removed {
            self.write(&stored)?;
        }
        Ok(removed)
    }
}
