#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::app_state::UserSettings;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "BeerPriceCalculator";
const APP_NAME: &str = "BeerPriceCalculator";

/// Overrides the platform data directory, mostly for portable installs.
pub const DATA_DIR_ENV: &str = "BEER_CALC_DATA_DIR";

/// Slot holding the serialized entry list.
pub const ENTRIES_SLOT: &str = "savedBeers";
pub const SETTINGS_SLOT: &str = "settings";

/// A named-slot key/value store. A slot that was never written, or was
/// removed, reads back as `None`.
pub trait SlotStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, slot: &str, payload: &str) -> Result<(), StorageError>;
    fn remove(&mut self, slot: &str) -> Result<(), StorageError>;

    /// Human-readable location, shown on the settings page.
    fn describe(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage directory unavailable")]
    Unavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

/// One JSON file per slot under the application data directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: Option<PathBuf>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Resolves the data directory from `BEER_CALC_DATA_DIR`, falling back
    /// to the platform data dir. Without either, every call fails with
    /// `StorageError::Unavailable`.
    pub fn from_env() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
                    .map(|dirs| dirs.data_dir().to_path_buf())
            });
        if dir.is_none() {
            log::warn!("[storage] No data directory available; entries stay in memory");
        }
        Self { dir }
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        let dir = self.dir.as_ref().ok_or(StorageError::Unavailable)?;
        Ok(dir.join(format!("{slot}.json")))
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, payload)?;
        log::debug!("[storage] Wrote {} bytes to {}", payload.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn describe(&self) -> String {
        self.dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "unavailable (memory only)".to_string())
    }
}

/// Volatile slots. Can be switched into a failing mode to exercise the
/// memory-only fallback.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    failing: bool,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            slots: HashMap::new(),
            failing: true,
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "storage quota exceeded",
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
impl SlotStorage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<(), StorageError> {
        self.check()?;
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        self.check()?;
        self.slots.remove(slot);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Settings fall back to defaults when missing or unreadable.
pub fn load_settings(storage: &dyn SlotStorage) -> UserSettings {
    match storage.read(SETTINGS_SLOT) {
        Ok(Some(content)) => match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("[settings] Failed to parse stored settings: {err}");
                UserSettings::default()
            }
        },
        Ok(None) => UserSettings::default(),
        Err(err) => {
            log::warn!("[settings] Failed to read stored settings: {err}");
            UserSettings::default()
        }
    }
}

pub fn save_settings(
    storage: &mut dyn SlotStorage,
    settings: &UserSettings,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(settings)?;
    storage.write(SETTINGS_SLOT, &json)
}
