use serde::{Deserialize, Serialize};

use super::ranking::{BestDealPolicy, SortMode};
use super::store::EntryStore;
use crate::util::persistence::{load_settings, save_settings, FileStorage, SlotStorage, StorageError};

/// Preferences kept next to the entry list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub sort_mode: SortMode,
    #[serde(default = "default_min_entries")]
    pub best_deal_min_entries: usize,
}

fn default_min_entries() -> usize {
    BestDealPolicy::default().min_entries
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::default(),
            best_deal_min_entries: default_min_entries(),
        }
    }
}

impl UserSettings {
    pub fn policy(&self) -> BestDealPolicy {
        BestDealPolicy {
            min_entries: self.best_deal_min_entries.max(1),
        }
    }
}

/// Everything the UI reads from, held in a single signal.
pub struct AppState {
    pub store: EntryStore,
    pub settings: UserSettings,
}

impl AppState {
    pub fn load(storage: Box<dyn SlotStorage>) -> Self {
        let settings = load_settings(storage.as_ref());
        let store = EntryStore::load(storage);
        Self { store, settings }
    }

    /// Opens the on-disk data directory.
    pub fn from_disk() -> Self {
        Self::load(Box::new(FileStorage::from_env()))
    }

    pub fn save_settings(&mut self) -> Result<(), StorageError> {
        save_settings(self.store.storage_mut(), &self.settings)
    }

    pub fn toggle_sort(&mut self) -> Result<(), StorageError> {
        self.settings.sort_mode = self.settings.sort_mode.toggled();
        self.save_settings()
    }
}
