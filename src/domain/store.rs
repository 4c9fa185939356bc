//! The entry list and its durable mirror.

use std::collections::HashSet;

use crate::util::{
    now_millis,
    persistence::{SlotStorage, StorageError, ENTRIES_SLOT},
};

use super::entry::{Entry, EntryCandidate, EntryError, EntryId};

/// Ids are epoch milliseconds; anything above `i64::MAX` cannot have come
/// from the clock.
const MAX_ENTRY_ID: EntryId = i64::MAX as EntryId;

/// Whether the last storage operation reached durable storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageStatus {
    Persisted,
    MemoryOnly { reason: String },
}

/// Sole owner of the recorded entries. Every mutation writes the whole list
/// back to the `savedBeers` slot before returning; an empty list removes the
/// slot instead of writing `[]`. Storage failures never reach the caller:
/// the list keeps working in memory and the failure is logged and queued as
/// a warning for the UI.
pub struct EntryStore {
    entries: Vec<Entry>,
    storage: Box<dyn SlotStorage>,
    status: StorageStatus,
    pending_warning: Option<String>,
    last_id: EntryId,
    clock: fn() -> i64,
}

impl EntryStore {
    pub fn load(storage: Box<dyn SlotStorage>) -> Self {
        Self::load_with_clock(storage, now_millis)
    }

    pub fn load_with_clock(storage: Box<dyn SlotStorage>, clock: fn() -> i64) -> Self {
        let mut store = Self {
            entries: Vec::new(),
            storage,
            status: StorageStatus::Persisted,
            pending_warning: None,
            last_id: 0,
            clock,
        };

        match read_entries(store.storage.as_ref()) {
            Ok(entries) => {
                log::info!("[store] Loaded {} saved entries", entries.len());
                let repaired = store.adopt(entries);
                if repaired > 0 {
                    store.persist();
                }
            }
            Err(err) => store.degrade("load saved entries", &err),
        }

        store
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self) -> &StorageStatus {
        &self.status
    }

    /// Returns the most recent storage failure once, for a one-shot toast.
    pub fn take_warning(&mut self) -> Option<String> {
        self.pending_warning.take()
    }

    pub fn storage(&self) -> &dyn SlotStorage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn SlotStorage {
        self.storage.as_mut()
    }

    /// Appends a new entry. Invalid candidates leave the list untouched.
    pub fn add(&mut self, candidate: EntryCandidate) -> Result<&Entry, EntryError> {
        candidate.validate()?;

        let added_at = (self.clock)();
        let id = self.next_id(added_at);
        let entry = Entry::create(id, candidate, added_at)?;
        log::info!(
            "[store] Added {} ml at {:.2} ({:.5}/ml)",
            entry.size_ml(),
            entry.price(),
            entry.unit_price()
        );
        self.entries.push(entry);
        self.persist();

        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Removes the entry with `id`. Returns `false`, without touching
    /// storage, when no such entry exists.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        if self.entries.len() == before {
            return false;
        }
        log::info!("[store] Removed entry {id}");
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        log::info!("[store] Cleared all entries");
        self.persist();
    }

    /// Takes over a loaded list. Entries whose id repeats an earlier one or
    /// is out of range get a fresh id. Returns how many were renumbered.
    fn adopt(&mut self, entries: Vec<Entry>) -> usize {
        self.last_id = entries
            .iter()
            .map(Entry::id)
            .filter(|id| *id <= MAX_ENTRY_ID)
            .max()
            .unwrap_or(0);

        let mut seen = HashSet::with_capacity(entries.len());
        let mut repaired = 0;
        self.entries = Vec::with_capacity(entries.len());
        for entry in entries {
            let old_id = entry.id();
            if old_id <= MAX_ENTRY_ID && seen.insert(old_id) {
                self.entries.push(entry);
                continue;
            }
            let id = self.next_id(0);
            seen.insert(id);
            log::warn!("[store] Reassigned entry id {old_id} to {id}");
            self.entries.push(entry.with_id(id));
            repaired += 1;
        }
        repaired
    }

    /// Wall-clock milliseconds, bumped past the previous id so rapid adds
    /// within the same millisecond still get distinct ids.
    fn next_id(&mut self, now: i64) -> EntryId {
        let candidate = u64::try_from(now).unwrap_or(0);
        let id = candidate.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }

    fn persist(&mut self) {
        match write_entries(self.storage.as_mut(), &self.entries) {
            Ok(()) => self.status = StorageStatus::Persisted,
            Err(err) => self.degrade("save entries", &err),
        }
    }

    fn degrade(&mut self, action: &str, err: &StorageError) {
        log::warn!("[store] Failed to {action}: {err}; continuing in memory");
        let reason = format!("Could not {action}: {err}");
        self.status = StorageStatus::MemoryOnly {
            reason: reason.clone(),
        };
        self.pending_warning = Some(reason);
    }
}

fn read_entries(storage: &dyn SlotStorage) -> Result<Vec<Entry>, StorageError> {
    match storage.read(ENTRIES_SLOT)? {
        Some(content) => Ok(serde_json::from_str(&content)?),
        None => Ok(Vec::new()),
    }
}

fn write_entries(storage: &mut dyn SlotStorage, entries: &[Entry]) -> Result<(), StorageError> {
    if entries.is_empty() {
        return storage.remove(ENTRIES_SLOT);
    }
    let json = serde_json::to_string(entries)?;
    storage.write(ENTRIES_SLOT, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ranking::{best_deal, BestDealPolicy};
    use crate::util::persistence::{FileStorage, MemoryStorage};

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    fn memory_store() -> EntryStore {
        EntryStore::load_with_clock(Box::new(MemoryStorage::new()), fixed_clock)
    }

    fn stored_payload(store: &EntryStore) -> Option<String> {
        store.storage().read(ENTRIES_SLOT).unwrap()
    }

    #[test]
    fn add_valid_candidate_appends_one_entry() {
        let mut store = memory_store();
        let entry = store.add(EntryCandidate::new(350, 5.0, "")).unwrap().clone();

        assert_eq!(store.len(), 1);
        assert!((entry.unit_price() - 5.0 / 350.0).abs() < 1e-9);
        assert_eq!(entry.added_at(), fixed_clock());
        assert!(stored_payload(&store).is_some());
    }

    #[test]
    fn add_invalid_candidate_changes_nothing() {
        let mut store = memory_store();
        store.add(EntryCandidate::new(600, 6.0, "")).unwrap();
        let before = store.entries().to_vec();

        assert_eq!(
            store.add(EntryCandidate::new(0, 3.0, "")).unwrap_err(),
            EntryError::ZeroSize
        );
        assert_eq!(
            store.add(EntryCandidate::new(350, f64::NAN, "")).unwrap_err(),
            EntryError::InvalidPrice
        );
        assert_eq!(
            store.add(EntryCandidate::new(350, -1.0, "")).unwrap_err(),
            EntryError::InvalidPrice
        );
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn rapid_adds_get_distinct_increasing_ids() {
        let mut store = memory_store();
        let ids: Vec<_> = (0..5)
            .map(|_| store.add(EntryCandidate::new(350, 4.0, "")).unwrap().id())
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids[0], fixed_clock() as u64);
    }

    #[test]
    fn remove_twice_is_idempotent() {
        let mut store = memory_store();
        let first = store.add(EntryCandidate::new(350, 5.0, "")).unwrap().id();
        store.add(EntryCandidate::new(1000, 12.0, "")).unwrap();

        assert!(store.remove(first));
        let after_first = store.entries().to_vec();
        assert!(!store.remove(first));
        assert_eq!(store.entries(), after_first.as_slice());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removing_last_entry_deletes_slot() {
        let mut store = memory_store();
        let id = store.add(EntryCandidate::new(350, 5.0, "")).unwrap().id();
        assert!(store.remove(id));
        assert_eq!(stored_payload(&store), None);
    }

    #[test]
    fn clear_empties_list_and_slot() {
        let mut store = memory_store();
        store.add(EntryCandidate::new(350, 5.0, "")).unwrap();
        store.add(EntryCandidate::new(1000, 12.0, "")).unwrap();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(stored_payload(&store), None);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn persisted_list_reloads_equal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            EntryStore::load_with_clock(Box::new(FileStorage::new(dir.path())), fixed_clock);
        store.add(EntryCandidate::new(350, 5.0, "Heineken")).unwrap();
        store.add(EntryCandidate::new(1000, 12.0, "")).unwrap();
        store.add(EntryCandidate::new(473, 3.99, "Colorado")).unwrap();
        let saved = store.entries().to_vec();

        let reloaded = EntryStore::load(Box::new(FileStorage::new(dir.path())));
        assert_eq!(reloaded.entries(), saved.as_slice());
        assert_eq!(reloaded.status(), &StorageStatus::Persisted);
    }

    #[test]
    fn ids_continue_after_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            EntryStore::load_with_clock(Box::new(FileStorage::new(dir.path())), fixed_clock);
        let first = store.add(EntryCandidate::new(350, 5.0, "")).unwrap().id();

        let mut reloaded =
            EntryStore::load_with_clock(Box::new(FileStorage::new(dir.path())), fixed_clock);
        let second = reloaded.add(EntryCandidate::new(350, 5.0, "")).unwrap().id();
        assert!(second > first);
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.write(ENTRIES_SLOT, "{not valid").unwrap();

        let mut store = EntryStore::load(Box::new(storage));
        assert!(store.is_empty());
        assert!(matches!(store.status(), StorageStatus::MemoryOnly { .. }));
        assert!(store.take_warning().is_some());
        assert!(store.take_warning().is_none());
    }

    #[test]
    fn payload_with_invalid_entry_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                ENTRIES_SLOT,
                r#"[{"id":1,"sizeMl":350,"price":5,"unitPrice":0.0142,"brand":"","addedAt":1},
                    {"id":2,"sizeMl":0,"price":5,"unitPrice":0,"brand":"","addedAt":2}]"#,
            )
            .unwrap();

        let store = EntryStore::load(Box::new(storage));
        assert!(store.is_empty());
    }

    #[test]
    fn legacy_payload_loads() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                ENTRIES_SLOT,
                r#"[{"id":1700000000000,"size":350,"price":5,"pricePerMl":0.014285714285714285,"brand":"Skol","addedAt":1700000000000}]"#,
            )
            .unwrap();

        let store = EntryStore::load(Box::new(storage));
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].brand(), Some("Skol"));
    }

    #[test]
    fn failing_storage_keeps_working_in_memory() {
        let mut store = EntryStore::load_with_clock(Box::new(MemoryStorage::failing()), fixed_clock);
        assert!(store.take_warning().is_some());

        store.add(EntryCandidate::new(350, 5.0, "")).unwrap();
        store.add(EntryCandidate::new(1000, 12.0, "")).unwrap();
        assert_eq!(store.len(), 2);
        assert!(matches!(store.status(), StorageStatus::MemoryOnly { .. }));
        assert!(store.take_warning().is_some());

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn larger_can_wins_best_deal() {
        let mut store = memory_store();
        let small = store.add(EntryCandidate::new(350, 5.00, "")).unwrap().clone();
        let large = store.add(EntryCandidate::new(1000, 12.00, "")).unwrap().clone();

        assert!((small.unit_price() - 0.01429).abs() < 1e-5);
        assert!((large.unit_price() - 0.012).abs() < 1e-9);
        let best = best_deal(store.entries(), BestDealPolicy::default()).unwrap();
        assert_eq!(best.id(), large.id());
    }

    #[test]
    fn equal_unit_prices_favor_first_added() {
        let mut store = memory_store();
        let first = store.add(EntryCandidate::new(250, 2.125, "")).unwrap().id();
        store.add(EntryCandidate::new(500, 4.25, "")).unwrap();

        let best = best_deal(store.entries(), BestDealPolicy::default()).unwrap();
        assert_eq!(best.id(), first);
    }

    #[test]
    fn stored_unit_price_cannot_fake_best_deal() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                ENTRIES_SLOT,
                r#"[{"id":1,"sizeMl":350,"price":5,"unitPrice":-3.0,"brand":"","addedAt":1},
                    {"id":2,"sizeMl":1000,"price":12,"unitPrice":0.012,"brand":"","addedAt":2}]"#,
            )
            .unwrap();

        let store = EntryStore::load(Box::new(storage));
        assert_eq!(store.len(), 2);
        assert!(store.entries().iter().all(|entry| entry.unit_price() >= 0.0));
        let best = best_deal(store.entries(), BestDealPolicy::default()).unwrap();
        assert_eq!(best.id(), 2);
    }

    #[test]
    fn duplicate_loaded_ids_are_reassigned() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                ENTRIES_SLOT,
                r#"[{"id":5,"size":350,"price":5,"pricePerMl":0.0142,"brand":"Skol","addedAt":1},
                    {"id":5,"size":1000,"price":12,"pricePerMl":0.012,"brand":"","addedAt":2}]"#,
            )
            .unwrap();

        let mut store = EntryStore::load_with_clock(Box::new(storage), fixed_clock);
        assert_eq!(store.len(), 2);
        let ids: Vec<_> = store.entries().iter().map(Entry::id).collect();
        assert_eq!(ids[0], 5);
        assert_ne!(ids[0], ids[1]);

        let saved: Vec<Entry> =
            serde_json::from_str(&stored_payload(&store).unwrap()).unwrap();
        assert_eq!(saved.as_slice(), store.entries());

        assert!(store.remove(5));
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].size_ml(), 1000);
    }

    #[test]
    fn out_of_range_id_does_not_overflow_next_add() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                ENTRIES_SLOT,
                r#"[{"id":18446744073709551615,"sizeMl":350,"price":5,"brand":"","addedAt":1}]"#,
            )
            .unwrap();

        let mut store = EntryStore::load_with_clock(Box::new(storage), fixed_clock);
        assert_eq!(store.len(), 1);
        assert!(store.entries()[0].id() <= MAX_ENTRY_ID);

        let added = store.add(EntryCandidate::new(1000, 12.0, "")).unwrap().id();
        assert_eq!(store.len(), 2);
        assert_ne!(store.entries()[0].id(), added);
    }
}
