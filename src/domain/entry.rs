use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pricing::parse_price;

/// Identifier assigned by the store. Monotonic within one list.
pub type EntryId = u64;

/// Raw purchase data handed over by the form before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryCandidate {
    pub size_ml: u32,
    pub price: f64,
    pub brand: String,
}

impl EntryCandidate {
    pub fn new(size_ml: u32, price: f64, brand: impl Into<String>) -> Self {
        Self {
            size_ml,
            price,
            brand: brand.into(),
        }
    }

    /// Builds a candidate from form input. A missing size or a price that is
    /// not a plain non-negative decimal makes the candidate invalid.
    pub fn from_input(
        size_ml: Option<u32>,
        price_text: &str,
        brand: &str,
    ) -> Result<Self, EntryError> {
        let size_ml = size_ml.filter(|size| *size > 0).ok_or(EntryError::ZeroSize)?;
        let price = parse_price(price_text).ok_or(EntryError::InvalidPrice)?;
        let candidate = Self::new(size_ml, price, brand);
        candidate.validate()?;
        Ok(candidate)
    }

    pub fn validate(&self) -> Result<(), EntryError> {
        if self.size_ml == 0 {
            return Err(EntryError::ZeroSize);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(EntryError::InvalidPrice);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("size must be a positive number of milliliters")]
    ZeroSize,
    #[error("price must be a non-negative number")]
    InvalidPrice,
}

/// One recorded purchase. Fields are fixed at construction; `unit_price` is
/// derived once from `price / size_ml` and never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry", into = "StoredEntry")]
pub struct Entry {
    id: EntryId,
    size_ml: u32,
    price: f64,
    unit_price: f64,
    brand: String,
    added_at: i64,
}

impl Entry {
    pub(crate) fn create(
        id: EntryId,
        candidate: EntryCandidate,
        added_at: i64,
    ) -> Result<Self, EntryError> {
        candidate.validate()?;
        Ok(Self {
            id,
            size_ml: candidate.size_ml,
            price: candidate.price,
            unit_price: candidate.price / candidate.size_ml as f64,
            brand: candidate.brand.trim().to_string(),
            added_at,
        })
    }

    /// Same entry under a new id, used when repairing a loaded list.
    pub(crate) fn with_id(self, id: EntryId) -> Self {
        Self { id, ..self }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn size_ml(&self) -> u32 {
        self.size_ml
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Currency units per milliliter.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn price_per_liter(&self) -> f64 {
        self.unit_price * 1000.0
    }

    pub fn brand(&self) -> Option<&str> {
        if self.brand.is_empty() {
            None
        } else {
            Some(self.brand.as_str())
        }
    }

    /// Milliseconds since the Unix epoch.
    pub fn added_at(&self) -> i64 {
        self.added_at
    }
}

/// On-disk shape of an entry. Also accepts the older `size`/`pricePerMl`
/// field names so lists saved by earlier versions still load. The stored
/// unit price is written for readers of the file but never read back: it is
/// always derived again from `price / sizeMl`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: EntryId,
    #[serde(alias = "size")]
    size_ml: u32,
    price: f64,
    #[serde(alias = "pricePerMl", default)]
    unit_price: Option<f64>,
    #[serde(default)]
    brand: String,
    added_at: i64,
}

impl TryFrom<StoredEntry> for Entry {
    type Error = EntryError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let candidate = EntryCandidate::new(stored.size_ml, stored.price, stored.brand);
        candidate.validate()?;
        let unit_price = candidate.price / candidate.size_ml as f64;
        if let Some(stored_unit) = stored.unit_price {
            if (stored_unit - unit_price).abs() > 1e-9 {
                log::warn!(
                    "[store] Entry {} had unit price {stored_unit}, using {unit_price}",
                    stored.id
                );
            }
        }
        Ok(Entry {
            id: stored.id,
            size_ml: candidate.size_ml,
            price: candidate.price,
            unit_price,
            brand: candidate.brand,
            added_at: stored.added_at,
        })
    }
}

impl From<Entry> for StoredEntry {
    fn from(entry: Entry) -> Self {
        StoredEntry {
            id: entry.id,
            size_ml: entry.size_ml,
            price: entry.price,
            unit_price: Some(entry.unit_price),
            brand: entry.brand,
            added_at: entry.added_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_derives_unit_price_and_trims_brand() {
        let entry = Entry::create(1, EntryCandidate::new(350, 5.0, "  Eisenbahn "), 10).unwrap();
        assert!((entry.unit_price() - 5.0 / 350.0).abs() < 1e-9);
        assert_eq!(entry.brand(), Some("Eisenbahn"));
        assert!((entry.price_per_liter() - 14.285714).abs() < 1e-5);
    }

    #[test]
    fn empty_brand_reads_as_none() {
        let entry = Entry::create(1, EntryCandidate::new(600, 7.0, "   "), 10).unwrap();
        assert_eq!(entry.brand(), None);
    }

    #[test]
    fn rejects_zero_size_and_bad_prices() {
        assert_eq!(
            EntryCandidate::new(0, 3.0, "").validate(),
            Err(EntryError::ZeroSize)
        );
        assert_eq!(
            EntryCandidate::new(350, -0.01, "").validate(),
            Err(EntryError::InvalidPrice)
        );
        assert_eq!(
            EntryCandidate::new(350, f64::NAN, "").validate(),
            Err(EntryError::InvalidPrice)
        );
        assert!(EntryCandidate::new(350, 0.0, "").validate().is_ok());
    }

    #[test]
    fn from_input_parses_form_values() {
        let candidate = EntryCandidate::from_input(Some(473), "4.99", "Brahma").unwrap();
        assert_eq!(candidate.size_ml, 473);
        assert!((candidate.price - 4.99).abs() < 1e-9);

        let comma = EntryCandidate::from_input(Some(473), "4,99", "").unwrap();
        assert!((comma.price - 4.99).abs() < 1e-9);

        assert_eq!(
            EntryCandidate::from_input(None, "4.99", ""),
            Err(EntryError::ZeroSize)
        );
        assert_eq!(
            EntryCandidate::from_input(Some(0), "4.99", ""),
            Err(EntryError::ZeroSize)
        );
        assert_eq!(
            EntryCandidate::from_input(Some(350), "", ""),
            Err(EntryError::InvalidPrice)
        );
        assert_eq!(
            EntryCandidate::from_input(Some(350), "abc", ""),
            Err(EntryError::InvalidPrice)
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let entry = Entry::create(7, EntryCandidate::new(1000, 12.0, "Skol"), 99).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["sizeMl"], 1000);
        assert_eq!(value["price"], 12.0);
        assert_eq!(value["unitPrice"], 0.012);
        assert_eq!(value["brand"], "Skol");
        assert_eq!(value["addedAt"], 99);
    }

    #[test]
    fn loads_legacy_field_names() {
        let json = r#"{"id":1700000000000,"size":350,"price":5,"pricePerMl":0.014285714285714285,"brand":"","addedAt":1700000000000}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.size_ml(), 350);
        assert_eq!(entry.unit_price(), 5.0 / 350.0);
        assert_eq!(entry.brand(), None);
    }

    #[test]
    fn stored_unit_price_is_rederived_from_price_and_size() {
        let negative = r#"{"id":1,"sizeMl":350,"price":5,"unitPrice":-3.0,"brand":"","addedAt":1}"#;
        let entry: Entry = serde_json::from_str(negative).unwrap();
        assert_eq!(entry.unit_price(), 5.0 / 350.0);

        let mismatched = r#"{"id":2,"size":1000,"price":12,"pricePerMl":0.5,"addedAt":2}"#;
        let entry: Entry = serde_json::from_str(mismatched).unwrap();
        assert_eq!(entry.unit_price(), 12.0 / 1000.0);

        let not_finite = r#"{"id":3,"sizeMl":500,"price":4.25,"unitPrice":null,"addedAt":3}"#;
        let entry: Entry = serde_json::from_str(not_finite).unwrap();
        assert_eq!(entry.unit_price(), 4.25 / 500.0);
    }

    #[test]
    fn reloaded_entry_equals_saved_entry() {
        let entry = Entry::create(9, EntryCandidate::new(473, 3.99, "Colorado"), 5).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let reloaded: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, entry);
    }

    #[test]
    fn missing_unit_price_is_derived() {
        let json = r#"{"id":1,"sizeMl":500,"price":4.25,"addedAt":1}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!((entry.unit_price() - 0.0085).abs() < 1e-12);
    }

    #[test]
    fn stored_entry_with_zero_size_is_rejected() {
        let json = r#"{"id":1,"sizeMl":0,"price":4.25,"unitPrice":0,"brand":"","addedAt":1}"#;
        assert!(serde_json::from_str::<Entry>(json).is_err());
    }
}
