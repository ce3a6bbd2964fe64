//! The persistence seam.
//!
//! The engine never mutates storage itself: planners return instructions
//! and the execution layer drives this trait. [`MemoryStore`] is the
//! reference implementation, used by the tests and suitable for dry-run
//! previews; production callers adapt their persistence layer behind the
//! same two calls. A backend with real transactions can replace the swap
//! saga wholesale; the trait is the seam where that substitution happens.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::PublishedItem;

/// External storage for published items.
pub trait ItemStore {
    /// Fetches an item by id. `Ok(None)` when the id is unknown.
    fn get(&self, id: &str) -> Result<Option<PublishedItem>, StoreError>;

    /// Reassigns an item's date and premium flag. `date = None` parks the
    /// item in the backlog.
    fn set_date(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
        is_premium: bool,
    ) -> Result<(), StoreError>;
}

/// In-memory store keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, PublishedItem>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any existing item with the same id.
    pub fn with_item(mut self, item: PublishedItem) -> Self {
        self.insert(item);
        self
    }

    /// Inserts or replaces an item.
    pub fn insert(&mut self, item: PublishedItem) {
        self.items.insert(item.id.clone(), item);
    }

    /// A point-in-time copy of every item, for feeding the planners.
    pub fn snapshot(&self) -> Vec<PublishedItem> {
        self.items.values().cloned().collect()
    }
}

impl ItemStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<PublishedItem>, StoreError> {
        Ok(self.items.get(id).cloned())
    }

    fn set_date(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
        is_premium: bool,
    ) -> Result<(), StoreError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError(format!("unknown item id '{id}'")))?;
        item.date = date;
        item.is_premium = is_premium;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_get_returns_none_for_unknown_id() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_date_updates_date_and_premium() {
        let mut store = MemoryStore::new().with_item(PublishedItem::new("i1", "alpha"));

        store
            .set_date("i1", Some(date(2026, 1, 19)), true)
            .unwrap();
        let item = store.get("i1").unwrap().unwrap();
        assert_eq!(item.date, Some(date(2026, 1, 19)));
        assert!(item.is_premium);

        store.set_date("i1", None, true).unwrap();
        assert!(store.get("i1").unwrap().unwrap().is_backlog());
    }

    #[test]
    fn test_set_date_on_unknown_id_is_a_store_error() {
        let mut store = MemoryStore::new();
        let err = store.set_date("ghost", None, false).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
