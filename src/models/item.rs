//! Published content items.
//!
//! An item is either scheduled (`date = Some`) or parked in the backlog
//! (`date = None`). The engine only reads items; every mutating transition
//! (assign, displace, swap, remove) is executed by the external store at
//! the direction of the planners.
//!
//! # Slot uniqueness
//! For any (date, category) at most one non-bonus item should be
//! scheduled. Bonus items are an operator-acknowledged exception and may
//! coexist with a regular item in the same slot. Backlog items are exempt
//! entirely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Editorial status of an item. Carried for callers; the planners never
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Still being authored.
    #[default]
    Draft,
    /// Signed off, ready to publish.
    Approved,
    /// Live in the consumer app.
    Published,
}

/// A content item as stored by the external system.
///
/// Identity (`id`) is stable and assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishedItem {
    /// Unique item identifier.
    pub id: String,
    /// Human-readable title, used in conflict messages.
    pub title: String,
    /// Content category.
    pub category: String,
    /// Publication date. `None` = backlog (authored but unscheduled).
    pub date: Option<NaiveDate>,
    /// Whether the item is premium content.
    pub is_premium: bool,
    /// Whether the item may share its slot with another (see module docs).
    pub is_bonus: bool,
    /// Editorial status.
    pub status: ItemStatus,
}

impl PublishedItem {
    /// Creates a backlog item with the given id and category.
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            category: category.into(),
            date: None,
            is_premium: false,
            is_bonus: false,
            status: ItemStatus::Draft,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Schedules the item on a date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the premium flag.
    pub fn with_premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    /// Marks the item as bonus.
    pub fn with_bonus(mut self, is_bonus: bool) -> Self {
        self.is_bonus = is_bonus;
        self
    }

    /// Sets the editorial status.
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the item sits in the backlog.
    #[inline]
    pub fn is_backlog(&self) -> bool {
        self.date.is_none()
    }

    /// Whether the item has a publication date.
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.date.is_some()
    }

    /// Whether the item occupies the given slot.
    pub fn occupies(&self, category: &str, date: NaiveDate) -> bool {
        self.category == category && self.date == Some(date)
    }
}
