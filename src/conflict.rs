//! Conflict detection for target slots.
//!
//! A conflict is a normal outcome surfaced as data, not an error: the
//! caller shows the operator who occupies the slot and the nearest free
//! alternative, and the operator picks a resolution (add as bonus,
//! displace, swap, or cancel).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{PublishedItem, WeeklyTemplate};
use crate::planner::{next_available, occupied_dates, AvailableSlot};

/// An occupied target slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictInfo {
    /// Id of the item already in the slot.
    pub occupying_item_id: String,
    /// Title of the item already in the slot, for operator messages.
    pub occupying_item_title: String,
    /// Contested category.
    pub category: String,
    /// Contested date.
    pub date: NaiveDate,
}

/// A conflict paired with the slot finder's proposed alternative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictReport {
    /// The occupied slot.
    pub conflict: ConflictInfo,
    /// Nearest free date for the same category, when one exists within
    /// the search horizon.
    pub suggestion: Option<AvailableSlot>,
}

/// Reports the item occupying `(category, target_date)`, if any.
///
/// `exclude` skips one item id: pass the id of the item being edited so
/// it does not conflict with itself. Bonus occupants are reported too;
/// whether they block anything is the operator's call.
pub fn check_conflict(
    category: &str,
    target_date: NaiveDate,
    items: &[PublishedItem],
    exclude: Option<&str>,
) -> Option<ConflictInfo> {
    items
        .iter()
        .filter(|item| exclude != Some(item.id.as_str()))
        .find(|item| item.occupies(category, target_date))
        .map(|item| ConflictInfo {
            occupying_item_id: item.id.clone(),
            occupying_item_title: item.title.clone(),
            category: category.to_string(),
            date: target_date,
        })
}

/// [`check_conflict`] plus the alternative slot the operator should be
/// offered alongside it.
pub fn check_conflict_with_suggestion(
    template: &WeeklyTemplate,
    category: &str,
    target_date: NaiveDate,
    items: &[PublishedItem],
    exclude: Option<&str>,
) -> Option<ConflictReport> {
    let conflict = check_conflict(category, target_date, items, exclude)?;
    let occupied = occupied_dates(category, items);
    let suggestion = next_available(template, category, target_date, &occupied, true);
    Some(ConflictReport {
        conflict,
        suggestion,
    })
}
