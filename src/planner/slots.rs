//! Forward search for free publication dates.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{PublishedItem, WeeklyTemplate};

/// How many days past the start date the slot search will look.
pub const MAX_DISPLACEMENT_DAYS: i64 = 90;

/// A free date found by the slot search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailableSlot {
    /// The free date.
    pub date: NaiveDate,
    /// Whether the template would naturally assign the category this day.
    pub is_scheduled_day: bool,
}

/// Dates currently occupied by non-bonus items of `category`.
pub fn occupied_dates(category: &str, items: &[PublishedItem]) -> HashSet<NaiveDate> {
    items
        .iter()
        .filter(|item| item.category == category && !item.is_bonus)
        .filter_map(|item| item.date)
        .collect()
}

/// Finds the next free date for `category` strictly after `start_date`.
///
/// Searches up to [`MAX_DISPLACEMENT_DAYS`] days ahead in two passes. With
/// `prefer_scheduled`, the first pass accepts only days the template
/// assigns to the category, so a relocated item lands on its natural
/// recurring day and the weekly rhythm survives; the second pass takes the
/// first free day of any kind. Returns `None` once the horizon is
/// exhausted, and callers must treat that as a hard capacity failure, not
/// extend the search silently.
pub fn next_available(
    template: &WeeklyTemplate,
    category: &str,
    start_date: NaiveDate,
    occupied: &HashSet<NaiveDate>,
    prefer_scheduled: bool,
) -> Option<AvailableSlot> {
    if prefer_scheduled {
        if let Some(slot) = scan(template, category, start_date, occupied, true) {
            return Some(slot);
        }
    }
    scan(template, category, start_date, occupied, false)
}

fn scan(
    template: &WeeklyTemplate,
    category: &str,
    start_date: NaiveDate,
    occupied: &HashSet<NaiveDate>,
    scheduled_only: bool,
) -> Option<AvailableSlot> {
    for offset in 1..=MAX_DISPLACEMENT_DAYS {
        let day = start_date.checked_add_days(chrono::Days::new(offset as u64))?;
        if occupied.contains(&day) {
            continue;
        }
        let is_scheduled_day = template.is_required(category, day);
        if scheduled_only && !is_scheduled_day {
            continue;
        }
        return Some(AvailableSlot {
            date: day,
            is_scheduled_day,
        });
    }
    None
}
