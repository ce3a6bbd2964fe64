//! Weekly publication template and requirement resolution.
//!
//! The template is the engine's only configuration: a set of recurring
//! rules stating which category is due on which days of the week, and
//! whether the slot is premium. It is immutable after construction and
//! passed explicitly into every resolver and planner call, so independent
//! templates (per tenant, per environment) can coexist without hidden
//! global state.
//!
//! # Resolution
//! A slot applies to a date iff its `days_of_week` is empty (daily) or
//! contains the date's weekday. Resolution is a pure function of the
//! date's weekday and the template, with no I/O and no clock.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A recurring weekly publication rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSlot {
    /// Content category this rule schedules.
    pub category: String,
    /// Days of week the category is due. Empty = every day.
    pub days_of_week: Vec<Weekday>,
    /// Whether items in this slot are premium content.
    pub is_premium: bool,
}

impl ScheduleSlot {
    /// Creates a rule publishing `category` every day.
    pub fn daily(category: impl Into<String>, is_premium: bool) -> Self {
        Self {
            category: category.into(),
            days_of_week: Vec::new(),
            is_premium,
        }
    }

    /// Creates a rule publishing `category` on specific weekdays.
    pub fn on(
        category: impl Into<String>,
        days: impl IntoIterator<Item = Weekday>,
        is_premium: bool,
    ) -> Self {
        Self {
            category: category.into(),
            days_of_week: days.into_iter().collect(),
            is_premium,
        }
    }

    /// Whether this rule publishes every day.
    #[inline]
    pub fn is_daily(&self) -> bool {
        self.days_of_week.is_empty()
    }

    /// Whether this rule applies on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.is_daily() || self.days_of_week.contains(&date.weekday())
    }
}

/// A publication requirement derived for a concrete date.
///
/// Never persisted; recomputed from the template on every call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRequirement {
    /// Required category.
    pub category: String,
    /// Whether the slot is premium on this date.
    pub is_premium: bool,
}

/// The recurring weekly publication template.
///
/// Immutable after construction: build it with [`with_slot`] and hand it
/// out by reference.
///
/// [`with_slot`]: WeeklyTemplate::with_slot
///
/// # Example
/// ```
/// use chrono::Weekday;
/// use content_calendar::models::{ScheduleSlot, WeeklyTemplate};
///
/// let template = WeeklyTemplate::new()
///     .with_slot(ScheduleSlot::daily("crossword", false))
///     .with_slot(ScheduleSlot::on("quiz", [Weekday::Mon, Weekday::Thu], true));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyTemplate {
    slots: Vec<ScheduleSlot>,
}

impl WeeklyTemplate {
    /// Creates an empty template (nothing required on any day).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a publication rule.
    pub fn with_slot(mut self, slot: ScheduleSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// The configured rules, in declaration order.
    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    /// Everything due on `date`, in rule declaration order.
    pub fn requirements_for(&self, date: NaiveDate) -> Vec<ScheduleRequirement> {
        self.slots
            .iter()
            .filter(|slot| slot.applies_on(date))
            .map(|slot| ScheduleRequirement {
                category: slot.category.clone(),
                is_premium: slot.is_premium,
            })
            .collect()
    }

    /// Whether `category` is due on `date`.
    pub fn is_required(&self, category: &str, date: NaiveDate) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.category == category && slot.applies_on(date))
    }

    /// Premium flag for `category` on `date`, or `None` when the category
    /// is not due that day.
    pub fn premium_on(&self, category: &str, date: NaiveDate) -> Option<bool> {
        self.slots
            .iter()
            .find(|slot| slot.category == category && slot.applies_on(date))
            .map(|slot| slot.is_premium)
    }

    /// Whether the template has any rule for `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.slots.iter().any(|slot| slot.category == category)
    }
}
