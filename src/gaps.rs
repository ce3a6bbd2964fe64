//! Gap detection against the weekly template.
//!
//! Diffs the template's requirements over a date range against the items
//! already published and reports every required slot that has nothing
//! scheduled. Bonus items coexist with a regular item in the same slot and
//! do not count toward filling a requirement.
//!
//! # Week Normalization
//! Weekly queries use the ISO week: Monday through Sunday, regardless of
//! which day of the week the query date falls on.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{PublishedItem, WeeklyTemplate};

/// A required slot with no published item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingSlot {
    /// Date the slot is due.
    pub date: NaiveDate,
    /// Required category.
    pub category: String,
    /// Whether the slot is premium on that date.
    pub is_premium: bool,
    /// Weekday of `date`, for display grouping.
    pub day_of_week: Weekday,
}

/// Aggregate slot coverage over a date range. Reporting only; planners
/// never consume this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageReport {
    /// Slots the template requires in the range.
    pub required: usize,
    /// Required slots with a published item.
    pub populated: usize,
    /// Required slots with nothing scheduled.
    pub missing: usize,
    /// populated / required, as a percentage. 100.0 when nothing is required.
    pub percent: f64,
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Every required slot between `start` and `end` (inclusive) that has no
/// published non-bonus item.
pub fn missing_between(
    template: &WeeklyTemplate,
    start: NaiveDate,
    end: NaiveDate,
    items: &[PublishedItem],
) -> Vec<MissingSlot> {
    let filled: HashSet<(NaiveDate, &str)> = items
        .iter()
        .filter(|item| !item.is_bonus)
        .filter_map(|item| item.date.map(|d| (d, item.category.as_str())))
        .collect();

    let mut missing = Vec::new();
    let mut day = start;
    while day <= end {
        for req in template.requirements_for(day) {
            if !filled.contains(&(day, req.category.as_str())) {
                missing.push(MissingSlot {
                    date: day,
                    day_of_week: day.weekday(),
                    category: req.category,
                    is_premium: req.is_premium,
                });
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    missing
}

/// Missing slots for the Monday–Sunday week containing `any_date`.
pub fn missing_for_week(
    template: &WeeklyTemplate,
    any_date: NaiveDate,
    items: &[PublishedItem],
) -> Vec<MissingSlot> {
    let start = week_start(any_date);
    let end = start + chrono::Duration::days(6);
    missing_between(template, start, end, items)
}

/// Coverage counts for the range `start..=end`.
pub fn coverage(
    template: &WeeklyTemplate,
    start: NaiveDate,
    end: NaiveDate,
    items: &[PublishedItem],
) -> CoverageReport {
    let mut required = 0usize;
    let mut day = start;
    while day <= end {
        required += template.requirements_for(day).len();
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let missing = missing_between(template, start, end, items).len();
    let populated = required - missing;
    let percent = if required == 0 {
        100.0
    } else {
        populated as f64 * 100.0 / required as f64
    };

    CoverageReport {
        required,
        populated,
        missing,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleSlot;

    fn sample_template() -> WeeklyTemplate {
        WeeklyTemplate::new()
            .with_slot(ScheduleSlot::daily("alpha", false))
            .with_slot(ScheduleSlot::on(
                "beta",
                [Weekday::Mon, Weekday::Thu],
                true,
            ))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheduled(id: &str, category: &str, d: NaiveDate) -> PublishedItem {
        PublishedItem::new(id, category).with_date(d)
    }

    #[test]
    fn test_week_of_alpha_daily_beta_twice() {
        // Week 2026-01-19 (Mon) .. 2026-01-25 (Sun), one alpha on Monday:
        // 6 alpha gaps (Tue..Sun) + 2 beta gaps (Mon, Thu) = 8.
        let template = sample_template();
        let items = vec![scheduled("a1", "alpha", date(2026, 1, 19))];

        let missing = missing_for_week(&template, date(2026, 1, 19), &items);
        assert_eq!(missing.len(), 8);

        let alpha: Vec<_> = missing.iter().filter(|m| m.category == "alpha").collect();
        let beta: Vec<_> = missing.iter().filter(|m| m.category == "beta").collect();
        assert_eq!(alpha.len(), 6);
        assert_eq!(beta.len(), 2);
        assert_eq!(beta[0].date, date(2026, 1, 19));
        assert_eq!(beta[1].date, date(2026, 1, 22));
        assert!(beta.iter().all(|m| m.is_premium));
        assert_eq!(alpha[0].date, date(2026, 1, 20));
        assert_eq!(alpha[5].date, date(2026, 1, 25));
    }

    #[test]
    fn test_week_normalization_from_any_weekday() {
        let template = sample_template();
        let items = vec![scheduled("a1", "alpha", date(2026, 1, 19))];

        let from_monday = missing_for_week(&template, date(2026, 1, 19), &items);
        let from_wednesday = missing_for_week(&template, date(2026, 1, 21), &items);
        let from_sunday = missing_for_week(&template, date(2026, 1, 25), &items);
        assert_eq!(from_monday, from_wednesday);
        assert_eq!(from_monday, from_sunday);
    }

    #[test]
    fn test_week_start_is_monday() {
        assert_eq!(week_start(date(2026, 1, 19)), date(2026, 1, 19));
        assert_eq!(week_start(date(2026, 1, 21)), date(2026, 1, 19));
        assert_eq!(week_start(date(2026, 1, 25)), date(2026, 1, 19));
    }

    #[test]
    fn test_bonus_item_does_not_fill_requirement() {
        let template = sample_template();
        let monday = date(2026, 1, 19);
        let items = vec![scheduled("a1", "alpha", monday).with_bonus(true)];

        let missing = missing_between(&template, monday, monday, &items);
        assert!(missing.iter().any(|m| m.category == "alpha"));
    }

    #[test]
    fn test_backlog_item_does_not_fill_requirement() {
        let template = sample_template();
        let monday = date(2026, 1, 19);
        let items = vec![PublishedItem::new("a1", "alpha")];

        let missing = missing_between(&template, monday, monday, &items);
        assert_eq!(missing.len(), 2); // alpha and beta both open
    }

    #[test]
    fn test_fully_populated_range_has_no_gaps() {
        let template = sample_template();
        let mut items = Vec::new();
        for offset in 0..7 {
            let day = date(2026, 1, 19) + chrono::Duration::days(offset);
            items.push(scheduled(&format!("a{offset}"), "alpha", day));
        }
        items.push(scheduled("b1", "beta", date(2026, 1, 19)));
        items.push(scheduled("b2", "beta", date(2026, 1, 22)));

        let missing = missing_for_week(&template, date(2026, 1, 21), &items);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_coverage_counts() {
        let template = sample_template();
        let items = vec![
            scheduled("a1", "alpha", date(2026, 1, 19)),
            scheduled("b1", "beta", date(2026, 1, 19)),
        ];

        // Week of 2026-01-19: 7 alpha + 2 beta = 9 required.
        let report = coverage(
            &template,
            date(2026, 1, 19),
            date(2026, 1, 25),
            &items,
        );
        assert_eq!(report.required, 9);
        assert_eq!(report.populated, 2);
        assert_eq!(report.missing, 7);
        assert!((report.percent - 2.0 * 100.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_empty_range() {
        let template = sample_template();
        // start > end: nothing required.
        let report = coverage(&template, date(2026, 1, 25), date(2026, 1, 19), &[]);
        assert_eq!(report.required, 0);
        assert_eq!(report.missing, 0);
        assert!((report.percent - 100.0).abs() < 1e-9);
    }
}
