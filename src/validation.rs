//! Input integrity checks for templates and item snapshots.
//!
//! Checks the structural integrity of a template and of the item snapshot
//! a caller is about to plan against. Detects:
//! - Duplicate category rules in a template
//! - Duplicate item IDs
//! - Items whose category the template does not know
//! - Two non-bonus items of one category sharing a date
//!
//! The last check matters because the bonus opt-in keeps slot uniqueness
//! soft: drift can accumulate unnoticed, and operators need a report that
//! names it.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{PublishedItem, WeeklyTemplate};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two template rules schedule the same category.
    DuplicateCategoryRule,
    /// Two items share the same ID.
    DuplicateItemId,
    /// An item's category has no rule in the template.
    UnknownCategory,
    /// Two non-bonus items of one category share a date.
    SlotCollision,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a template's rule set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_template(template: &WeeklyTemplate) -> ValidationResult {
    let mut errors = Vec::new();
    let mut categories = HashSet::new();

    for slot in template.slots() {
        if !categories.insert(slot.category.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCategoryRule,
                format!("Duplicate rule for category '{}'", slot.category),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates an item snapshot against a template.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. Every item's category has a rule in the template
/// 3. No two non-bonus items of one category share a date
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(
    template: &WeeklyTemplate,
    items: &[PublishedItem],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for item in items {
        if !ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateItemId,
                format!("Duplicate item ID: {}", item.id),
            ));
        }

        if !template.has_category(&item.category) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCategory,
                format!(
                    "Item '{}' has category '{}' with no template rule",
                    item.id, item.category
                ),
            ));
        }
    }

    let mut slots: HashSet<(NaiveDate, &str)> = HashSet::new();
    for item in items {
        if item.is_bonus {
            continue;
        }
        if let Some(date) = item.date {
            if !slots.insert((date, item.category.as_str())) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SlotCollision,
                    format!(
                        "Two non-bonus '{}' items share {} (second is '{}')",
                        item.category, date, item.id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
