//! Error types for planning and execution.
//!
//! Everything here is returned as an explicit `Result` value; the engine
//! never panics across its boundary. An occupied slot is NOT an error:
//! conflicts are surfaced as data (`conflict::ConflictInfo`) so the caller
//! can offer the operator a choice. The variants below cover what remains:
//! requests rejected up front, missing items, exhausted capacity, and
//! store failures passed through unmodified.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure reported by the external item store.
///
/// Carries the store's diagnostic text unmodified so the operator sees
/// the backend's own message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

/// Errors returned by the planners and the execution layer.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A swap was requested across two different categories.
    #[error("categories differ: '{left}' vs '{right}'")]
    CategoryMismatch { left: String, right: String },

    /// The template has no rule for this category.
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),

    /// A referenced item id does not exist in the store or snapshot.
    #[error("item not found: '{0}'")]
    ItemNotFound(String),

    /// The slot search exhausted its horizon without finding a free date.
    #[error("no free slot for '{category}' within {horizon_days} days after {start}")]
    SearchExhausted {
        category: String,
        start: NaiveDate,
        horizon_days: i64,
    },

    /// A displacement chain reached its depth bound.
    #[error(
        "maximum displacement depth ({max}) reached at {date}; \
         consider an alternative resolution such as marking the item as bonus"
    )]
    RippleDepthExceeded { date: NaiveDate, max: usize },

    /// The external store failed during plan execution.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
