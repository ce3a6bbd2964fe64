//! Content-calendar scheduling and conflict resolution.
//!
//! Plans publication dates for a recurring weekly content template:
//! derives per-date requirements, diffs them against what is already
//! published, finds free slots, and resolves date collisions with bounded
//! displacement chains and a compensating two-item swap.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `WeeklyTemplate`, `ScheduleSlot`,
//!   `ScheduleRequirement`, `PublishedItem`
//! - **`gaps`**: Template-vs-published diffing and coverage reporting
//! - **`conflict`**: Slot occupancy checks with suggested alternatives
//! - **`planner`**: Slot search and displacement planning
//! - **`store`**: The persistence seam (`ItemStore`) and an in-memory impl
//! - **`executor`**: Plan application and the date-swap saga
//! - **`validation`**: Template and snapshot integrity checks
//!
//! # Architecture
//!
//! Every planner is a pure, synchronous function over a template and a
//! caller-supplied snapshot of items; nothing here performs network I/O
//! or holds state between calls. Only `executor` mutates anything, and
//! only through the `ItemStore` trait. Persistence, transactions, and
//! concurrency control across operators belong to the caller: two
//! operators planning from stale snapshots of the same category can race,
//! and hardening that requires optimistic versioning at the store.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use content_calendar::gaps;
//! use content_calendar::models::{PublishedItem, ScheduleSlot, WeeklyTemplate};
//!
//! let template = WeeklyTemplate::new()
//!     .with_slot(ScheduleSlot::daily("crossword", false))
//!     .with_slot(ScheduleSlot::on("quiz", [Weekday::Mon, Weekday::Thu], true));
//!
//! let monday = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
//! let items = vec![PublishedItem::new("c1", "crossword").with_date(monday)];
//!
//! let open = gaps::missing_for_week(&template, monday, &items);
//! assert_eq!(open.len(), 8); // 6 crossword days + 2 quiz days still open
//! ```

pub mod conflict;
pub mod error;
pub mod executor;
pub mod gaps;
pub mod models;
pub mod planner;
pub mod store;
pub mod validation;

pub use error::{EngineError, Result, StoreError};
pub use models::{ItemStatus, PublishedItem, ScheduleRequirement, ScheduleSlot, WeeklyTemplate};
