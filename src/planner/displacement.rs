//! Bounded recursive displacement planning.
//!
//! Freeing an occupied slot can reveal another conflict: the occupant's
//! relocation day may itself be occupied. The planner follows that chain
//! depth-first, claiming each target date as it descends, and fails with
//! an explicit capacity error once the chain reaches [`MAX_RIPPLE_DEPTH`],
//! never with a silently truncated plan.
//!
//! Planning performs no I/O and is safely retryable. The returned moves
//! are instructions for the caller's store, ordered deepest-first so that
//! every destination has already been vacated by the time its move
//! executes. The caller appends one final move (the incoming item into
//! the original target date) after applying the plan.
//!
//! The recursion is a depth-first search over the implicit conflict
//! graph: nodes are dates, edges are "occupant must relocate".
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS)

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::{PublishedItem, WeeklyTemplate};
use crate::planner::slots::{next_available, MAX_DISPLACEMENT_DAYS};

/// Upper bound on the length of a displacement chain.
pub const MAX_RIPPLE_DEPTH: usize = 5;

/// An instruction to relocate one item. Not itself a stored entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplacementMove {
    /// Item to relocate.
    pub item_id: String,
    /// Current date of the item.
    pub from: NaiveDate,
    /// Destination date.
    pub to: NaiveDate,
}

/// Indexes a snapshot's scheduled non-bonus items of `category` by date.
///
/// The slot-uniqueness invariant makes the key well-defined; bonus items
/// never need displacement because they coexist by design.
pub fn occupants_by_date<'a>(
    category: &str,
    items: &'a [PublishedItem],
) -> HashMap<NaiveDate, &'a PublishedItem> {
    items
        .iter()
        .filter(|item| item.category == category && !item.is_bonus)
        .filter_map(|item| item.date.map(|d| (d, item)))
        .collect()
}

/// Plans the moves needed to free `target_date` for an incoming item.
///
/// Returns an empty list when the slot is already free. Otherwise the
/// occupant is sent to its next natural slot; if that slot is occupied the
/// conflict ripples forward, one displacement per level, until the chain
/// ends on a free date or a bound trips.
///
/// # Errors
///
/// [`EngineError::RippleDepthExceeded`] when the chain reaches
/// [`MAX_RIPPLE_DEPTH`], and [`EngineError::SearchExhausted`] when no slot
/// exists within the search horizon. Both are capacity failures the caller
/// should surface to the operator together with the bonus alternative.
pub fn plan_displacement(
    template: &WeeklyTemplate,
    category: &str,
    target_date: NaiveDate,
    occupants: &HashMap<NaiveDate, &PublishedItem>,
) -> Result<Vec<DisplacementMove>> {
    let mut claimed = HashSet::new();
    plan_at(template, category, target_date, occupants, &mut claimed, 0)
}

fn plan_at(
    template: &WeeklyTemplate,
    category: &str,
    target_date: NaiveDate,
    occupants: &HashMap<NaiveDate, &PublishedItem>,
    claimed: &mut HashSet<NaiveDate>,
    depth: usize,
) -> Result<Vec<DisplacementMove>> {
    if depth >= MAX_RIPPLE_DEPTH {
        return Err(EngineError::RippleDepthExceeded {
            date: target_date,
            max: MAX_RIPPLE_DEPTH,
        });
    }

    let Some(occupant) = occupants.get(&target_date) else {
        return Ok(Vec::new());
    };

    // The incoming item (or the occupant one level up) claims this date;
    // the chain must not circle back onto it.
    claimed.insert(target_date);

    let slot = next_available(template, category, target_date, claimed, true).ok_or_else(|| {
        EngineError::SearchExhausted {
            category: category.to_string(),
            start: target_date,
            horizon_days: MAX_DISPLACEMENT_DAYS,
        }
    })?;

    debug!(
        item = %occupant.id,
        from = %target_date,
        to = %slot.date,
        depth,
        "occupant must relocate"
    );

    let mut moves = plan_at(template, category, slot.date, occupants, claimed, depth + 1)?;
    moves.push(DisplacementMove {
        item_id: occupant.id.clone(),
        from: target_date,
        to: slot.date,
    });
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleSlot;
    use chrono::Weekday;

    fn daily_template() -> WeeklyTemplate {
        WeeklyTemplate::new().with_slot(ScheduleSlot::daily("alpha", false))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheduled(id: &str, category: &str, d: NaiveDate) -> PublishedItem {
        PublishedItem::new(id, category).with_date(d)
    }

    #[test]
    fn test_free_target_needs_no_moves() {
        let template = daily_template();
        let items: Vec<PublishedItem> = Vec::new();
        let occupants = occupants_by_date("alpha", &items);

        let moves =
            plan_displacement(&template, "alpha", date(2026, 2, 1), &occupants).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn test_single_occupant_moves_to_next_scheduled_day() {
        // beta runs Mondays only; 2026-02-01 is a Sunday, 2026-02-02 the
        // next Monday. The occupant of the Sunday slot should land there.
        let template = WeeklyTemplate::new().with_slot(ScheduleSlot::on(
            "beta",
            [Weekday::Mon],
            false,
        ));
        let items = vec![scheduled("x", "beta", date(2026, 2, 1))];
        let occupants = occupants_by_date("beta", &items);

        let moves = plan_displacement(&template, "beta", date(2026, 2, 1), &occupants).unwrap();
        assert_eq!(
            moves,
            vec![DisplacementMove {
                item_id: "x".to_string(),
                from: date(2026, 2, 1),
                to: date(2026, 2, 2),
            }]
        );
    }

    #[test]
    fn test_ripple_chain_shifts_each_occupant_forward() {
        let template = daily_template();
        let items = vec![
            scheduled("x0", "alpha", date(2026, 2, 1)),
            scheduled("x1", "alpha", date(2026, 2, 2)),
            scheduled("x2", "alpha", date(2026, 2, 3)),
        ];
        let occupants = occupants_by_date("alpha", &items);

        let moves =
            plan_displacement(&template, "alpha", date(2026, 2, 1), &occupants).unwrap();

        // Deepest move first: x2 vacates before x1 arrives, and so on.
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].item_id, "x2");
        assert_eq!(moves[0].to, date(2026, 2, 4));
        assert_eq!(moves[1].item_id, "x1");
        assert_eq!(moves[1].to, date(2026, 2, 3));
        assert_eq!(moves[2].item_id, "x0");
        assert_eq!(moves[2].to, date(2026, 2, 2));
    }

    #[test]
    fn test_applying_moves_preserves_slot_uniqueness() {
        let template = daily_template();
        let items = vec![
            scheduled("x0", "alpha", date(2026, 2, 1)),
            scheduled("x1", "alpha", date(2026, 2, 2)),
            scheduled("x2", "alpha", date(2026, 2, 3)),
            scheduled("x3", "alpha", date(2026, 2, 4)),
        ];
        let occupants = occupants_by_date("alpha", &items);
        let target = date(2026, 2, 1);

        let moves = plan_displacement(&template, "alpha", target, &occupants).unwrap();

        // Replay the plan over the snapshot, then place the incoming item.
        let mut dates: HashMap<String, NaiveDate> = items
            .iter()
            .map(|i| (i.id.clone(), i.date.unwrap()))
            .collect();
        for mv in &moves {
            let occupied: HashSet<NaiveDate> = dates.values().copied().collect();
            assert!(
                !occupied.contains(&mv.to),
                "destination {} occupied when move executed",
                mv.to
            );
            dates.insert(mv.item_id.clone(), mv.to);
        }
        dates.insert("incoming".to_string(), target);

        let unique: HashSet<NaiveDate> = dates.values().copied().collect();
        assert_eq!(unique.len(), dates.len());
    }

    #[test]
    fn test_depth_bound_fails_loudly() {
        // Five consecutive occupied days force the chain to its bound.
        let template = daily_template();
        let items: Vec<PublishedItem> = (0..5)
            .map(|i| {
                scheduled(
                    &format!("x{i}"),
                    "alpha",
                    date(2026, 2, 1) + chrono::Duration::days(i),
                )
            })
            .collect();
        let occupants = occupants_by_date("alpha", &items);

        let err =
            plan_displacement(&template, "alpha", date(2026, 2, 1), &occupants).unwrap_err();
        assert!(matches!(
            err,
            EngineError::RippleDepthExceeded { max: MAX_RIPPLE_DEPTH, .. }
        ));
    }

    #[test]
    fn test_chain_one_below_bound_succeeds() {
        let template = daily_template();
        let items: Vec<PublishedItem> = (0..4)
            .map(|i| {
                scheduled(
                    &format!("x{i}"),
                    "alpha",
                    date(2026, 2, 1) + chrono::Duration::days(i),
                )
            })
            .collect();
        let occupants = occupants_by_date("alpha", &items);

        let moves =
            plan_displacement(&template, "alpha", date(2026, 2, 1), &occupants).unwrap();
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_occupants_index_skips_bonus_items() {
        let items = vec![
            scheduled("x0", "alpha", date(2026, 2, 1)),
            scheduled("b0", "alpha", date(2026, 2, 1)).with_bonus(true),
        ];
        let occupants = occupants_by_date("alpha", &items);
        assert_eq!(occupants.len(), 1);
        assert_eq!(occupants[&date(2026, 2, 1)].id, "x0");
    }
}
