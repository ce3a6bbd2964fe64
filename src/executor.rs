//! Plan execution and the date-swap saga.
//!
//! Planning is side-effect-free; this module is the only place the engine
//! drives the store, and the asymmetry matters: a failure during planning
//! leaves no partial state, while a failure during execution can. A
//! displacement plan is applied move by move with no rollback on mid-chain
//! failure; the caller re-plans from a fresh snapshot. Only the swap
//! carries compensating steps, standing in for the multi-row transaction
//! the target store does not offer.
//!
//! # Reference
//! Garcia-Molina & Salem (1987), "Sagas"

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::error::{EngineError, Result};
use crate::models::{PublishedItem, WeeklyTemplate};
use crate::planner::{occupants_by_date, plan_displacement, DisplacementMove};
use crate::store::ItemStore;

/// Premium flag for `category` landing on `date`.
///
/// The template decides; where it is silent (backlog, or a day the
/// category is not due) the item keeps its current flag.
fn premium_for(
    template: &WeeklyTemplate,
    category: &str,
    date: Option<NaiveDate>,
    current: bool,
) -> bool {
    match date {
        Some(day) => template.premium_on(category, day).unwrap_or(current),
        None => current,
    }
}

/// Applies a displacement plan in order.
///
/// Each move re-reads its item so the premium recompute uses the item's
/// stored category. Store failures surface unmodified, and moves already
/// applied stay applied.
pub fn apply_plan<S: ItemStore>(
    store: &mut S,
    template: &WeeklyTemplate,
    moves: &[DisplacementMove],
) -> Result<()> {
    for (applied, mv) in moves.iter().enumerate() {
        let item = store
            .get(&mv.item_id)?
            .ok_or_else(|| EngineError::ItemNotFound(mv.item_id.clone()))?;
        let premium = premium_for(template, &item.category, Some(mv.to), item.is_premium);
        if let Err(failure) = store.set_date(&mv.item_id, Some(mv.to), premium) {
            error!(
                applied,
                total = moves.len(),
                item = %mv.item_id,
                "plan execution failed mid-chain; applied moves are not rolled back"
            );
            return Err(failure.into());
        }
        debug!(item = %mv.item_id, from = %mv.from, to = %mv.to, "move applied");
    }
    Ok(())
}

/// Frees `target_date` for `incoming_id`, then places it there.
///
/// Plans the displacement chain from the snapshot, applies it, and
/// finishes with the final move the planner contract leaves to the
/// caller: the incoming item into the target slot. Returns the applied
/// displacement moves so the caller can report what was shuffled.
///
/// # Errors
///
/// Planning errors ([`EngineError::RippleDepthExceeded`],
/// [`EngineError::SearchExhausted`]) arrive before any write. Store
/// failures can leave part of the chain applied, as in [`apply_plan`].
pub fn place_with_displacement<S: ItemStore>(
    store: &mut S,
    template: &WeeklyTemplate,
    items: &[PublishedItem],
    incoming_id: &str,
    target_date: NaiveDate,
) -> Result<Vec<DisplacementMove>> {
    let incoming = store
        .get(incoming_id)?
        .ok_or_else(|| EngineError::ItemNotFound(incoming_id.to_string()))?;
    if !template.has_category(&incoming.category) {
        return Err(EngineError::UnknownCategory(incoming.category.clone()));
    }

    // The incoming item vacates its own slot by moving; it is never its
    // own obstacle.
    let mut occupants = occupants_by_date(&incoming.category, items);
    occupants.retain(|_, occupant| occupant.id != incoming.id);

    let moves = plan_displacement(template, &incoming.category, target_date, &occupants)?;
    apply_plan(store, template, &moves)?;

    let premium = premium_for(
        template,
        &incoming.category,
        Some(target_date),
        incoming.is_premium,
    );
    store.set_date(incoming_id, Some(target_date), premium)?;
    info!(
        item = %incoming_id,
        date = %target_date,
        displaced = moves.len(),
        "item placed"
    );
    Ok(moves)
}

/// Exchanges the publication dates of two same-category items.
///
/// Two items cannot transiently share a (date, category) slot, so the
/// exchange runs in three steps: park A in the backlog, give B A's
/// original date, give A B's original date, with premium flags recomputed per
/// the template for each new date. A failure at step 2 or 3 triggers a
/// best-effort restoration of the original dates; the compensation itself
/// can fail, which is logged and left to the operator. This is a manual
/// compensating-action sequence, not a transaction.
///
/// # Errors
///
/// [`EngineError::CategoryMismatch`] and [`EngineError::UnknownCategory`]
/// are rejected before any write. [`EngineError::ItemNotFound`] when
/// either id is unknown. Store failures pass through with the backend's
/// own message.
pub fn swap_dates<S: ItemStore>(
    store: &mut S,
    template: &WeeklyTemplate,
    id_a: &str,
    id_b: &str,
) -> Result<()> {
    let a = store
        .get(id_a)?
        .ok_or_else(|| EngineError::ItemNotFound(id_a.to_string()))?;
    let b = store
        .get(id_b)?
        .ok_or_else(|| EngineError::ItemNotFound(id_b.to_string()))?;

    if a.category != b.category {
        return Err(EngineError::CategoryMismatch {
            left: a.category,
            right: b.category,
        });
    }
    if !template.has_category(&a.category) {
        return Err(EngineError::UnknownCategory(a.category));
    }

    let date_a = a.date;
    let date_b = b.date;

    // Step 1: park A so B can take its slot.
    store.set_date(id_a, None, a.is_premium)?;

    // Step 2: B takes A's original date.
    let premium_b = premium_for(template, &b.category, date_a, b.is_premium);
    if let Err(step2) = store.set_date(id_b, date_a, premium_b) {
        warn!(item = %id_a, "swap step 2 failed; restoring original date of first item");
        if let Err(undo) = store.set_date(id_a, date_a, a.is_premium) {
            error!(item = %id_a, failure = %undo, "compensation failed; item left in backlog");
        }
        return Err(step2.into());
    }

    // Step 3: A takes B's original date.
    let premium_a = premium_for(template, &a.category, date_b, a.is_premium);
    if let Err(step3) = store.set_date(id_a, date_b, premium_a) {
        warn!(
            item_a = %id_a,
            item_b = %id_b,
            "swap step 3 failed; restoring original dates of both items"
        );
        if let Err(undo) = store.set_date(id_b, date_b, b.is_premium) {
            error!(item = %id_b, failure = %undo, "compensation failed for second item");
        }
        if let Err(undo) = store.set_date(id_a, date_a, a.is_premium) {
            error!(item = %id_a, failure = %undo, "compensation failed for first item");
        }
        return Err(step3.into());
    }

    info!(item_a = %id_a, item_b = %id_b, "dates swapped");
    Ok(())
}
