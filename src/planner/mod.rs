//! Slot search and displacement planning.
//!
//! Both planners are pure functions over the template and a snapshot of
//! items; neither touches storage. The slot finder walks forward from a
//! start date over a bounded horizon; the displacement planner runs a
//! depth-first search over the implicit conflict graph (nodes = dates,
//! edges = "occupant must relocate") with an explicit failure at its
//! depth bound.

mod displacement;
mod slots;

pub use displacement::{
    occupants_by_date, plan_displacement, DisplacementMove, MAX_RIPPLE_DEPTH,
};
pub use slots::{next_available, occupied_dates, AvailableSlot, MAX_DISPLACEMENT_DAYS};
