//! Turn-by-turn driving for racetrack cars.
//!
//! A car cannot steer directly: each turn it may only change its velocity
//! by at most one cell per axis, and then it coasts. [`MotionPlanner`]
//! follows a [`WaypointQueue`](racetrack_paths::WaypointQueue) by choosing,
//! every turn, one of the nine accelerations in `{-1, 0, 1}²`.
//!
//! The choice depends on a [`Phase`] picked fresh each turn:
//!
//! | Phase | When | Prefers |
//! |---|---|---|
//! | [`Phase::LongDistance`] | moving away from the target, or target beyond stopping distance | best alignment, then speed |
//! | [`Phase::Decelerate`] | within stopping distance, still faster than 1 on an axis | lowest speed, then alignment |
//! | [`Phase::Limp`] | otherwise | speeds within ±1, then alignment |
//!
//! Candidates that would end the turn on a wall are never chosen while any
//! other candidate remains.

mod phase;
mod planner;

pub use phase::{Candidate, Phase, stopping_distance};
pub use planner::{MotionPlanner, PlannerConfig, choose_acceleration};
