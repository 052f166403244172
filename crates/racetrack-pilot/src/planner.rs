use log::{debug, warn};
use racetrack_core::{Board, CellType, Point};
use racetrack_paths::{SearchCosts, WaypointQueue};

use crate::phase::{Candidate, Phase};

/// Tuning for [`MotionPlanner`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Alignments closer than this are considered equal while racing
    /// toward a distant waypoint, leaving speed to break the tie.
    pub alignment_cutoff: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            alignment_cutoff: 0.01,
        }
    }
}

impl PlannerConfig {
    pub fn with_alignment_cutoff(mut self, cutoff: f64) -> Self {
        self.alignment_cutoff = cutoff;
        self
    }
}

/// Choose this turn's acceleration for a car heading to `target`.
///
/// Candidates are ranked by the [`Phase`] for the current state, and the
/// first one whose end position is not a wall wins. If all nine end on a
/// wall, the result is zero.
pub fn choose_acceleration<B: Board + ?Sized>(
    board: &B,
    position: Point,
    velocity: Point,
    target: Point,
    config: &PlannerConfig,
) -> Point {
    let phase = Phase::select(position, velocity, target);
    let heading = target - position;
    let candidates = Candidate::all(position, velocity);
    let choice = phase
        .rank(&candidates, heading, config.alignment_cutoff)
        .into_iter()
        .find(|c| board.classify(c.position) != CellType::Wall);
    match choice {
        Some(c) => {
            debug!(
                "{phase:?} at {position} v={velocity} toward {target}: accelerate {}",
                c.acceleration
            );
            c.acceleration
        }
        None => {
            debug!("{phase:?} at {position} v={velocity}: every move hits a wall");
            Point::ZERO
        }
    }
}

/// Drives one car along a queue of waypoints.
///
/// The current target is taken from the queue on creation and replaced by
/// the next waypoint whenever the car stands on it.
#[derive(Debug, Clone)]
pub struct MotionPlanner {
    waypoints: WaypointQueue,
    target: Option<Point>,
    config: PlannerConfig,
}

impl MotionPlanner {
    /// Follow `waypoints` with the default configuration.
    pub fn new(waypoints: WaypointQueue) -> Self {
        Self::with_config(waypoints, PlannerConfig::default())
    }

    pub fn with_config(mut waypoints: WaypointQueue, config: PlannerConfig) -> Self {
        let target = waypoints.pop_next();
        if target.is_none() {
            warn!("motion planner created without waypoints");
        }
        Self {
            waypoints,
            target,
            config,
        }
    }

    /// Plan a route from `start` with default costs and follow it.
    pub fn plan<B: Board + ?Sized>(board: &B, start: Point) -> Self {
        Self::new(racetrack_paths::plan(board, start))
    }

    /// Plan a route from `start` with explicit costs and configuration.
    pub fn plan_with<B: Board + ?Sized>(
        board: &B,
        start: Point,
        costs: SearchCosts,
        config: PlannerConfig,
    ) -> Self {
        Self::with_config(racetrack_paths::plan_with(board, start, costs), config)
    }

    /// The waypoint currently steered toward, if any.
    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Waypoints after the current target.
    pub fn waypoints(&self) -> &WaypointQueue {
        &self.waypoints
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Choose the acceleration for a car at `position` moving at
    /// `velocity`.
    ///
    /// Reaching the current target advances to the next waypoint first.
    /// With no target left, the car coasts.
    pub fn choose_acceleration<B: Board + ?Sized>(
        &mut self,
        board: &B,
        position: Point,
        velocity: Point,
    ) -> Point {
        if self.target == Some(position) {
            self.target = self.waypoints.pop_next();
            debug!(
                "reached waypoint {position}, next {:?} ({} left)",
                self.target,
                self.waypoints.len()
            );
        }
        match self.target {
            Some(target) => choose_acceleration(board, position, velocity, target, &self.config),
            None => Point::ZERO,
        }
    }
}
