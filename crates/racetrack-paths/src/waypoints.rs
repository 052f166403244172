use std::collections::VecDeque;

use racetrack_core::{Board, Point};

use crate::costs::SearchCosts;
use crate::dijkstra::PathFinder;
use crate::pathnode::{NodeId, PathTree};

/// Ordered cells a driver steers through, consumed front to back.
///
/// The first waypoint is the route's start cell and the last is the
/// finish cell. Once drained, a queue stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointQueue {
    points: VecDeque<Point>,
}

impl WaypointQueue {
    /// Build a queue from waypoints in travel order.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Materialize the chain ending at `end`, start first.
    pub fn from_tree(tree: &PathTree, end: NodeId) -> Self {
        Self::new(tree.positions(end))
    }

    /// The next waypoint, without removing it.
    pub fn peek_next(&self) -> Option<Point> {
        self.points.front().copied()
    }

    /// Remove and return the next waypoint.
    pub fn pop_next(&mut self) -> Option<Point> {
        self.points.pop_front()
    }

    /// Number of waypoints left.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no waypoints are left.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remaining waypoints in order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

/// Plan a smoothed route from `start` to the nearest finish using the
/// default [`SearchCosts`].
///
/// The queue is empty if no finish is reachable.
pub fn plan<B: Board + ?Sized>(board: &B, start: Point) -> WaypointQueue {
    plan_with(board, start, SearchCosts::default())
}

/// Like [`plan`], with explicit edge costs.
pub fn plan_with<B: Board + ?Sized>(
    board: &B,
    start: Point,
    costs: SearchCosts,
) -> WaypointQueue {
    PathFinder::new(costs).plan(board, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use racetrack_core::Track;

    const HAIRPIN: &str = "\
############
#1         #
########## #
#          #
#v##########
############";

    #[test]
    fn peek_and_pop() {
        let mut q = WaypointQueue::new([Point::new(0, 0), Point::new(2, 3)]);
        assert_eq!(q.peek_next(), Some(Point::new(0, 0)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop_next(), Some(Point::new(0, 0)));
        assert_eq!(q.peek_next(), Some(Point::new(2, 3)));
        assert_eq!(q.pop_next(), Some(Point::new(2, 3)));
        assert_eq!(q.pop_next(), None);
        assert_eq!(q.peek_next(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn plan_runs_start_to_finish() {
        let track = Track::parse(HAIRPIN).unwrap();
        let q = plan(&track, track.starts()[0]);
        let points: Vec<Point> = q.iter().collect();
        assert_eq!(points.first(), Some(&Point::new(1, 1)));
        assert_eq!(points.last(), Some(&Point::new(4, 1)));
        for pair in points.windows(2) {
            assert!(track.has_line_of_sight(pair[0], pair[1]));
        }
    }

    #[test]
    fn plan_with_custom_costs() {
        let track = Track::parse(HAIRPIN).unwrap();
        let costs = SearchCosts::new().with_near_wall(1.0);
        let q = plan_with(&track, track.starts()[0], costs);
        assert_eq!(q.iter().last(), Some(Point::new(4, 1)));
    }

    #[test]
    fn unreachable_plan_is_empty() {
        let track = Track::parse("#######\n#1#  v#\n#######").unwrap();
        assert!(plan(&track, track.starts()[0]).is_empty());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn queue_round_trip() {
        let q = WaypointQueue::new([Point::new(1, 1), Point::new(4, 7)]);
        let json = serde_json::to_string(&q).unwrap();
        let back: WaypointQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}
