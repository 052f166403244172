//! Route smoothing by line-of-sight splicing.
//!
//! For each triple `end → middle → anchor` along a route, if a straight
//! move from `end` to `anchor` crosses no wall, `middle` is unnecessary and
//! `end` is re-linked directly to `anchor`. Passes repeat until one makes
//! no change.

use log::trace;
use racetrack_core::Board;

use crate::pathnode::{NodeId, PathTree};

impl PathTree {
    /// Remove redundant waypoints from the chain ending at `end`.
    ///
    /// Only parent links are rewritten; the arena keeps every node, and the
    /// chain still starts and ends at the same positions. Returns the
    /// number of nodes spliced out.
    pub fn smooth<B: Board + ?Sized>(&mut self, board: &B, end: NodeId) -> usize {
        let mut total = 0;
        loop {
            let spliced = self.smooth_pass(board, end);
            if spliced == 0 {
                return total;
            }
            total += spliced;
        }
    }

    /// One walk from `end` toward the root, splicing where possible.
    pub(crate) fn smooth_pass<B: Board + ?Sized>(&mut self, board: &B, end: NodeId) -> usize {
        let mut spliced = 0;
        let mut cursor = end;
        while let Some(middle) = self.parent(cursor) {
            let Some(anchor) = self.parent(middle) else {
                break;
            };
            if board.has_line_of_sight(self.pos(cursor), self.pos(anchor)) {
                trace!(
                    "splice {} between {} and {}",
                    self.pos(middle),
                    self.pos(cursor),
                    self.pos(anchor)
                );
                self.set_parent(cursor, Some(anchor));
                spliced += 1;
            }
            match self.parent(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        spliced
    }
}

#[cfg(test)]
mod tests {
    use crate::PathFinder;
    use racetrack_core::{Board, CellType, Point, Track, rasterize};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    const ELBOW: &str = "\
##########
#1       #
######## #
######## #
########v#
##########";

    fn assert_clear_segments(track: &Track, path: &[Point]) {
        for pair in path.windows(2) {
            for p in rasterize(pair[0], pair[1]) {
                assert!(
                    !track.is_wall(p),
                    "segment {} -> {} crosses wall {p}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn straight_corridor_collapses_to_endpoints() {
        let track = Track::parse("########\n#1    >#\n########").unwrap();
        let mut pf = PathFinder::default();
        let end = pf.find_path(&track, track.starts()[0]).unwrap();
        let raw = pf.tree().positions(end).len();
        let spliced = pf.tree_mut().smooth(&track, end);
        assert_eq!(spliced, raw - 2);
        assert_eq!(
            pf.tree().positions(end),
            vec![Point::new(1, 1), Point::new(1, 6)]
        );
    }

    #[test]
    fn elbow_keeps_the_corner() {
        let track = Track::parse(ELBOW).unwrap();
        let mut pf = PathFinder::default();
        let end = pf.find_path(&track, track.starts()[0]).unwrap();
        pf.tree_mut().smooth(&track, end);
        let path = pf.tree().positions(end);
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(4, 8)));
        assert!(path.len() >= 3, "corner was cut: {path:?}");
        assert_clear_segments(&track, &path);
    }

    #[test]
    fn smoothing_is_idempotent() {
        let track = Track::parse(ELBOW).unwrap();
        let mut pf = PathFinder::default();
        let end = pf.find_path(&track, track.starts()[0]).unwrap();
        pf.tree_mut().smooth(&track, end);
        let once = pf.tree().positions(end);
        assert_eq!(pf.tree_mut().smooth(&track, end), 0);
        assert_eq!(pf.tree().positions(end), once);
    }

    #[test]
    fn short_chains_are_left_alone() {
        let track = Track::parse("####\n#1>#\n####").unwrap();
        let mut pf = PathFinder::default();
        let end = pf.find_path(&track, track.starts()[0]).unwrap();
        assert_eq!(pf.tree_mut().smooth(&track, end), 0);
        assert_eq!(pf.tree().positions(end).len(), 2);
    }

    #[test]
    fn random_boards_smooth_to_clear_segments() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..40 {
            let mut track = Track::filled(20, 14, CellType::Open);
            for row in 0..14 {
                for col in 0..20 {
                    let edge = row == 0 || row == 13 || col == 0 || col == 19;
                    if edge || rng.random_bool(0.25) {
                        track.set(Point::new(row, col), CellType::Wall);
                    }
                }
            }
            track.set(Point::new(rng.random_range(1..13), 18), CellType::FinishRight);
            let start = Point::new(rng.random_range(1..13), 1);
            track.set(start, CellType::Open);

            let mut pf = PathFinder::default();
            let Some(end) = pf.find_path(&track, start) else {
                continue;
            };
            let raw = pf.tree().positions(end);
            pf.tree_mut().smooth(&track, end);
            let smooth = pf.tree().positions(end);

            assert_eq!(smooth.first(), raw.first());
            assert_eq!(smooth.last(), raw.last());
            assert!(smooth.len() <= raw.len());
            assert!(smooth.iter().all(|p| raw.contains(p)));
            assert_clear_segments(&track, &smooth);
            assert_eq!(pf.tree_mut().smooth(&track, end), 0);
        }
    }
}
