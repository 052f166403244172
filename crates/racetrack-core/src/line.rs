//! Exact rasterization of straight moves.
//!
//! [`rasterize`] returns every cell a straight segment between two cell
//! centres passes through. Both the planner (line-of-sight tests) and the
//! race resolver (crash detection) use this one function, so they always
//! agree on which cells a move crosses.
//!
//! The walk goes one cell at a time along the dominant axis (the one with
//! the larger displacement). At each cell centre, and again at the cell
//! edge half a step further on, the line's position on the secondary axis
//! is interpolated:
//!
//! - at the centre, the single cell containing that position is claimed;
//! - at the edge, the two cells on either side of the edge are claimed.
//!
//! When the interpolated position lies exactly on a boundary between two
//! cells (a half-integer), nothing is claimed for that evaluation. This
//! lets a diagonal move slip between two walls that only touch at a
//! corner.

use std::collections::BTreeSet;

use crate::geom::{Axis, Point};

/// Tolerance of the half-integer boundary test.
pub const EPSILON: f64 = 1e-8;

/// Whether `value` lies within [`EPSILON`] of some `n + 0.5`.
#[inline]
pub fn is_half_integer(value: f64) -> bool {
    let shifted = value - 0.5;
    (shifted - shifted.round()).abs() < EPSILON
}

/// The set of cells crossed by a straight move from `start` to `end`.
///
/// The result always contains both endpoints. `rasterize(p, p)` is `{p}`.
/// Displacements are taken in `i64`, so any pair of points is accepted;
/// the work is proportional to the length of the move.
pub fn rasterize(start: Point, end: Point) -> BTreeSet<Point> {
    let mut cells = BTreeSet::new();
    if start == end {
        cells.insert(start);
        return cells;
    }

    let delta = |axis: Axis| i64::from(end.get(axis)) - i64::from(start.get(axis));
    // Ties go to the column axis.
    let main = if delta(Axis::Row).abs() > delta(Axis::Col).abs() {
        Axis::Row
    } else {
        Axis::Col
    };
    let second = main.other();
    let length = delta(main).abs();
    let step = delta(main).signum();
    let slope = delta(second) as f64 / delta(main) as f64;

    let second_start = f64::from(start.get(second));
    let height_at = |offset: f64| slope * offset + second_start;
    // `k` never exceeds `length`, so the coordinate stays between the
    // endpoints and fits in an `i32`.
    let cell = |k: i64, s: f64| {
        let m = i64::from(start.get(main)) + step * k;
        Point::ZERO.with(main, m as i32).with(second, s.round() as i32)
    };

    for k in 0..length {
        let offset = (step * k) as f64;
        let s = height_at(offset);
        if !is_half_integer(s) {
            cells.insert(cell(k, s));
        }

        let s_half = height_at(offset + step as f64 * 0.5);
        if !is_half_integer(s_half) {
            cells.insert(cell(k, s_half));
            cells.insert(cell(k + 1, s_half));
        }
    }

    cells.insert(end);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(points: &[(i32, i32)]) -> BTreeSet<Point> {
        points.iter().map(|&(r, c)| Point::new(r, c)).collect()
    }

    #[test]
    fn single_point() {
        let p = Point::new(4, -2);
        assert_eq!(rasterize(p, p), set(&[(4, -2)]));
    }

    #[test]
    fn horizontal_line() {
        assert_eq!(
            rasterize(Point::new(0, 0), Point::new(0, 3)),
            set(&[(0, 0), (0, 1), (0, 2), (0, 3)])
        );
    }

    #[test]
    fn vertical_line_backwards() {
        assert_eq!(
            rasterize(Point::new(2, 5), Point::new(-1, 5)),
            set(&[(2, 5), (1, 5), (0, 5), (-1, 5)])
        );
    }

    #[test]
    fn exact_diagonal_skips_corner_cells() {
        assert_eq!(
            rasterize(Point::new(0, 0), Point::new(2, 2)),
            set(&[(0, 0), (1, 1), (2, 2)])
        );
        assert_eq!(
            rasterize(Point::new(0, 0), Point::new(-2, 2)),
            set(&[(0, 0), (-1, 1), (-2, 2)])
        );
    }

    #[test]
    fn knight_move_claims_both_cells_at_edge() {
        // Slope 1/2: the centre of column 1 sits on a row boundary.
        assert_eq!(
            rasterize(Point::new(0, 0), Point::new(1, 2)),
            set(&[(0, 0), (0, 1), (1, 1), (1, 2)])
        );
    }

    #[test]
    fn shallow_line_through_a_corner() {
        // Slope 1/3 meets the edge between columns 1 and 2 exactly at a
        // cell corner, so that edge claims nothing.
        assert_eq!(
            rasterize(Point::new(0, 0), Point::new(1, 3)),
            set(&[(0, 0), (0, 1), (1, 2), (1, 3)])
        );
    }

    #[test]
    fn always_contains_endpoints() {
        for r in -4..=4 {
            for c in -4..=4 {
                let a = Point::new(1, -1);
                let b = Point::new(r, c);
                let cells = rasterize(a, b);
                assert!(cells.contains(&a), "{a} -> {b} misses start");
                assert!(cells.contains(&b), "{a} -> {b} misses end");
            }
        }
    }

    #[test]
    fn symmetric_under_reversal_for_axis_and_diagonal_moves() {
        let a = Point::new(3, 3);
        for d in [Point::new(0, 4), Point::new(-5, 0), Point::new(3, -3)] {
            assert_eq!(rasterize(a, a + d), rasterize(a + d, a));
        }
    }

    #[test]
    fn moves_at_the_edge_of_the_coordinate_range() {
        let a = Point::new(i32::MAX, i32::MIN);
        let b = Point::new(i32::MAX - 2, i32::MIN + 1);
        let expected: BTreeSet<Point> = [
            a,
            Point::new(i32::MAX - 1, i32::MIN),
            Point::new(i32::MAX - 1, i32::MIN + 1),
            b,
        ]
        .into_iter()
        .collect();
        assert_eq!(rasterize(a, b), expected);

        let c = Point::new(i32::MIN, i32::MAX - 3);
        assert_eq!(rasterize(c, Point::new(i32::MIN, i32::MAX)).len(), 4);
    }

    #[test]
    fn half_integer_detection() {
        assert!(is_half_integer(0.5));
        assert!(is_half_integer(-1.5));
        assert!(is_half_integer(2.5 + 1e-10));
        assert!(is_half_integer(2.5 - 1e-10));
        assert!(!is_half_integer(2.0));
        assert!(!is_half_integer(2.4));
    }
}
