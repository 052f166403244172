use std::cmp::Ordering;

use racetrack_core::{Axis, Point};

/// One of the nine possible accelerations and where it leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub acceleration: Point,
    /// Velocity after applying `acceleration`.
    pub velocity: Point,
    /// Position after moving at `velocity`.
    pub position: Point,
}

impl Candidate {
    /// The candidate reached by applying `acceleration`.
    pub fn new(position: Point, velocity: Point, acceleration: Point) -> Self {
        let velocity = velocity + acceleration;
        Self {
            acceleration,
            velocity,
            position: position + velocity,
        }
    }

    /// All nine candidates, in row-major acceleration order.
    pub fn all(position: Point, velocity: Point) -> [Candidate; 9] {
        std::array::from_fn(|i| {
            let accel = Point::new(i as i32 / 3 - 1, i as i32 % 3 - 1);
            Candidate::new(position, velocity, accel)
        })
    }

    fn is_slow(&self) -> bool {
        self.velocity.row.abs() <= 1 && self.velocity.col.abs() <= 1
    }

    fn total_speed(&self) -> i32 {
        self.velocity.row.abs() + self.velocity.col.abs()
    }
}

/// Cells needed on each axis to come to rest from `velocity` by
/// decelerating one unit per turn: `speed * (speed + 1) / 2`.
///
/// Saturates at `i32::MAX` for speeds too large to represent the result.
pub fn stopping_distance(velocity: Point) -> Point {
    let per_axis = |v: i32| {
        let speed = i64::from(v.unsigned_abs());
        i32::try_from(speed * (speed + 1) / 2).unwrap_or(i32::MAX)
    };
    Point::new(per_axis(velocity.row), per_axis(velocity.col))
}

/// Whether some velocity component points away from the target. A zero
/// velocity or zero distance on an axis is never wrong.
fn is_wrong_direction(position: Point, velocity: Point, target: Point) -> bool {
    let to_target = (target - position).signum();
    let heading = velocity.signum();
    Axis::ALL.into_iter().any(|axis| {
        let (d, v) = (to_target.get(axis), heading.get(axis));
        d != 0 && v != 0 && d != v
    })
}

/// Whether the target lies beyond the stopping distance of `velocity`,
/// measured from `position`, on either axis.
fn is_past_stopping_distance(position: Point, velocity: Point, target: Point) -> bool {
    let stop = stopping_distance(velocity);
    let remaining = target - position;
    Axis::ALL
        .into_iter()
        .any(|axis| remaining.get(axis).abs() > stop.get(axis))
}

/// Driving mode for one turn; each mode ranks candidates differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Far from the target: head straight for it as fast as possible.
    LongDistance,
    /// Close enough that speed must come down.
    Decelerate,
    /// Creep toward the target at unit speed.
    Limp,
}

impl Phase {
    /// Pick the phase for a car at `position` moving at `velocity`.
    pub fn select(position: Point, velocity: Point, target: Point) -> Self {
        if is_wrong_direction(position, velocity, target)
            || is_past_stopping_distance(position + velocity, velocity, target)
        {
            Phase::LongDistance
        } else if velocity.row.abs() > 1 || velocity.col.abs() > 1 {
            Phase::Decelerate
        } else {
            Phase::Limp
        }
    }

    /// Order two candidates: `Less` means `a` is preferred.
    ///
    /// `heading` is the displacement from the car to its target. Under
    /// [`LongDistance`](Phase::LongDistance), alignments closer than
    /// `cutoff` count as equal and speed decides, which makes that
    /// ordering non-transitive.
    pub fn compare(self, a: &Candidate, b: &Candidate, heading: Point, cutoff: f64) -> Ordering {
        let align_a = heading.unit_dot(a.velocity);
        let align_b = heading.unit_dot(b.velocity);
        match self {
            Phase::LongDistance => match (a.velocity.is_zero(), b.velocity.is_zero()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let diff = align_b - align_a;
                    if diff.abs() < cutoff {
                        b.velocity.norm_sq().cmp(&a.velocity.norm_sq())
                    } else if diff < 0.0 {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    }
                }
            },
            Phase::Decelerate => a
                .total_speed()
                .cmp(&b.total_speed())
                .then_with(|| align_b.total_cmp(&align_a)),
            Phase::Limp => b
                .is_slow()
                .cmp(&a.is_slow())
                .then_with(|| align_b.total_cmp(&align_a)),
        }
    }

    /// All candidates from best to worst.
    ///
    /// Repeatedly takes the best remaining candidate with a linear scan,
    /// so a non-transitive ordering still yields a deterministic ranking.
    pub fn rank(self, candidates: &[Candidate], heading: Point, cutoff: f64) -> Vec<Candidate> {
        let mut remaining = candidates.to_vec();
        let mut ranked = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let best = (1..remaining.len()).fold(0, |best, i| {
                match self.compare(&remaining[i], &remaining[best], heading, cutoff) {
                    Ordering::Less => i,
                    _ => best,
                }
            });
            ranked.push(remaining.remove(best));
        }
        ranked
    }
}
