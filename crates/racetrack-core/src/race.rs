//! Turn resolution: moving cars, crashing them, and declaring a winner.
//!
//! Each turn the current car adds an acceleration to its velocity and then
//! travels in a straight line by that velocity. The cells crossed come
//! from [`rasterize`], the same function the planner uses for its
//! line-of-sight checks.

use std::fmt;

use log::info;

use crate::board::{Board, CellType};
use crate::geom::{Axis, Point};
use crate::line::rasterize;
use crate::track::Track;

/// A car's kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Car {
    pub position: Point,
    pub velocity: Point,
    pub crashed: bool,
}

impl Car {
    /// A stationary car at `position`.
    pub const fn new(position: Point) -> Self {
        Self {
            position,
            velocity: Point::ZERO,
            crashed: false,
        }
    }

    /// Where the car ends up if it moves at its current velocity.
    pub fn next_position(&self) -> Point {
        self.position + self.velocity
    }
}

/// Result of a single [`Race::do_turn`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The car moved to its destination.
    Moved,
    /// The car crashed at the given cell.
    Crashed(Point),
    /// The car crossed the finish at the given cell and won.
    Won(Point),
    /// Nothing happened: the race is over or the car is out.
    Skipped,
}

/// A race between the cars placed on a [`Track`]'s start positions.
#[derive(Debug, Clone)]
pub struct Race {
    track: Track,
    cars: Vec<Car>,
    current: usize,
    winner: Option<usize>,
}

impl Race {
    /// Start a race with one stationary car per start position.
    pub fn new(track: Track) -> Self {
        let cars = track.starts().iter().map(|&p| Car::new(p)).collect();
        Self {
            track,
            cars,
            current: 0,
            winner: None,
        }
    }

    /// The track being raced on.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// All cars, indexed by start order.
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// The car at index `i`.
    pub fn car(&self, i: usize) -> Option<&Car> {
        self.cars.get(i)
    }

    /// Index of the car whose turn it is.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the winning car, once there is one.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Whether the race can make no further progress.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.cars.iter().all(|c| c.crashed)
    }

    /// Apply `acceleration` (each component clamped to [-1, 1]) to the
    /// current car, move it, and pass the turn to the next running car.
    pub fn do_turn(&mut self, acceleration: Point) -> TurnOutcome {
        let idx = self.current;
        if self.winner.is_some() || self.cars.get(idx).is_none_or(|c| c.crashed) {
            return TurnOutcome::Skipped;
        }

        self.cars[idx].velocity = self.cars[idx].velocity + acceleration.clamp_unit();
        let outcome = self.move_car(idx);

        match outcome {
            TurnOutcome::Crashed(at) => {
                info!("car {} crashed at {at}", idx + 1);
                let mut running = self.cars.iter().enumerate().filter(|(_, c)| !c.crashed);
                if let (Some((last, _)), None) = (running.next(), running.next()) {
                    info!("car {} wins as the last car running", last + 1);
                    self.winner = Some(last);
                }
            }
            TurnOutcome::Won(at) => info!("car {} crossed the finish at {at}", idx + 1),
            TurnOutcome::Moved | TurnOutcome::Skipped => {}
        }

        self.current = self.next_running(idx);
        outcome
    }

    fn next_running(&self, from: usize) -> usize {
        let n = self.cars.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&i| !self.cars[i].crashed)
            .unwrap_or(from)
    }

    fn occupied_by_other(&self, idx: usize, p: Point) -> bool {
        self.cars
            .iter()
            .enumerate()
            .any(|(i, c)| i != idx && c.position == p)
    }

    fn move_car(&mut self, idx: usize) -> TurnOutcome {
        let car = self.cars[idx];
        let start = car.position;
        let end = car.next_position();

        let mut cells: Vec<Point> = rasterize(start, end).into_iter().collect();
        cells.sort_by_key(|&p| ((p - start).norm_sq(), p));

        let mut finish: Option<(Point, Point)> = None;
        for p in cells {
            match self.track.classify(p) {
                CellType::Wall => {
                    let car = &mut self.cars[idx];
                    car.crashed = true;
                    car.position = p;
                    return TurnOutcome::Crashed(p);
                }
                CellType::Open => {}
                finish_cell => {
                    if let Some(dir) = finish_cell.finish_direction() {
                        // Crossing direction accumulates per axis; the
                        // farthest finish cell is where the car stops.
                        let needed = Axis::ALL.into_iter().fold(
                            finish.map_or(Point::ZERO, |(_, d)| d),
                            |acc, axis| match dir.get(axis) {
                                0 => acc,
                                v => acc.with(axis, v),
                            },
                        );
                        finish = Some((p, needed));
                    }
                }
            }
        }

        if self.occupied_by_other(idx, end) {
            let car = &mut self.cars[idx];
            car.crashed = true;
            car.position = end;
            return TurnOutcome::Crashed(end);
        }

        if let Some((at, needed)) = finish {
            let velocity = car.velocity.signum();
            let valid = Axis::ALL
                .into_iter()
                .all(|axis| needed.get(axis) == 0 || needed.get(axis) == velocity.get(axis));
            if valid {
                self.cars[idx].position = at;
                self.winner = Some(idx);
                return TurnOutcome::Won(at);
            }
        }

        self.cars[idx].position = end;
        TurnOutcome::Moved
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.track.height() {
            for col in 0..self.track.width() {
                let p = Point::new(row, col);
                let rune = match self.cars.iter().position(|c| c.position == p) {
                    Some(i) if self.cars[i].crashed => 'X',
                    Some(i) => char::from_digit(i as u32 + 1, 10).unwrap_or('?'),
                    None => self.track.classify(p).rune(),
                };
                write!(f, "{rune}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRAIGHT: &str = "\
##########
#1      >#
#2      >#
##########";

    fn race() -> Race {
        Race::new(Track::parse(STRAIGHT).unwrap())
    }

    #[test]
    fn cars_start_stationary_in_order() {
        let r = race();
        assert_eq!(r.cars().len(), 2);
        assert_eq!(r.car(0).unwrap().position, Point::new(1, 1));
        assert_eq!(r.car(1).unwrap().velocity, Point::ZERO);
        assert_eq!(r.current(), 0);
    }

    #[test]
    fn move_and_alternate_turns() {
        let mut r = race();
        assert_eq!(r.do_turn(Point::new(0, 1)), TurnOutcome::Moved);
        assert_eq!(r.car(0).unwrap().position, Point::new(1, 2));
        assert_eq!(r.current(), 1);
        assert_eq!(r.do_turn(Point::ZERO), TurnOutcome::Moved);
        assert_eq!(r.current(), 0);
        assert_eq!(r.do_turn(Point::ZERO), TurnOutcome::Moved);
        assert_eq!(r.car(0).unwrap().position, Point::new(1, 3));
    }

    #[test]
    fn acceleration_is_clamped() {
        let mut r = race();
        r.do_turn(Point::new(0, 5));
        assert_eq!(r.car(0).unwrap().velocity, Point::new(0, 1));
    }

    #[test]
    fn wall_crash_stops_at_first_wall() {
        let mut r = race();
        assert_eq!(r.do_turn(Point::new(-1, 0)), TurnOutcome::Crashed(Point::new(0, 1)));
        let car = r.car(0).unwrap();
        assert!(car.crashed);
        // The other car is the last one running.
        assert_eq!(r.winner(), Some(1));
        assert!(r.is_over());
    }

    #[test]
    fn collision_with_other_car() {
        let mut r = race();
        assert_eq!(r.do_turn(Point::new(1, 0)), TurnOutcome::Crashed(Point::new(2, 1)));
    }

    #[test]
    fn crossing_finish_in_right_direction_wins() {
        let mut r = race();
        let mut outcome = TurnOutcome::Skipped;
        for _ in 0..20 {
            if r.current() == 0 {
                let v = r.car(0).unwrap().velocity;
                let accel = if v.col < 2 { Point::new(0, 1) } else { Point::ZERO };
                outcome = r.do_turn(accel);
            } else {
                r.do_turn(Point::ZERO);
            }
            if r.is_over() {
                break;
            }
        }
        assert_eq!(outcome, TurnOutcome::Won(Point::new(1, 8)));
        assert_eq!(r.winner(), Some(0));
        assert_eq!(r.do_turn(Point::ZERO), TurnOutcome::Skipped);
    }

    #[test]
    fn crossing_finish_backwards_does_not_win() {
        let track = Track::parse("#######\n#  >1 #\n#######").unwrap();
        let mut r = Race::new(track);
        assert_eq!(r.do_turn(Point::new(0, -1)), TurnOutcome::Moved);
        assert_eq!(r.car(0).unwrap().position, Point::new(1, 3));
        assert_eq!(r.winner(), None);
    }

    #[test]
    fn display_overlays_cars() {
        let mut r = race();
        r.do_turn(Point::new(-1, 0));
        let s = r.to_string();
        assert_eq!(s.lines().next(), Some("#X########"));
        assert_eq!(s.lines().nth(2), Some("#2      >#"));
    }
}
