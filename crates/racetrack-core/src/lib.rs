//! **racetrack-core** — core types for vector racetrack games.
//!
//! This crate provides the pieces every other racetrack crate builds on:
//! integer grid geometry, exact line rasterization, cell classification
//! through the [`Board`] trait, a text-parsed [`Track`], and the [`Race`]
//! turn resolver that moves cars and detects crashes and wins.

pub mod board;
pub mod geom;
pub mod line;
pub mod race;
pub mod track;

pub use board::{Board, CellType};
pub use geom::{Axis, Point};
pub use line::rasterize;
pub use race::{Car, Race, TurnOutcome};
pub use track::{MAX_CARS, Track, TrackError};
