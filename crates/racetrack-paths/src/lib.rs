//! Route planning for racetrack boards.
//!
//! This crate finds a cheap route from a start cell to any finish cell and
//! compacts it into a short list of waypoints:
//!
//! - **Search**: single-source Dijkstra over the 8-neighbour grid
//!   ([`PathFinder::find_path`]). Edge costs depend on wall proximity, on the
//!   required crossing direction of finish cells, and on how sharply the
//!   route turns ([`edge_cost`]).
//! - **Smoothing**: waypoints that can be skipped without losing line of
//!   sight are spliced out of the route ([`PathTree::smooth`]).
//! - **Waypoints**: the smoothed route is materialized as a
//!   [`WaypointQueue`], consumed front to back by a driver.
//!
//! [`plan`] runs all three steps with the default [`SearchCosts`].

mod costs;
mod dijkstra;
mod frontier;
mod pathnode;
mod smooth;
mod waypoints;

pub use costs::{IMPASSABLE, SearchCosts};
pub use dijkstra::{PathFinder, edge_cost};
pub use pathnode::{NodeId, PathNode, PathTree};
pub use waypoints::{WaypointQueue, plan, plan_with};
