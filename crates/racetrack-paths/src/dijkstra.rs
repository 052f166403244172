use std::collections::{HashMap, HashSet};

use log::debug;
use racetrack_core::{Board, CellType, Point};

use crate::costs::SearchCosts;
use crate::frontier::Frontier;
use crate::pathnode::{NodeId, PathNode, PathTree};
use crate::waypoints::WaypointQueue;

/// Cost of stepping from `from` to the adjacent cell `to`.
///
/// `prev` is the cell the route occupied before `from` (`None` at the
/// search start) and determines the turn penalty.
///
/// - Walls cost [`SearchCosts::impassable`].
/// - Finish cells cost the same as open cells when the step matches their
///   crossing direction, and are impassable otherwise.
/// - Open cells cost `near_wall` if any neighbour is a wall, `open`
///   otherwise, plus `direction_penalty * (1 - cos θ)` where θ is the angle
///   between the previous step and this one.
pub fn edge_cost<B: Board + ?Sized>(
    board: &B,
    costs: &SearchCosts,
    prev: Option<Point>,
    from: Point,
    to: Point,
) -> f64 {
    let step = to - from;
    match board.classify(to) {
        CellType::Wall => costs.impassable,
        CellType::Open => open_cost(board, costs, prev, from, to),
        finish @ (CellType::FinishUp
        | CellType::FinishDown
        | CellType::FinishLeft
        | CellType::FinishRight) => {
            let crosses = match finish.finish_direction() {
                Some(dir) if dir.row != 0 => step.row == dir.row,
                Some(dir) => step.col == dir.col,
                None => unreachable!("finish cells always have a crossing direction"),
            };
            if crosses {
                open_cost(board, costs, prev, from, to)
            } else {
                costs.impassable
            }
        }
    }
}

fn open_cost<B: Board + ?Sized>(
    board: &B,
    costs: &SearchCosts,
    prev: Option<Point>,
    from: Point,
    to: Point,
) -> f64 {
    let base = if board.is_near_wall(to) {
        costs.near_wall
    } else {
        costs.open
    };
    let turn = match prev {
        Some(prev) => costs.direction_penalty * (1.0 - (from - prev).unit_dot(to - from)),
        None => 0.0,
    };
    base + turn
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Single-source Dijkstra search toward the nearest finish cell.
///
/// `PathFinder` owns the node arena, the frontier and the closed set, so
/// the tree produced by the last search stays available through
/// [`tree`](Self::tree) until the next search.
#[derive(Debug, Default)]
pub struct PathFinder {
    costs: SearchCosts,
    tree: PathTree,
    frontier: Frontier,
    /// Node holding each position seen so far.
    index: HashMap<Point, NodeId>,
    closed: HashSet<Point>,
    expanded: usize,
}

impl PathFinder {
    /// Create a path finder with the given edge costs.
    pub fn new(costs: SearchCosts) -> Self {
        Self {
            costs,
            ..Self::default()
        }
    }

    /// The edge costs in use.
    pub fn costs(&self) -> &SearchCosts {
        &self.costs
    }

    /// Nodes produced by the last search.
    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// Mutable access to the last search's nodes, e.g. for smoothing.
    pub fn tree_mut(&mut self) -> &mut PathTree {
        &mut self.tree
    }

    /// Number of nodes finalized by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Cost of stepping from node `from` to the adjacent cell `to`, taking
    /// `from`'s parent as the previous step.
    pub fn edge_cost<B: Board + ?Sized>(&self, board: &B, from: NodeId, to: Point) -> f64 {
        let prev = self.tree.parent(from).map(|p| self.tree.pos(p));
        edge_cost(board, &self.costs, prev, self.tree.pos(from), to)
    }

    fn reset(&mut self) {
        self.tree.clear();
        self.frontier.clear();
        self.index.clear();
        self.closed.clear();
        self.expanded = 0;
    }

    /// Search from `start` for the cheapest route to any finish cell.
    ///
    /// Returns the terminal node, whose parent chain in [`tree`](Self::tree)
    /// leads back to `start`, or `None` if every remaining route would
    /// have to pass through a wall.
    pub fn find_path<B: Board + ?Sized>(&mut self, board: &B, start: Point) -> Option<NodeId> {
        self.reset();

        let root = self.tree.push(PathNode {
            pos: start,
            parent: None,
            cost: 0.0,
        });
        self.index.insert(start, root);
        self.frontier.push(root, 0.0);

        while let Some((cur, cost)) = self.frontier.pop() {
            if cost >= self.costs.impassable {
                debug!(
                    "no route from {start}: {} walled-off nodes left after {} expansions",
                    self.frontier.len() + 1,
                    self.expanded
                );
                return None;
            }

            let pos = self.tree.pos(cur);
            if board.classify(pos).is_finish() {
                debug!(
                    "route from {start} reaches {pos} at cost {cost:.3} after {} expansions",
                    self.expanded
                );
                return Some(cur);
            }

            self.closed.insert(pos);
            self.expanded += 1;

            for nb in pos.neighbors_8() {
                if self.closed.contains(&nb) {
                    continue;
                }
                let tentative = cost + self.edge_cost(board, cur, nb);
                match self.index.get(&nb) {
                    Some(&id) => {
                        let node = self.tree.node_mut(id);
                        if tentative < node.cost {
                            node.cost = tentative;
                            node.parent = Some(cur);
                            self.frontier.decrease(id, tentative);
                        }
                    }
                    None => {
                        let id = self.tree.push(PathNode {
                            pos: nb,
                            parent: Some(cur),
                            cost: tentative,
                        });
                        self.index.insert(nb, id);
                        self.frontier.push(id, tentative);
                    }
                }
            }
        }

        debug!("no route from {start}: search space exhausted");
        None
    }

    /// Search, smooth and materialize the route from `start`.
    ///
    /// Returns an empty queue if no finish cell is reachable.
    pub fn plan<B: Board + ?Sized>(&mut self, board: &B, start: Point) -> WaypointQueue {
        let Some(end) = self.find_path(board, start) else {
            return WaypointQueue::default();
        };
        let splices = self.tree.smooth(board, end);
        let queue = WaypointQueue::from_tree(&self.tree, end);
        debug!(
            "planned {} waypoints from {start} ({splices} spliced)",
            queue.len()
        );
        queue
    }
}
