//! # spawn_pathfinding
//!
//! Multi-source grid pathfinding for maps where many spawn points share a single destination.
//! Paths are 8-connected and may not cut wall corners. Costs follow the
//! [octile distance](https://theory.stanford.edu/~amitp/GameProgramming/Heuristics.html#diagonal-distance)
//! with integer weights [C] for straight steps and [D] for diagonal steps.
//!
//! Several interchangeable [solver::PathSolver] implementations are provided:
//! forward A*, Dijkstra, a reverse Dijkstra that computes one shortest-path tree rooted at the
//! destination and reads every source's path off it, and a parallel solver that runs the
//! per-source searches on a [rayon] pool. [PathFinder] wraps whichever solver is selected.
pub mod error;
pub mod node;
pub mod path_finder;
pub mod pathing_grid;
pub mod priority_queue;
mod search;
pub mod solver;
pub mod terrain;

pub use error::{PathfindingError, Result};
pub use grid_util::point::Point;
pub use path_finder::PathFinder;
pub use solver::{PathSolver, SolverKind};
pub use terrain::TerrainType;

use itertools::Itertools;

/// Cost of a straight (cardinal) step.
pub const C: i32 = 10;
/// Cost of a diagonal step, a fixed-point approximation of `C * sqrt(2)`.
pub const D: i32 = 14;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// A sequence of grid cells from a source to the destination, both included.
pub type Path = Vec<Point>;

/// Cost of the cheapest 8-connected route between two points on an open grid: as many diagonal
/// steps as possible, then straight steps for the remainder.
pub fn octile_distance(p1: &Point, p2: &Point) -> i32 {
    let delta_x = (p1.x - p2.x).abs();
    let delta_y = (p1.y - p2.y).abs();
    D * delta_x.min(delta_y) + C * (delta_x - delta_y).abs()
}

/// Total octile cost of walking a path step by step.
pub fn path_cost(path: &[Point]) -> i32 {
    path.iter()
        .tuple_windows()
        .map(|(p1, p2)| octile_distance(p1, p2))
        .sum()
}

/// Converts the integer cost to an approximate floating point equivalent where cardinal directions have cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}
