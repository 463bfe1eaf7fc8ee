use crate::error::{PathfindingError, Result};
use crate::node::NodeGrid;
use crate::pathing_grid::PathingGrid;
use crate::search::best_first_search;
use crate::terrain::TerrainType;
use crate::Path;
use core::fmt;
use grid_util::point::Point;
use log::{info, warn};
use std::str::FromStr;

pub mod astar;
pub mod dijkstra;
pub mod parallel;
pub mod reverse_dijkstra;

use astar::AstarSolver;
use dijkstra::DijkstraSolver;
use parallel::ParallelSolver;
use reverse_dijkstra::ReverseDijkstraSolver;

/// A search strategy answering multi-source queries against one destination.
pub trait PathSolver {
    fn name(&self) -> &'static str;

    /// Takes a walkability snapshot of `terrain`, indexed `[x][y]`. Any previous snapshot is
    /// discarded, also when this fails.
    fn set_map_data(
        &mut self,
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<()>;

    /// Computes a path from every source to `destination`, or [None] for the sources that cannot
    /// reach it. Each path starts at its source and ends at the destination.
    fn find_each(&mut self, sources: &[Point], destination: Point) -> Result<Vec<Option<Path>>>;

    /// Like [find_each](Self::find_each) but only succeeds if every source has a path.
    fn find_paths(&mut self, sources: &[Point], destination: Point) -> Result<Option<Vec<Path>>> {
        Ok(self.find_each(sources, destination)?.into_iter().collect())
    }
}

/// Snapshot and node array a solver searches over.
#[derive(Clone, Debug)]
pub(crate) struct MapData {
    pub(crate) grid: PathingGrid,
    pub(crate) nodes: NodeGrid,
}

impl MapData {
    pub(crate) fn new(
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<MapData> {
        let grid = PathingGrid::from_terrain(width, height, terrain)?;
        grid.check_bounds(&destination)?;
        let nodes = NodeGrid::from_grid(&grid);
        Ok(MapData { grid, nodes })
    }

    /// Replaces `slot` with fresh map data, leaving it empty on failure.
    pub(crate) fn replace(
        slot: &mut Option<MapData>,
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<()> {
        *slot = None;
        *slot = Some(MapData::new(width, height, terrain, destination)?);
        Ok(())
    }

    pub(crate) fn check_query(&self, sources: &[Point], destination: &Point) -> Result<()> {
        self.grid.check_bounds(destination)?;
        sources
            .iter()
            .try_for_each(|source| self.grid.check_bounds(source))
    }
}

/// Searches from `source` towards `destination` and returns the path in source to destination
/// order. Pairs on different components are rejected without searching.
pub(crate) fn forward_path(
    grid: &PathingGrid,
    nodes: &mut NodeGrid,
    source: Point,
    destination: Point,
    use_heuristic: bool,
) -> Option<Path> {
    if grid.unreachable(&source, &destination) {
        info!("{:?} is not reachable from {:?}", destination, source);
        return None;
    }
    nodes.reset(use_heuristic.then_some(destination));
    let root = grid.get_ix_point(&source);
    let goal = grid.get_ix_point(&destination);
    if !best_first_search(grid, nodes, root, Some(goal)) {
        warn!("Reachable goal could not be pathed to, is reachable graph correct?");
        return None;
    }
    let mut path = nodes.trace(goal)?;
    path.reverse();
    Some(path)
}

/// State shared by the solvers that run one search per source on a single node array.
#[derive(Clone, Debug, Default)]
pub(crate) struct ForwardSearch {
    map: Option<MapData>,
}

impl ForwardSearch {
    pub(crate) fn set_map_data(
        &mut self,
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<()> {
        MapData::replace(&mut self.map, width, height, terrain, destination)
    }

    pub(crate) fn nodes(&self) -> Option<&NodeGrid> {
        self.map.as_ref().map(|map| &map.nodes)
    }

    fn prepare(&mut self, sources: &[Point], destination: &Point) -> Result<&mut MapData> {
        let map = self.map.as_mut().ok_or(PathfindingError::MapDataMissing)?;
        map.check_query(sources, destination)?;
        Ok(map)
    }

    pub(crate) fn find_each(
        &mut self,
        sources: &[Point],
        destination: Point,
        use_heuristic: bool,
    ) -> Result<Vec<Option<Path>>> {
        let MapData { grid, nodes } = self.prepare(sources, &destination)?;
        Ok(sources
            .iter()
            .map(|source| forward_path(grid, nodes, *source, destination, use_heuristic))
            .collect())
    }

    /// Stops at the first source without a path.
    pub(crate) fn find_paths(
        &mut self,
        sources: &[Point],
        destination: Point,
        use_heuristic: bool,
    ) -> Result<Option<Vec<Path>>> {
        let MapData { grid, nodes } = self.prepare(sources, &destination)?;
        Ok(sources
            .iter()
            .map(|source| forward_path(grid, nodes, *source, destination, use_heuristic))
            .collect())
    }
}

/// Runtime selection of a [PathSolver].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Astar,
    Dijkstra,
    ReverseDijkstra,
    Parallel,
}

impl SolverKind {
    pub const ALL: [SolverKind; 4] = [
        SolverKind::Astar,
        SolverKind::Dijkstra,
        SolverKind::ReverseDijkstra,
        SolverKind::Parallel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Astar => "astar",
            SolverKind::Dijkstra => "dijkstra",
            SolverKind::ReverseDijkstra => "reverse-dijkstra",
            SolverKind::Parallel => "parallel",
        }
    }

    /// Creates an unconfigured solver of this kind. The parallel solver uses the global rayon pool.
    pub fn build(self) -> Box<dyn PathSolver + Send> {
        match self {
            SolverKind::Astar => Box::new(AstarSolver::new()),
            SolverKind::Dijkstra => Box::new(DijkstraSolver::new()),
            SolverKind::ReverseDijkstra => Box::new(ReverseDijkstraSolver::new()),
            SolverKind::Parallel => Box::new(ParallelSolver::new(true)),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = PathfindingError;

    fn from_str(s: &str) -> Result<SolverKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(SolverKind::Astar),
            "dijkstra" => Ok(SolverKind::Dijkstra),
            "reverse-dijkstra" | "reverse_dijkstra" | "reverse" => Ok(SolverKind::ReverseDijkstra),
            "parallel" => Ok(SolverKind::Parallel),
            _ => Err(PathfindingError::UnknownSolver(s.to_owned())),
        }
    }
}
