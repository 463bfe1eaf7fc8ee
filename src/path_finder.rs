use crate::error::{PathfindingError, Result};
use crate::solver::{PathSolver, SolverKind};
use crate::terrain::TerrainType;
use crate::Path;
use grid_util::point::Point;
use log::{error, info};
use std::time::Instant;

/// Entry point for callers: holds the selected [PathSolver], forwards queries to it and reports
/// how long they took. Configuration errors are logged; the `find_*` methods turn them into
/// [None] so a misconfigured finder never brings its host down.
pub struct PathFinder {
    solver: Option<Box<dyn PathSolver + Send>>,
    /// Log the duration and outcome of every query at `info` level.
    pub log_timing: bool,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder {
            solver: None,
            log_timing: true,
        }
    }
}

impl PathFinder {
    /// A finder without a solver. Select one before setting map data.
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    pub fn with_solver(kind: SolverKind) -> PathFinder {
        let mut path_finder = PathFinder::new();
        path_finder.select(kind);
        path_finder
    }

    /// Swaps in a fresh solver of the given kind. Map data has to be set again afterwards.
    pub fn select(&mut self, kind: SolverKind) {
        self.set_solver(kind.build());
    }

    pub fn set_solver(&mut self, solver: Box<dyn PathSolver + Send>) {
        info!("Using the {} path solver", solver.name());
        self.solver = Some(solver);
    }

    pub fn solver_name(&self) -> Option<&'static str> {
        self.solver.as_ref().map(|solver| solver.name())
    }

    fn solver_mut(&mut self) -> Result<&mut Box<dyn PathSolver + Send>> {
        self.solver.as_mut().ok_or(PathfindingError::NoSolver)
    }

    pub fn set_map_data(
        &mut self,
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<()> {
        let result = self
            .solver_mut()
            .and_then(|solver| solver.set_map_data(width, height, terrain, destination));
        if let Err(e) = &result {
            error!("Could not set map data: {}", e);
        }
        result
    }

    /// Paths from every source to `destination`, or `Ok(None)` if any source cannot reach it.
    pub fn try_find_paths(
        &mut self,
        sources: &[Point],
        destination: Point,
    ) -> Result<Option<Vec<Path>>> {
        let log_timing = self.log_timing;
        let solver = self.solver_mut()?;
        let start = Instant::now();
        let result = solver.find_paths(sources, destination)?;
        if log_timing {
            let outcome = if result.is_some() { "found" } else { "did not find" };
            info!(
                "{} {} paths for {} sources in {:?}",
                solver.name(),
                outcome,
                sources.len(),
                start.elapsed()
            );
        }
        Ok(result)
    }

    /// Like [try_find_paths](Self::try_find_paths), logging errors and reporting them as [None].
    pub fn find_paths(&mut self, sources: &[Point], destination: Point) -> Option<Vec<Path>> {
        self.try_find_paths(sources, destination).unwrap_or_else(|e| {
            error!("Path finding failed: {}", e);
            None
        })
    }

    /// Per-source results; [None] entries mark sources that cannot reach `destination`. Returns
    /// [None] as a whole only on configuration errors, which are logged.
    pub fn find_each(
        &mut self,
        sources: &[Point],
        destination: Point,
    ) -> Option<Vec<Option<Path>>> {
        let log_timing = self.log_timing;
        let start = Instant::now();
        let result = self
            .solver_mut()
            .and_then(|solver| solver.find_each(sources, destination));
        match result {
            Ok(paths) => {
                if log_timing {
                    let found = paths.iter().filter(|p| p.is_some()).count();
                    info!(
                        "Found paths for {} of {} sources in {:?}",
                        found,
                        paths.len(),
                        start.elapsed()
                    );
                }
                Some(paths)
            }
            Err(e) => {
                error!("Path finding failed: {}", e);
                None
            }
        }
    }
}
