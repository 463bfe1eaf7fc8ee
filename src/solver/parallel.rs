use grid_util::point::Point;
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{PathfindingError, Result};
use crate::solver::{forward_path, MapData, PathSolver};
use crate::terrain::TerrainType;
use crate::Path;

/// Runs the per-source forward searches concurrently. Every search works on its own copy of the
/// node array while sharing the read-only walkability snapshot; results are joined before they
/// are returned.
#[derive(Debug)]
pub struct ParallelSolver {
    map: Option<MapData>,
    use_heuristic: bool,
    pool: Option<ThreadPool>,
}

impl ParallelSolver {
    /// Runs A* (or Dijkstra when `use_heuristic` is false) on the global rayon pool.
    pub fn new(use_heuristic: bool) -> ParallelSolver {
        ParallelSolver {
            map: None,
            use_heuristic,
            pool: None,
        }
    }

    /// Runs the searches on a dedicated pool of `num_threads` workers.
    pub fn with_threads(num_threads: usize, use_heuristic: bool) -> Result<ParallelSolver> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("pathfinding-{}", i))
            .build()?;
        Ok(ParallelSolver {
            map: None,
            use_heuristic,
            pool: Some(pool),
        })
    }

    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn run<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl PathSolver for ParallelSolver {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn set_map_data(
        &mut self,
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<()> {
        MapData::replace(&mut self.map, width, height, terrain, destination)
    }

    fn find_each(&mut self, sources: &[Point], destination: Point) -> Result<Vec<Option<Path>>> {
        let map = self.map.as_ref().ok_or(PathfindingError::MapDataMissing)?;
        map.check_query(sources, &destination)?;
        let use_heuristic = self.use_heuristic;
        debug!(
            "Searching {} sources on {} threads",
            sources.len(),
            self.current_num_threads()
        );
        let paths: Vec<Option<Path>> = self.run(|| {
            sources
                .par_iter()
                .map(|source| {
                    let mut nodes = map.nodes.clone();
                    forward_path(&map.grid, &mut nodes, *source, destination, use_heuristic)
                })
                .collect()
        });
        Ok(paths)
    }
}
