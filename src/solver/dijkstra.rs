use grid_util::point::Point;

use crate::error::Result;
use crate::node::NodeGrid;
use crate::solver::{ForwardSearch, PathSolver};
use crate::terrain::TerrainType;
use crate::Path;

/// Forward Dijkstra: one search per source ordered purely by accumulated cost.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    search: ForwardSearch,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::default()
    }

    pub fn nodes(&self) -> Option<&NodeGrid> {
        self.search.nodes()
    }
}

impl PathSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn set_map_data(
        &mut self,
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
        destination: Point,
    ) -> Result<()> {
        self.search.set_map_data(width, height, terrain, destination)
    }

    fn find_each(&mut self, sources: &[Point], destination: Point) -> Result<Vec<Option<Path>>> {
        self.search.find_each(sources, destination, false)
    }

    fn find_paths(&mut self, sources: &[Point], destination: Point) -> Result<Option<Vec<Path>>> {
        self.search.find_paths(sources, destination, false)
    }
}
