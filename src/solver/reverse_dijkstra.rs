use grid_util::point::Point;
use log::{debug, info};

use crate::error::{PathfindingError, Result};
use crate::node::NodeGrid;
use crate::search::best_first_search;
use crate::solver::{MapData, PathSolver};
use crate::terrain::TerrainType;
use crate::Path;

/// Computes a single shortest-path tree rooted at the destination and reads every source's path
/// off its parent links. Moves are symmetric, so distances towards the root equal distances from
/// the sources, and one search serves any number of sources.
#[derive(Clone, Debug, Default)]
pub struct ReverseDijkstraSolver {
    map: Option<MapData>,
}

impl ReverseDijkstraSolver {
    pub fn new() -> ReverseDijkstraSolver {
        ReverseDijkstraSolver::default()
    }

    /// The tree built by the most recent query: `cost_g` is the distance to the destination.
    pub fn nodes(&self) -> Option<&NodeGrid> {
        self.map.as_ref().map(|map| &map.nodes)
    }
}

impl PathSolver for ReverseDijkstraSolver {
    fn name(&self) -> &'static str {
        "reverse-dijkstra"
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
        let map = self.map.as_mut().ok_or(PathfindingError::MapDataMissing)?;
        map.check_query(sources, &destination)?;
        let MapData { grid, nodes } = map;

        nodes.reset(None);
        if !grid.is_walkable(&destination) {
            info!("Destination {:?} is not walkable", destination);
            return Ok(vec![None; sources.len()]);
        }
        let root = grid.get_ix_point(&destination);
        best_first_search(grid, nodes, root, None);
        debug!("Built shortest path tree towards {:?}", destination);

        // Parent links already point towards the destination.
        Ok(sources
            .iter()
            .map(|source| nodes.trace(nodes.ix(source)))
            .collect())
    }
}
