use grid_util::point::Point;

use crate::error::Result;
use crate::node::NodeGrid;
use crate::solver::{ForwardSearch, PathSolver};
use crate::terrain::TerrainType;
use crate::Path;

/// Forward A*: one search per source, guided by the octile distance to the destination.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    search: ForwardSearch,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }

    /// Search state left by the most recent search, if map data is set.
    pub fn nodes(&self) -> Option<&NodeGrid> {
        self.search.nodes()
    }
}

impl PathSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "astar"
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
        self.search.find_each(sources, destination, true)
    }

    fn find_paths(&mut self, sources: &[Point], destination: Point) -> Result<Option<Vec<Path>>> {
        self.search.find_paths(sources, destination, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::filled;
    use crate::{path_cost, C, D};

    fn solver_for(terrain: &[Vec<TerrainType>], destination: Point) -> AstarSolver {
        let mut solver = AstarSolver::new();
        solver
            .set_map_data(terrain.len(), terrain[0].len(), terrain, destination)
            .unwrap();
        solver
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let terrain = filled(1, 1, TerrainType::Road);
        let start = Point::new(0, 0);
        let mut solver = solver_for(&terrain, start);
        let paths = solver.find_paths(&[start], start).unwrap().unwrap();
        assert_eq!(paths[0].len(), 1);
    }

    /// Asserts that the optimal 5 step solution around a centre obstacle is found.
    #[test]
    fn solve_simple_problem() {
        let mut terrain = filled(3, 3, TerrainType::Road);
        terrain[1][1] = TerrainType::Wall;
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        let mut solver = solver_for(&terrain, end);
        let paths = solver.find_paths(&[start], end).unwrap().unwrap();
        assert_eq!(paths[0].len(), 5);
        assert_eq!(path_cost(&paths[0]), 4 * C);
    }

    #[test]
    fn test_complex() {
        let mut terrain = filled(10, 10, TerrainType::Road);
        for (x, y) in [(1, 1), (5, 0), (0, 5), (8, 8)] {
            terrain[x][y] = TerrainType::Wall;
        }
        let start = Point::new(0, 0);
        let end = Point::new(7, 7);
        let mut solver = solver_for(&terrain, end);
        let path = solver.find_paths(&[start], end).unwrap().unwrap().remove(0);
        // The wall at (1, 1) forces two straight steps along an edge first.
        assert!(path[2] == Point::new(2, 0) || path[2] == Point::new(0, 2));
        assert_eq!(path.len(), 10);
        assert_eq!(path_cost(&path), 5 * D + 4 * C);
        let nodes = solver.nodes().unwrap();
        assert_eq!(nodes.get(&end).cost_g, path_cost(&path));
    }

    // Tests that a diagonal gap between two walls cannot be squeezed through.
    #[test]
    fn test_diagonal_gap_path() {
        //  ___
        // | #|
        // |# |
        //  __
        let mut terrain = filled(2, 2, TerrainType::Road);
        terrain[1][0] = TerrainType::Wall;
        terrain[0][1] = TerrainType::Wall;
        let start = Point::new(0, 0);
        let goal = Point::new(1, 1);
        let mut solver = solver_for(&terrain, goal);
        assert_eq!(solver.find_paths(&[start], goal).unwrap(), None);
        assert_eq!(solver.find_each(&[start, goal], goal).unwrap()[1], Some(vec![goal]));
    }

    #[test]
    fn batch_fails_if_any_source_is_cut_off() {
        let mut terrain = filled(5, 5, TerrainType::Road);
        terrain[0][1] = TerrainType::Wall;
        terrain[1][1] = TerrainType::Wall;
        terrain[1][0] = TerrainType::Wall;
        let goal = Point::new(4, 4);
        let mut solver = solver_for(&terrain, goal);
        let sources = [Point::new(4, 0), Point::new(0, 0), Point::new(0, 4)];
        assert_eq!(solver.find_paths(&sources, goal).unwrap(), None);
        let each = solver.find_each(&sources, goal).unwrap();
        assert!(each[0].is_some() && each[1].is_none() && each[2].is_some());
    }
}
