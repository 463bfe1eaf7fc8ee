use crate::error::{PathfindingError, Result};
use crate::terrain::TerrainType;
use crate::{octile_distance, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Offsets of the Moore neighbourhood, cardinal directions first.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// [PathingGrid] is the read-only walkability snapshot a search runs against. Cells are stored at
/// index `x * height + y`. It also maintains connected components using a [UnionFind] structure
/// so disconnected queries can be rejected without flood-filling the map.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    height: usize,
    walkable: Vec<bool>,
    pub components: UnionFind<usize>,
}

impl PathingGrid {
    /// Takes a snapshot of `terrain`, indexed `[x][y]`, which must be exactly `width` by `height`.
    pub fn from_terrain(
        width: usize,
        height: usize,
        terrain: &[Vec<TerrainType>],
    ) -> Result<PathingGrid> {
        if width == 0 || height == 0 {
            return Err(PathfindingError::EmptyMap { width, height });
        }
        let ragged = terrain.iter().find(|column| column.len() != height);
        if terrain.len() != width || ragged.is_some() {
            return Err(PathfindingError::DimensionMismatch {
                width,
                height,
                actual_width: terrain.len(),
                actual_height: ragged.or(terrain.first()).map_or(0, Vec::len),
            });
        }
        let walkable = terrain
            .iter()
            .flat_map(|column| column.iter().map(|kind| kind.is_walkable()))
            .collect();
        let mut grid = PathingGrid {
            width,
            height,
            walkable,
            components: UnionFind::new(width * height),
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// Linear index of an in-bounds point.
    pub fn get_ix_point(&self, point: &Point) -> usize {
        debug_assert!(self.in_bounds(point));
        point.x as usize * self.height + point.y as usize
    }

    pub fn point(&self, ix: usize) -> Point {
        Point::new((ix / self.height) as i32, (ix % self.height) as i32)
    }

    /// Fails with [PathfindingError::OutOfBounds] for points outside the map.
    pub fn check_bounds(&self, point: &Point) -> Result<()> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(PathfindingError::OutOfBounds {
                x: point.x,
                y: point.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn is_walkable(&self, point: &Point) -> bool {
        self.in_bounds(point) && self.walkable[self.get_ix_point(point)]
    }

    pub fn is_walkable_ix(&self, ix: usize) -> bool {
        self.walkable[ix]
    }

    /// Whether a single step from `start` to the adjacent `pos` is allowed. Diagonal steps also
    /// need both cells of the corner they pass to be walkable.
    pub fn can_move_to(&self, pos: Point, start: Point) -> bool {
        debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
        self.is_walkable(&pos)
            && self.is_walkable(&Point::new(start.x, pos.y))
            && self.is_walkable(&Point::new(pos.x, start.y))
    }

    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.can_move_to(*p, *point))
            .collect()
    }

    /// Indices of the cells reachable in one step from `ix`, with the cost of that step.
    pub fn neighborhood_ix_and_cost(&self, ix: usize) -> SmallVec<[(usize, i32); N_SMALLVEC_SIZE]> {
        let pos = self.point(ix);
        self.neighborhood_points(&pos)
            .into_iter()
            .map(|p| (self.get_ix_point(&p), octile_distance(&pos, &p)))
            .collect()
    }

    /// Checks that a path can still be walked on this snapshot: every cell is walkable and every
    /// step is a legal move to an adjacent cell. Useful to decide whether a cached path survived a
    /// terrain edit.
    pub fn is_walkable_path(&self, path: &[Point]) -> bool {
        path.iter().all(|p| self.is_walkable(p))
            && path.iter().tuple_windows().all(|(from, to)| {
                let adjacent = (from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1;
                adjacent && from != to && self.can_move_to(*to, *from)
            })
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not connected by walkable cells. Blocked or out-of-bounds
    /// endpoints are always unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_walkable(start) && self.is_walkable(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same components.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.len());
        for ix in (0..self.len()).filter(|&ix| self.walkable[ix]) {
            let point = self.point(ix);
            // Every edge is seen from both ends, so half of the neighbourhood suffices.
            for p in [
                Point::new(point.x, point.y + 1),
                Point::new(point.x + 1, point.y - 1),
                Point::new(point.x + 1, point.y),
                Point::new(point.x + 1, point.y + 1),
            ] {
                if self.can_move_to(p, point) {
                    components.union(ix, self.get_ix_point(&p));
                }
            }
        }
        self.components = components;
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in (0..self.height).rev() {
            let row = (0..self.width)
                .map(|x| if self.walkable[x * self.height + y] { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::filled;

    fn grid_with_walls(width: usize, height: usize, walls: &[(usize, usize)]) -> PathingGrid {
        let mut terrain = filled(width, height, TerrainType::Road);
        for &(x, y) in walls {
            terrain[x][y] = TerrainType::Wall;
        }
        PathingGrid::from_terrain(width, height, &terrain).unwrap()
    }

    #[test]
    fn indices_are_column_major() {
        let grid = grid_with_walls(4, 3, &[]);
        let p = Point::new(2, 1);
        assert_eq!(grid.get_ix_point(&p), 2 * 3 + 1);
        assert_eq!(grid.point(7), p);
    }

    #[test]
    fn rejects_mismatched_terrain() {
        let terrain = filled(3, 2, TerrainType::Road);
        assert!(matches!(
            PathingGrid::from_terrain(2, 2, &terrain),
            Err(PathfindingError::DimensionMismatch { actual_width: 3, .. })
        ));
        let mut ragged = filled(3, 2, TerrainType::Road);
        ragged[1].push(TerrainType::Road);
        assert!(matches!(
            PathingGrid::from_terrain(3, 2, &ragged),
            Err(PathfindingError::DimensionMismatch { actual_height: 3, .. })
        ));
        assert!(matches!(
            PathingGrid::from_terrain(0, 2, &[]),
            Err(PathfindingError::EmptyMap { .. })
        ));
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let grid = grid_with_walls(3, 2, &[(1, 0), (1, 1)]);
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_eq!(grid.get_component(&p1), grid.get_component(&p3));
    }

    // Diagonal neighbours separated by a wall corner are not connected.
    #[test]
    fn corner_cutting_is_not_allowed() {
        //  ___
        // | #|
        // |# |
        //  __
        let grid = grid_with_walls(2, 2, &[(1, 0), (0, 1)]);
        let start = Point::new(0, 0);
        let end = Point::new(1, 1);
        assert!(!grid.can_move_to(end, start));
        assert!(grid.neighborhood_points(&start).is_empty());
        assert!(grid.unreachable(&start, &end));
    }

    #[test]
    fn walkable_paths() {
        let grid = grid_with_walls(3, 3, &[(1, 1)]);
        let around = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)];
        assert!(grid.is_walkable_path(&around));
        assert!(grid.is_walkable_path(&[]));
        // Through the wall, past its corner, a jump and a repeated cell.
        assert!(!grid.is_walkable_path(&[Point::new(0, 1), Point::new(1, 1)]));
        assert!(!grid.is_walkable_path(&[Point::new(1, 0), Point::new(2, 1)]));
        assert!(!grid.is_walkable_path(&[Point::new(0, 0), Point::new(2, 0)]));
        assert!(!grid.is_walkable_path(&[Point::new(0, 0), Point::new(0, 0)]));
    }

    #[test]
    fn neighbourhood_costs() {
        let grid = grid_with_walls(3, 3, &[(2, 1)]);
        let centre = grid.get_ix_point(&Point::new(1, 1));
        let neighbours = grid.neighborhood_ix_and_cost(centre);
        // The wall removes itself and both diagonals that pass its corner.
        assert_eq!(neighbours.len(), 5);
        assert_eq!(neighbours.iter().filter(|(_, c)| *c == crate::C).count(), 3);
        assert_eq!(neighbours.iter().filter(|(_, c)| *c == crate::D).count(), 2);
    }
}
