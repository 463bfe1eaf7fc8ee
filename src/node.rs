//! Per-cell search state. A [NodeGrid] holds one [GridNode] per map cell at index
//! `x * height + y`, the same layout as [PathingGrid].
use crate::octile_distance;
use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;

/// Cost of a node no path has reached yet.
pub const COST_INFINITY: i32 = i32::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridNode {
    pub x: i32,
    pub y: i32,
    pub index: usize,
    pub is_walkable: bool,
    /// Cost of the best known path from the search root.
    pub cost_g: i32,
    /// Estimated cost to the heuristic target, zero for searches without one.
    pub cost_h: i32,
    /// Predecessor on the best known path, [None] for the root and unreached nodes.
    pub parent_index: Option<usize>,
    /// Set once the node's cost is final.
    pub closed: bool,
}

impl GridNode {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn cost_f(&self) -> i32 {
        self.cost_g.saturating_add(self.cost_h)
    }

    pub fn reached(&self) -> bool {
        self.cost_g != COST_INFINITY
    }

    fn reset(&mut self, heuristic_target: Option<&Point>) {
        self.cost_g = COST_INFINITY;
        self.parent_index = None;
        self.closed = false;
        self.cost_h = heuristic_target.map_or(0, |target| octile_distance(&self.point(), target));
    }
}

#[derive(Clone, Debug)]
pub struct NodeGrid {
    width: usize,
    height: usize,
    nodes: Vec<GridNode>,
}

impl NodeGrid {
    /// Builds a fresh node array from a walkability snapshot, with every node unreached.
    pub fn from_grid(grid: &PathingGrid) -> NodeGrid {
        let nodes = (0..grid.len())
            .map(|index| {
                let point = grid.point(index);
                GridNode {
                    x: point.x,
                    y: point.y,
                    index,
                    is_walkable: grid.is_walkable_ix(index),
                    cost_g: COST_INFINITY,
                    cost_h: 0,
                    parent_index: None,
                    closed: false,
                }
            })
            .collect();
        NodeGrid {
            width: grid.width(),
            height: grid.height(),
            nodes,
        }
    }

    /// Forgets the previous search and recomputes heuristic costs towards `heuristic_target`.
    pub fn reset(&mut self, heuristic_target: Option<Point>) {
        for node in &mut self.nodes {
            node.reset(heuristic_target.as_ref());
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ix(&self, point: &Point) -> usize {
        point.x as usize * self.height + point.y as usize
    }

    pub fn node(&self, index: usize) -> &GridNode {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut GridNode {
        &mut self.nodes[index]
    }

    /// The node at an in-bounds point.
    pub fn get(&self, point: &Point) -> &GridNode {
        &self.nodes[self.ix(point)]
    }

    /// Follows parent links from `from` up to the search root, returning the visited points in
    /// that order. Returns [None] if `from` was never reached.
    pub fn trace(&self, from: usize) -> Option<Vec<Point>> {
        if !self.nodes[from].reached() {
            return None;
        }
        let path = std::iter::successors(Some(from), |&ix| self.nodes[ix].parent_index)
            .map(|ix| self.nodes[ix].point())
            .collect();
        Some(path)
    }
}
