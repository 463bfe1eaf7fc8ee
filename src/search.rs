//! Best-first search shared by every solver. Costs and parent links live in a [NodeGrid] rather
//! than in a map keyed by position, so the whole search state can be reset, cloned for a worker
//! or read back after the search without rehashing.
use crate::node::{GridNode, NodeGrid};
use crate::pathing_grid::PathingGrid;
use crate::priority_queue::PriorityQueue;
use log::debug;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

const OPEN_CAPACITY: usize = 64;

/// Entry of the open set. Identity is the node index alone, so a pending node can be re-keyed
/// when a cheaper path to it is found.
#[derive(Clone, Copy, Debug)]
struct OpenNode {
    estimated_cost: i32,
    cost: i32,
    index: usize,
}

impl OpenNode {
    fn of(node: &GridNode) -> OpenNode {
        OpenNode {
            estimated_cost: node.cost_f(),
            cost: node.cost_g,
            index: node.index,
        }
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for OpenNode {}

impl Hash for OpenNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// First orders per estimated cost, smallest first, then favours the node with the largest cost
/// so far (the one closest to the goal), then the lowest index.
fn open_order(a: &OpenNode, b: &OpenNode) -> Ordering {
    match b.estimated_cost.cmp(&a.estimated_cost) {
        Ordering::Equal => a.cost.cmp(&b.cost).then_with(|| b.index.cmp(&a.index)),
        s => s,
    }
}

/// Searches outward from `root` over `nodes`, which must have been reset beforehand.
///
/// With a `goal` the search stops as soon as the goal is finalized and reports whether that
/// happened. Without one it settles every node reachable from the root, leaving a shortest-path
/// tree in the parent links, and returns true.
pub(crate) fn best_first_search(
    grid: &PathingGrid,
    nodes: &mut NodeGrid,
    root: usize,
    goal: Option<usize>,
) -> bool {
    let mut open = PriorityQueue::with_capacity(
        OPEN_CAPACITY,
        open_order as fn(&OpenNode, &OpenNode) -> Ordering,
    );
    let root_node = nodes.node_mut(root);
    root_node.cost_g = 0;
    root_node.parent_index = None;
    open.add(OpenNode::of(root_node));

    let mut settled = 0;
    while let Some(OpenNode { index, .. }) = open.delete_max() {
        let current = nodes.node_mut(index);
        current.closed = true;
        settled += 1;
        if goal == Some(index) {
            debug!("Reached goal {} from {} after settling {} nodes", index, root, settled);
            return true;
        }
        let cost = current.cost_g;
        for (successor, move_cost) in grid.neighborhood_ix_and_cost(index) {
            let node = nodes.node_mut(successor);
            if node.closed {
                continue;
            }
            let new_cost = cost + move_cost;
            // Equal costs keep the existing parent.
            if new_cost >= node.cost_g {
                continue;
            }
            node.cost_g = new_cost;
            node.parent_index = Some(index);
            let entry = OpenNode::of(node);
            if open.contains(&entry) {
                open.update(entry);
            } else {
                open.add(entry);
            }
        }
    }
    debug!("Open set exhausted from {} after settling {} nodes", root, settled);
    goal.is_none()
}
