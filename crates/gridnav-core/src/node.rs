//! Grid nodes and their dense-array identifiers.

use glam::Vec3;

use crate::cell::Cell;

/// Identifier of a node: its index into the grid's dense node array.
///
/// Node identity (for goal checks and closed-set membership) is identifier
/// equality, never positional comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position in the grid's dense node array.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One cell of the grid.
///
/// Static data (`cell`, `world_position`, `walkable`) is computed at build
/// time. The remaining fields are search state, mutated in place while a
/// search runs: costs are cleared through `Grid::clear_costs` before every
/// request, `parent` is the back-link used for path reconstruction, and
/// `heap_slot` is maintained by the open-set heap. The ranking key
/// [`f_cost`](Node::f_cost) is always derived, never stored.
#[derive(Debug, Clone)]
pub struct Node {
    /// World-space center of the cell.
    pub world_position: Vec3,
    /// Grid coordinate.
    pub cell: Cell,
    /// Whether units may stand on this node.
    pub walkable: bool,
    /// Accumulated cost from the search start along the best known path.
    pub g_cost: i32,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h_cost: i32,
    /// Back-link used for path reconstruction.
    pub parent: Option<NodeId>,
    /// Current slot in the open-set heap.
    pub heap_slot: usize,
}

impl Node {
    pub(crate) fn new(cell: Cell, world_position: Vec3, walkable: bool) -> Self {
        Self {
            world_position,
            cell,
            walkable,
            g_cost: 0,
            h_cost: 0,
            parent: None,
            heap_slot: 0,
        }
    }

    /// Total ranking key: `g_cost + h_cost`.
    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }
}
