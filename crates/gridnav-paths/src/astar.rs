//! The A* search engine.

use std::cmp::Ordering;

use glam::Vec3;
use gridnav_core::{Grid, NodeId};

use crate::distance::scaled_octile;
use crate::heap::{HeapArena, IndexedHeap};
use crate::simplify::simplify;

/// Outcome of a single path search.
///
/// Failure is a value, not an error: `success == false` with empty
/// waypoints and zero cost means the goal was unreachable or an endpoint
/// snapped to an unwalkable node. `expanded` counts the nodes whose
/// neighbors were examined, which is zero whenever the search was refused
/// up front.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Simplified waypoints in travel order, start through goal.
    pub waypoints: Vec<Vec3>,
    /// Whether a path was found.
    pub success: bool,
    /// Total traversal cost (the goal node's accumulated cost).
    pub cost: f32,
    /// Nodes expanded during the search.
    pub expanded: usize,
}

impl PathResult {
    fn failure(expanded: usize) -> Self {
        Self {
            waypoints: Vec::new(),
            success: false,
            cost: 0.0,
            expanded,
        }
    }
}

// Open-set ordering: lowest f first, ties broken toward the goal (lower h).
impl HeapArena<NodeId> for Grid {
    fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        let (na, nb) = (self.node(a), self.node(b));
        match na.f_cost().cmp(&nb.f_cost()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => na.h_cost < nb.h_cost,
        }
    }

    fn slot(&self, item: NodeId) -> usize {
        self.node(item).heap_slot
    }

    fn set_slot(&mut self, item: NodeId, slot: usize) {
        self.node_mut(item).heap_slot = slot;
    }
}

/// A* search over a [`Grid`].
///
/// Owns the grid plus a reusable neighbor scratch buffer. Searches run one
/// at a time to completion; node costs are cleared at the start of every
/// request, so results never depend on earlier searches.
pub struct Pathfinder {
    grid: Grid,
    nbuf: Vec<NodeId>,
}

impl Pathfinder {
    /// Create a pathfinder over `grid`.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the underlying grid (for walkability updates).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Compute the shortest walkable path between two world positions.
    ///
    /// Both endpoints snap to their nearest grid node. If either snaps to
    /// an unwalkable node the search is refused immediately. On success the
    /// waypoints are the simplified polyline from the start node's center
    /// to the goal node's center, and `cost` is the goal's accumulated
    /// movement cost.
    pub fn find_path(&mut self, start: Vec3, goal: Vec3) -> PathResult {
        let start_id = self.grid.node_from_position(start);
        let goal_id = self.grid.node_from_position(goal);

        if !self.grid.node(start_id).walkable || !self.grid.node(goal_id).walkable {
            log::debug!("path {} -> {} refused: endpoint not walkable", start, goal);
            return PathResult::failure(0);
        }

        // Stale costs from an earlier search would short-circuit relaxation.
        self.grid.clear_costs();

        let mut open = IndexedHeap::with_capacity(self.grid.max_nodes());
        let mut closed = vec![false; self.grid.max_nodes()];
        let mut expanded = 0usize;
        let mut found = false;

        open.push(start_id, &mut self.grid);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        while let Some(current) = open.pop(&mut self.grid) {
            closed[current.index()] = true;
            if current == goal_id {
                found = true;
                break;
            }
            expanded += 1;

            self.grid.neighbors(current, &mut nbuf);
            for &neighbor in nbuf.iter() {
                if !self.grid.node(neighbor).walkable || closed[neighbor.index()] {
                    continue;
                }

                let step = scaled_octile(
                    self.grid.node(current).cell,
                    self.grid.node(neighbor).cell,
                );
                let tentative = self.grid.node(current).g_cost + step;
                let in_open = open.contains(neighbor, &self.grid);

                if tentative < self.grid.node(neighbor).g_cost || !in_open {
                    let h = scaled_octile(
                        self.grid.node(neighbor).cell,
                        self.grid.node(goal_id).cell,
                    );
                    let node = self.grid.node_mut(neighbor);
                    node.g_cost = tentative;
                    node.h_cost = h;
                    node.parent = Some(current);

                    if in_open {
                        open.reprioritize(neighbor, &mut self.grid);
                    } else {
                        open.push(neighbor, &mut self.grid);
                    }
                }
            }
        }
        self.nbuf = nbuf;

        if !found {
            log::debug!(
                "no path {} -> {} ({} nodes expanded)",
                start,
                goal,
                expanded
            );
            return PathResult::failure(expanded);
        }

        let cost = self.grid.node(goal_id).g_cost as f32;
        let waypoints = self.retrace(start_id, goal_id);
        log::debug!(
            "path {} -> {}: {} waypoints, cost {} ({} nodes expanded)",
            start,
            goal,
            waypoints.len(),
            cost,
            expanded
        );
        PathResult {
            waypoints,
            success: true,
            cost,
            expanded,
        }
    }

    /// Walk parent links goal → start, flip to travel order, simplify.
    fn retrace(&self, start: NodeId, goal: NodeId) -> Vec<Vec3> {
        let mut points = Vec::new();
        let mut current = goal;
        while current != start {
            points.push(self.grid.node(current).world_position);
            match self.grid.node(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        points.push(self.grid.node(start).world_position);
        points.reverse();
        simplify(&points)
    }
}
