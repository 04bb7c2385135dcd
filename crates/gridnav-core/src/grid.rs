//! The dense node grid and its world/grid coordinate mapping.

use glam::Vec3;

use crate::cell::Cell;
use crate::config::{GridConfig, GridError};
use crate::node::{Node, NodeId};

/// A uniform 2D grid of [`Node`]s on the world X/Z plane.
///
/// The grid owns every node in a dense row-major array. Walkability is
/// computed once at build time from an obstacle predicate (and may be
/// recomputed on demand); search costs are transient state reset through
/// [`clear_costs`](Grid::clear_costs) before every search.
pub struct Grid {
    config: GridConfig,
    size_x: i32,
    size_y: i32,
    nodes: Vec<Node>,
}

impl Grid {
    /// Build a grid from `config`, probing each node center with
    /// `is_obstacle` (world point, probe radius). A node is walkable when
    /// the predicate reports no obstruction.
    ///
    /// Runs once; `O(size_x * size_y)` predicate calls.
    pub fn build(
        config: GridConfig,
        is_obstacle: impl Fn(Vec3, f32) -> bool,
    ) -> Result<Self, GridError> {
        config.validate()?;
        let (size_x, size_y) = config.grid_size();
        let mut grid = Self {
            config,
            size_x,
            size_y,
            nodes: Vec::with_capacity((size_x * size_y) as usize),
        };

        let radius = config.node_radius;
        let lower_left = grid.lower_left();
        for y in 0..size_y {
            for x in 0..size_x {
                let world = lower_left + Vec3::new(x as f32 + radius, 0.0, y as f32 + radius);
                let walkable = !is_obstacle(world, radius);
                grid.nodes.push(Node::new(Cell::new(x, y), world, walkable));
            }
        }
        Ok(grid)
    }

    /// Lower-left corner the node centers are laid out from: half the cell
    /// extent below the origin on each axis, so centers and the
    /// snap-to-nearest mapping agree for odd and even sizes alike.
    fn lower_left(&self) -> Vec3 {
        Vec3::new(
            self.config.origin.x - self.size_x as f32 / 2.0,
            self.config.origin.y,
            self.config.origin.z - self.size_y as f32 / 2.0,
        )
    }

    /// The configuration the grid was built from.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of cells along world X.
    #[inline]
    pub fn size_x(&self) -> i32 {
        self.size_x
    }

    /// Number of cells along world Z.
    #[inline]
    pub fn size_y(&self) -> i32 {
        self.size_y
    }

    /// Total node capacity (`size_x * size_y`). Bounds the open-set heap.
    #[inline]
    pub fn max_nodes(&self) -> usize {
        (self.size_x * self.size_y) as usize
    }

    /// Identifier of the node at `cell`, if in bounds.
    #[inline]
    pub fn id_at(&self, cell: Cell) -> Option<NodeId> {
        if cell.x < 0 || cell.x >= self.size_x || cell.y < 0 || cell.y >= self.size_y {
            return None;
        }
        Some(NodeId::new((cell.y * self.size_x + cell.x) as usize))
    }

    /// The node behind `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Mutable access to the node behind `id`.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Snap a world position to the nearest in-grid node.
    ///
    /// The position is normalized against the grid extents, clamped to
    /// `[0, 1]`, scaled by `size - 1` and rounded. Out-of-bounds positions
    /// never fail; they snap to the border.
    pub fn node_from_position(&self, world: Vec3) -> NodeId {
        let size = self.config.world_size;
        let percent_x = ((world.x - self.config.origin.x + size.x / 2.0) / size.x).clamp(0.0, 1.0);
        let percent_y = ((world.z - self.config.origin.z + size.y / 2.0) / size.y).clamp(0.0, 1.0);

        let x = ((self.size_x - 1) as f32 * percent_x).round() as i32;
        let y = ((self.size_y - 1) as f32 * percent_y).round() as i32;
        NodeId::new((y * self.size_x + x) as usize)
    }

    /// Append the in-bounds cardinal neighbors of `id` into `buf`,
    /// clearing it first. Diagonal cells are never produced.
    pub fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        buf.clear();
        let cell = self.nodes[id.index()].cell;
        for n in cell.neighbors_4() {
            if let Some(ni) = self.id_at(n) {
                buf.push(ni);
            }
        }
    }

    /// Reset every node's `g_cost` and `h_cost` to zero.
    ///
    /// Costs are shared mutable state across searches; a search that runs
    /// on stale costs produces corrupt results.
    pub fn clear_costs(&mut self) {
        for node in &mut self.nodes {
            node.g_cost = 0;
            node.h_cost = 0;
        }
    }

    /// Re-run the obstacle predicate over every node, replacing the
    /// walkability mask. Search state is left untouched.
    pub fn recompute_walkability(&mut self, is_obstacle: impl Fn(Vec3, f32) -> bool) {
        let radius = self.config.node_radius;
        for node in &mut self.nodes {
            node.walkable = !is_obstacle(node.world_position, radius);
        }
    }

    /// Row-major iterator over `(NodeId, &Node)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn open_grid(world: f32) -> Grid {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(world, world), 0.5);
        Grid::build(config, |_, _| false).unwrap()
    }

    #[test]
    fn build_derives_dimensions() {
        let grid = open_grid(10.0);
        assert_eq!(grid.size_x(), 10);
        assert_eq!(grid.size_y(), 10);
        assert_eq!(grid.max_nodes(), 100);
    }

    #[test]
    fn node_centers_offset_from_lower_left() {
        let grid = open_grid(5.0);
        let first = grid.node(grid.id_at(Cell::ZERO).unwrap());
        assert_eq!(first.world_position, Vec3::new(-2.0, 0.0, -2.0));
        let last = grid.node(grid.id_at(Cell::new(4, 4)).unwrap());
        assert_eq!(last.world_position, Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn build_carries_origin_height() {
        let config = GridConfig::new(Vec3::new(0.0, 3.0, 0.0), Vec2::new(5.0, 5.0), 0.5);
        let grid = Grid::build(config, |_, _| false).unwrap();
        for (_, node) in grid.iter() {
            assert_eq!(node.world_position.y, 3.0);
        }
    }

    #[test]
    fn build_rejects_bad_config() {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(5.0, 5.0), -0.5);
        assert!(Grid::build(config, |_, _| false).is_err());
    }

    #[test]
    fn obstacle_predicate_marks_unwalkable() {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(5.0, 5.0), 0.5);
        // Obstruct everything left of world x = 0.
        let grid = Grid::build(config, |p, _| p.x < 0.0).unwrap();
        for (_, node) in grid.iter() {
            assert_eq!(node.walkable, node.world_position.x >= 0.0);
        }
    }

    #[test]
    fn recompute_walkability_replaces_mask() {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(5.0, 5.0), 0.5);
        let mut grid = Grid::build(config, |_, _| true).unwrap();
        assert!(grid.iter().all(|(_, n)| !n.walkable));
        grid.recompute_walkability(|_, _| false);
        assert!(grid.iter().all(|(_, n)| n.walkable));
    }

    #[test]
    fn snap_is_nearest_cell() {
        let grid = open_grid(5.0);
        let id = grid.node_from_position(Vec3::ZERO);
        assert_eq!(grid.node(id).cell, Cell::new(2, 2));
    }

    #[test]
    fn snap_round_trips_node_centers() {
        for world in [4.0, 5.0] {
            let grid = open_grid(world);
            for (id, node) in grid.iter() {
                assert_eq!(grid.node_from_position(node.world_position), id);
            }
        }
    }

    #[test]
    fn snap_clamps_out_of_bounds() {
        let grid = open_grid(5.0);
        let id = grid.node_from_position(Vec3::new(100.0, 0.0, -100.0));
        assert_eq!(grid.node(id).cell, Cell::new(4, 0));
        let id = grid.node_from_position(Vec3::new(-100.0, 0.0, 100.0));
        assert_eq!(grid.node(id).cell, Cell::new(0, 4));
    }

    #[test]
    fn neighbors_filter_to_in_bounds() {
        let grid = open_grid(5.0);
        let mut buf = Vec::new();

        grid.neighbors(grid.id_at(Cell::ZERO).unwrap(), &mut buf);
        assert_eq!(buf.len(), 2);

        grid.neighbors(grid.id_at(Cell::new(2, 0)).unwrap(), &mut buf);
        assert_eq!(buf.len(), 3);

        grid.neighbors(grid.id_at(Cell::new(2, 2)).unwrap(), &mut buf);
        assert_eq!(buf.len(), 4);
        // Cardinal only: every neighbor differs on exactly one axis.
        for &n in &buf {
            let d = grid.node(n).cell - Cell::new(2, 2);
            assert_eq!(d.x.abs() + d.y.abs(), 1);
        }
    }

    #[test]
    fn clear_costs_resets_every_node() {
        let mut grid = open_grid(5.0);
        let id = grid.id_at(Cell::new(1, 1)).unwrap();
        grid.node_mut(id).g_cost = 40;
        grid.node_mut(id).h_cost = 28;
        grid.clear_costs();
        assert!(grid.iter().all(|(_, n)| n.g_cost == 0 && n.h_cost == 0));
    }

    #[test]
    fn id_at_rejects_out_of_bounds() {
        let grid = open_grid(5.0);
        assert!(grid.id_at(Cell::new(-1, 0)).is_none());
        assert!(grid.id_at(Cell::new(0, 5)).is_none());
        assert!(grid.id_at(Cell::new(4, 4)).is_some());
    }
}
