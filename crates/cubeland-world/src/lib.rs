pub mod grid;
pub mod rng;
pub mod sink;
pub mod streaming;
pub mod terrain;

use cubeland_core::block::BlockType;
use cubeland_core::config::WorldConfig;
use cubeland_core::math::world_center_column;
use cubeland_core::types::VoxelCoord;
use glam::Vec3;
use grid::BlockGrid;
use sink::RenderSink;
use streaming::{PassStats, VisibleSet};
use terrain::{TerrainGenerator, TerrainStats};

/// Primary public struct for the cubeland-world crate.
/// Owns the block grid and the visible set, and keeps the visible set a
/// subset of the grid across every edit.
pub struct World {
    grid: BlockGrid,
    visible: VisibleSet,
    width: u32,
    depth: u32,
    scan_height: i32,
    spawn_height: f32,
}

impl World {
    /// An empty world with the extent and visibility settings of `config`.
    pub fn empty(config: &WorldConfig) -> Self {
        Self {
            grid: BlockGrid::new(),
            visible: VisibleSet::new(config.render_distance, config.scan_height),
            width: config.world_width,
            depth: config.world_depth,
            scan_height: config.scan_height,
            spawn_height: config.spawn_height,
        }
    }

    /// Create a world and populate it with generated terrain and trees.
    /// Nothing is visible until the first [`World::refresh_visibility`].
    pub fn generate(config: &WorldConfig) -> (Self, TerrainStats) {
        let mut world = Self::empty(config);
        let capacity = (config.world_width as usize) * (config.world_depth as usize) * 16;
        world.grid = BlockGrid::with_capacity(capacity);
        let stats = TerrainGenerator::from_config(config).generate(&mut world.grid);
        (world, stats)
    }

    /// Insert a block into the grid only, without presenting it. Used while
    /// building a world; the next visibility pass picks it up.
    pub fn set_block(&mut self, coord: VoxelCoord, block: BlockType) -> bool {
        self.grid.set(coord, block)
    }

    /// Insert a block and, if it is within range of `reference`, present it
    /// immediately. Returns false if the cell was already occupied.
    pub fn place(
        &mut self,
        coord: VoxelCoord,
        block: BlockType,
        reference: Vec3,
        sink: &mut dyn RenderSink,
    ) -> bool {
        if !self.grid.set(coord, block) {
            return false;
        }
        self.visible.admit_one(&self.grid, coord, reference, sink);
        true
    }

    /// Remove a block from the grid and retract it in the same step.
    pub fn remove(&mut self, coord: VoxelCoord, sink: &mut dyn RenderSink) -> Option<BlockType> {
        let removed = self.grid.remove(coord)?;
        self.visible.retract_one(coord, sink);
        Some(removed)
    }

    /// Run a full evict/admit pass around `reference`.
    pub fn refresh_visibility(&mut self, reference: Vec3, sink: &mut dyn RenderSink) -> PassStats {
        self.visible.refresh(&self.grid, reference, sink)
    }

    /// Position `spawn_height` above the highest block of the centre column.
    pub fn spawn_point(&self) -> Vec3 {
        let column = world_center_column(self.width, self.depth);
        let top = self.grid.highest_occupied(column.x, column.z, self.scan_height);
        Vec3::new(
            column.x as f32 + 0.5,
            top as f32 + self.spawn_height,
            column.z as f32 + 0.5,
        )
    }

    pub fn block(&self, coord: VoxelCoord) -> Option<BlockType> {
        self.grid.get(coord)
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn is_visible(&self, coord: VoxelCoord) -> bool {
        self.visible.contains(coord)
    }

    /// World extent in blocks (width, depth).
    pub fn extent(&self) -> (u32, u32) {
        (self.width, self.depth)
    }

    pub fn scan_height(&self) -> i32 {
        self.scan_height
    }
}
