use crate::grid::BlockGrid;
use crate::rng::{hash_to_range, placement_hash};
use cubeland_core::block::BlockType;
use cubeland_core::config::WorldConfig;
use cubeland_core::constants::{DIRT_DEPTH, TRUNK_HEIGHT};
use cubeland_core::types::VoxelCoord;
use glam::IVec3;
use std::time::Instant;

const SALT_TREE_X: u32 = 0;
const SALT_TREE_Z: u32 = 1;

/// Base terrain level the height bands oscillate around.
const BASE_HEIGHT: f64 = 15.0;

/// Deterministic height field plus tree scattering over a `width` × `depth`
/// area starting at the origin.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    width: u32,
    depth: u32,
    tree_count: u32,
    seed: u64,
    scan_height: i32,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerrainStats {
    pub columns: u32,
    pub blocks: usize,
    pub trees: u32,
}

impl TerrainGenerator {
    pub fn new(width: u32, depth: u32, tree_count: u32, seed: u64, scan_height: i32) -> Self {
        Self {
            width,
            depth,
            tree_count,
            seed,
            scan_height,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(
            config.world_width,
            config.world_depth,
            config.tree_count,
            config.seed,
            config.scan_height,
        )
    }

    /// Fill `grid` with the height field, then scatter trees.
    ///
    /// Column layers, top down: grass at the surface height, three dirt
    /// blocks, then stone down to y = 1. Nothing is placed at y <= 0.
    pub fn generate(&self, grid: &mut BlockGrid) -> TerrainStats {
        let start = Instant::now();

        for x in 0..self.width as i32 {
            for z in 0..self.depth as i32 {
                let height = Self::height_at(x, z);
                self.fill_column(grid, x, z, height);
            }
        }

        let mut trees = 0;
        for index in 0..self.tree_count {
            let (x, z) = self.tree_column(index);
            let y = grid.highest_occupied(x, z, self.scan_height) + 1;
            Self::place_tree(grid, IVec3::new(x, y, z));
            trees += 1;
        }

        let stats = TerrainStats {
            columns: self.width * self.depth,
            blocks: grid.len(),
            trees,
        };
        log::info!(
            "Terrain generated: {} columns, {} blocks, {} trees in {:.1}ms",
            stats.columns,
            stats.blocks,
            stats.trees,
            start.elapsed().as_secs_f64() * 1000.0
        );
        stats
    }

    /// Surface height of column (x, z). Two sine/cosine bands over a fixed
    /// base; no randomness, so every run agrees.
    pub fn height_at(x: i32, z: i32) -> i32 {
        let x = x as f64;
        let z = z as f64;
        let fine = (x * 0.1).sin() * (z * 0.1).cos() * 2.0;
        let broad = (x * 0.05).sin() * (z * 0.05).cos() * 4.0;
        (fine + broad + BASE_HEIGHT).floor() as i32
    }

    fn fill_column(&self, grid: &mut BlockGrid, x: i32, z: i32, height: i32) {
        grid.set(IVec3::new(x, height, z), BlockType::Grass);
        for y in ((height - DIRT_DEPTH).max(1)..height).rev() {
            grid.set(IVec3::new(x, y, z), BlockType::Dirt);
        }
        for y in (1..=height - DIRT_DEPTH - 1).rev() {
            grid.set(IVec3::new(x, y, z), BlockType::Stone);
        }
    }

    /// Column of the `index`-th tree, inside the world bounds.
    pub fn tree_column(&self, index: u32) -> (i32, i32) {
        let hx = placement_hash(self.seed, index, SALT_TREE_X);
        let hz = placement_hash(self.seed, index, SALT_TREE_Z);
        (
            hash_to_range(hx, self.width.max(1)) as i32,
            hash_to_range(hz, self.depth.max(1)) as i32,
        )
    }

    /// Grow a tree whose trunk starts at `base`.
    ///
    /// The trunk is `TRUNK_HEIGHT` wood blocks. A 3×3×3 leaf cube spans the
    /// trunk's top two blocks and the cell above them; the two trunk cells
    /// inside the cube are skipped. Overlaps with existing blocks resolve
    /// through first-write-wins.
    pub fn place_tree(grid: &mut BlockGrid, base: VoxelCoord) {
        for dy in 0..TRUNK_HEIGHT {
            grid.set(base + IVec3::new(0, dy, 0), BlockType::Wood);
        }

        let leaf_base = base.y + TRUNK_HEIGHT - 2;
        let trunk_top = base.y + TRUNK_HEIGHT - 1;
        for y in leaf_base..leaf_base + 3 {
            for dx in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dz == 0 && y <= trunk_top {
                        continue;
                    }
                    grid.set(IVec3::new(base.x + dx, y, base.z + dz), BlockType::Leaves);
                }
            }
        }
    }
}
