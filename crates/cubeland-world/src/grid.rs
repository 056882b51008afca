use cubeland_core::block::BlockType;
use cubeland_core::types::VoxelCoord;
use glam::IVec3;
use std::collections::HashMap;

/// Sparse ground truth of the world: occupied voxels and their block type.
///
/// Absence of a key is air. There are no bounds; any coordinate outside the
/// generated area is simply empty.
#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    blocks: HashMap<VoxelCoord, BlockType>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a block if the cell is empty. First write wins: an occupied
    /// cell is left untouched. Returns whether the block was inserted.
    pub fn set(&mut self, coord: VoxelCoord, block: BlockType) -> bool {
        match self.blocks.entry(coord) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(block);
                true
            }
        }
    }

    /// Remove the block at `coord`, returning its type if one was there.
    pub fn remove(&mut self, coord: VoxelCoord) -> Option<BlockType> {
        self.blocks.remove(&coord)
    }

    pub fn get(&self, coord: VoxelCoord) -> Option<BlockType> {
        self.blocks.get(&coord).copied()
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Highest occupied y in column (x, z), scanning down from `y_max` to 0.
    /// Returns 0 for an empty column.
    pub fn highest_occupied(&self, x: i32, z: i32, y_max: i32) -> i32 {
        (0..=y_max)
            .rev()
            .find(|&y| self.contains(IVec3::new(x, y, z)))
            .unwrap_or(0)
    }

    /// Number of occupied voxels.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterator over all occupied voxels.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, BlockType)> + '_ {
        self.blocks.iter().map(|(coord, block)| (*coord, *block))
    }
}
