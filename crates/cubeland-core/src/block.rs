use serde::{Deserialize, Serialize};

/// Type tag of an occupied voxel. Air is the absence of an entry, never a
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    Grass = 0,
    Dirt = 1,
    Stone = 2,
    Wood = 3,
    Leaves = 4,
}

/// Every block type, in inventory slot order.
pub const ALL_BLOCK_TYPES: [BlockType; 5] = [
    BlockType::Grass,
    BlockType::Dirt,
    BlockType::Stone,
    BlockType::Wood,
    BlockType::Leaves,
];

impl BlockType {
    /// Human-readable name for logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Wood => "wood",
            BlockType::Leaves => "leaves",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
