use crate::pick::RayHit;
use cubeland_core::block::{BlockType, ALL_BLOCK_TYPES};
use cubeland_core::constants::PLACE_CLEARANCE;
use cubeland_core::math::{voxel_at, voxel_center};
use cubeland_core::types::VoxelCoord;
use cubeland_world::sink::RenderSink;
use cubeland_world::World;
use glam::Vec3;

/// Fixed hotbar of placeable block types with one selected slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: [BlockType; 5],
    selected: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: ALL_BLOCK_TYPES,
            selected: 0,
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `slot`. Out-of-range slots are ignored; returns whether the
    /// selection changed.
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= self.slots.len() || slot == self.selected {
            return false;
        }
        self.selected = slot;
        log::debug!("Selected slot {} ({})", slot, self.slots[slot]);
        true
    }

    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    pub fn selected_block(&self) -> BlockType {
        self.slots[self.selected]
    }

    pub fn slots(&self) -> &[BlockType] {
        &self.slots
    }
}

/// Result of a break or place request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Placed { coord: VoxelCoord, block: BlockType },
    Removed { coord: VoxelCoord, block: BlockType },
    /// Target cell already holds a block.
    Occupied(VoxelCoord),
    /// Target cell overlaps the player.
    Obstructed(VoxelCoord),
    /// Nothing visible under the crosshair.
    Missed,
}

impl EditOutcome {
    pub fn changed_world(&self) -> bool {
        matches!(self, EditOutcome::Placed { .. } | EditOutcome::Removed { .. })
    }
}

/// Cell on the near side of the hit face.
pub fn place_target(hit: &RayHit) -> VoxelCoord {
    voxel_at(hit.point + hit.face.normal_f32() * 0.5)
}

/// Whether a block at `coord` would intersect the player standing at
/// `player`.
pub fn overlaps_player(coord: VoxelCoord, player: Vec3) -> bool {
    let d = (player - voxel_center(coord)).abs();
    d.x < PLACE_CLEARANCE[0] && d.y < PLACE_CLEARANCE[1] && d.z < PLACE_CLEARANCE[2]
}

/// Place `block` against the hit face. Visible immediately when in range of
/// `player`.
pub fn place_block(
    world: &mut World,
    hit: Option<&RayHit>,
    block: BlockType,
    player: Vec3,
    sink: &mut dyn RenderSink,
) -> EditOutcome {
    let Some(hit) = hit else {
        return EditOutcome::Missed;
    };
    let coord = place_target(hit);
    if overlaps_player(coord, player) {
        return EditOutcome::Obstructed(coord);
    }
    if !world.place(coord, block, player, sink) {
        return EditOutcome::Occupied(coord);
    }
    log::debug!("Placed {block} at {coord}");
    EditOutcome::Placed { coord, block }
}

/// Remove the hit block and retract it in the same step.
pub fn break_block(
    world: &mut World,
    hit: Option<&RayHit>,
    sink: &mut dyn RenderSink,
) -> EditOutcome {
    let Some(hit) = hit else {
        return EditOutcome::Missed;
    };
    match world.remove(hit.coord, sink) {
        Some(block) => {
            log::debug!("Removed {block} at {}", hit.coord);
            EditOutcome::Removed {
                coord: hit.coord,
                block,
            }
        }
        None => EditOutcome::Missed,
    }
}
