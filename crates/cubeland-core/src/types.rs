use glam::IVec3;

/// Integer voxel coordinate. Continuous positions are floored before lookup.
pub type VoxelCoord = IVec3;

/// Opaque handle the renderer hands back when a block is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PresentationHandle(pub u64);
