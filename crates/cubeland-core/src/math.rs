use crate::types::VoxelCoord;
use glam::{IVec3, Vec3};

/// Voxel containing a continuous world position (component-wise floor).
pub fn voxel_at(position: Vec3) -> VoxelCoord {
    position.floor().as_ivec3()
}

/// Centre of a voxel in world space.
pub fn voxel_center(coord: VoxelCoord) -> Vec3 {
    coord.as_vec3() + Vec3::splat(0.5)
}

/// Squared distance from a voxel's integer coordinate to a reference point.
/// The voxel is measured at its minimum corner.
pub fn distance_sq(coord: VoxelCoord, reference: Vec3) -> f32 {
    (coord.as_vec3() - reference).length_squared()
}

/// Half-width in whole blocks of the cube that encloses a sphere of `radius`.
pub fn scan_half_extent(radius: f32) -> i32 {
    radius.max(0.0).ceil() as i32
}

/// Horizontal forward and right unit vectors for a camera yaw (radians).
///
/// Yaw 0 looks down -Z. Pitch never enters the basis, so looking up or down
/// does not slow horizontal movement.
pub fn horizontal_basis(yaw: f32) -> (Vec3, Vec3) {
    let (sin, cos) = yaw.sin_cos();
    let forward = Vec3::new(-sin, 0.0, -cos);
    let right = forward.cross(Vec3::Y);
    (forward, right)
}

/// Unit look direction for a camera yaw and pitch (radians).
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_y, cos_y) = yaw.sin_cos();
    let (sin_p, cos_p) = pitch.sin_cos();
    Vec3::new(-sin_y * cos_p, sin_p, -cos_y * cos_p)
}

/// Horizontal centre column of a `width` × `depth` world.
pub fn world_center_column(width: u32, depth: u32) -> IVec3 {
    IVec3::new((width / 2) as i32, 0, (depth / 2) as i32)
}
