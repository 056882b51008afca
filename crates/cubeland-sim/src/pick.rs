use cubeland_core::block::BlockType;
use cubeland_core::constants::DEFAULT_REACH;
use cubeland_core::direction::Face;
use cubeland_core::math::{horizontal_basis, look_direction, voxel_at};
use cubeland_core::types::VoxelCoord;
use cubeland_world::World;
use glam::{IVec3, Vec2, Vec3};

/// Screen point of the crosshair in normalized device coordinates.
pub const CROSSHAIR: Vec2 = Vec2::ZERO;

/// Camera pose a pick is made from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Eye {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Eye {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }
}

/// Nearest visible block under a screen point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub coord: VoxelCoord,
    pub block: BlockType,
    /// Face the ray entered through; its normal points back at the eye.
    pub face: Face,
    /// Entry point on that face.
    pub point: Vec3,
    pub distance: f32,
}

impl RayHit {
    pub fn normal(&self) -> IVec3 {
        self.face.normal()
    }
}

/// Source of pick results. Only blocks in the world's visible set may be hit.
pub trait RayPicker {
    fn pick(&self, eye: &Eye, screen_point: Vec2, world: &World) -> Option<RayHit>;
}

/// Voxel-walking picker for a perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairPicker {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width over height.
    pub aspect: f32,
    pub reach: f32,
}

impl Default for CrosshairPicker {
    fn default() -> Self {
        Self {
            fov_y: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            reach: DEFAULT_REACH,
        }
    }
}

impl CrosshairPicker {
    pub fn with_reach(reach: f32) -> Self {
        Self {
            reach,
            ..Default::default()
        }
    }

    /// World-space ray direction through `screen_point` (x right, y up, both
    /// in -1..=1).
    pub fn ray_direction(&self, eye: &Eye, screen_point: Vec2) -> Vec3 {
        let forward = look_direction(eye.yaw, eye.pitch);
        if screen_point == CROSSHAIR {
            return forward;
        }
        let (_, right) = horizontal_basis(eye.yaw);
        let up = right.cross(forward);
        let half = (self.fov_y * 0.5).tan();
        let offset = right * (screen_point.x * half * self.aspect) + up * (screen_point.y * half);
        (forward + offset).try_normalize().unwrap_or(forward)
    }

    /// Walk the cells pierced by the ray in order (Amanatides & Woo) and stop
    /// at the first visible one. The cell containing the origin is skipped.
    pub fn cast(&self, origin: Vec3, direction: Vec3, world: &World) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let mut cell = voxel_at(origin);
        let mut step = IVec3::ZERO;
        let mut t_max = Vec3::splat(f32::INFINITY);
        let t_delta = direction.recip().abs();

        for axis in 0..3 {
            let d = direction[axis];
            let o = origin[axis];
            let c = cell[axis] as f32;
            if d > 0.0 {
                step[axis] = 1;
                t_max[axis] = (c + 1.0 - o) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_max[axis] = (c - o) / d;
            }
        }

        loop {
            let axis = if t_max.x < t_max.y {
                if t_max.x < t_max.z { 0 } else { 2 }
            } else if t_max.y < t_max.z {
                1
            } else {
                2
            };
            let distance = t_max[axis];
            if distance > self.reach {
                return None;
            }
            cell[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            if !world.is_visible(cell) {
                continue;
            }
            if let Some(block) = world.block(cell) {
                return Some(RayHit {
                    coord: cell,
                    block,
                    face: Face::entered_by_step(axis, step[axis]),
                    point: origin + direction * distance,
                    distance,
                });
            }
        }
    }
}

impl RayPicker for CrosshairPicker {
    fn pick(&self, eye: &Eye, screen_point: Vec2, world: &World) -> Option<RayHit> {
        let direction = self.ray_direction(eye, screen_point);
        self.cast(eye.position, direction, world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeland_core::config::WorldConfig;
    use cubeland_world::sink::NullSink;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn world_with(blocks: &[IVec3]) -> World {
        let mut world = World::empty(&WorldConfig::default());
        for &c in blocks {
            world.set_block(c, BlockType::Stone);
        }
        world.refresh_visibility(Vec3::new(0.5, 10.5, 0.5), &mut NullSink::default());
        world
    }

    #[test]
    fn test_crosshair_hits_block_ahead() {
        let world = world_with(&[IVec3::new(0, 10, -3)]);
        let eye = Eye::new(Vec3::new(0.5, 10.5, 0.5), 0.0, 0.0);
        let hit = CrosshairPicker::default()
            .pick(&eye, CROSSHAIR, &world)
            .expect("block straight ahead");
        assert_eq!(hit.coord, IVec3::new(0, 10, -3));
        assert_eq!(hit.face, Face::South);
        assert_eq!(hit.normal(), IVec3::Z);
        assert!((hit.distance - 2.5).abs() < EPS);
        assert!((hit.point.z + 2.0).abs() < EPS);
    }

    #[test]
    fn test_looking_down_hits_top_face() {
        let world = world_with(&[IVec3::new(0, 10, 0)]);
        let eye = Eye::new(Vec3::new(0.5, 12.5, 0.5), 0.0, -FRAC_PI_2);
        let hit = CrosshairPicker::default().pick(&eye, CROSSHAIR, &world).expect("floor");
        assert_eq!(hit.coord, IVec3::new(0, 10, 0));
        assert_eq!(hit.face, Face::Top);
        assert!((hit.distance - 1.5).abs() < EPS);
    }

    #[test]
    fn test_nearest_block_wins() {
        let world = world_with(&[IVec3::new(0, 10, -5), IVec3::new(0, 10, -2)]);
        let eye = Eye::new(Vec3::new(0.5, 10.5, 0.5), 0.0, 0.0);
        let hit = CrosshairPicker::default().pick(&eye, CROSSHAIR, &world).unwrap();
        assert_eq!(hit.coord, IVec3::new(0, 10, -2));
    }

    #[test]
    fn test_reach_limits_pick() {
        let world = world_with(&[IVec3::new(0, 10, -12)]);
        let eye = Eye::new(Vec3::new(0.5, 10.5, 0.5), 0.0, 0.0);
        assert!(CrosshairPicker::with_reach(8.0).pick(&eye, CROSSHAIR, &world).is_none());
        assert!(CrosshairPicker::with_reach(15.0).pick(&eye, CROSSHAIR, &world).is_some());
    }

    #[test]
    fn test_hidden_blocks_are_not_targets() {
        let mut world = world_with(&[]);
        world.set_block(IVec3::new(0, 10, -3), BlockType::Dirt);
        let eye = Eye::new(Vec3::new(0.5, 10.5, 0.5), 0.0, 0.0);
        let picker = CrosshairPicker::default();
        assert!(picker.pick(&eye, CROSSHAIR, &world).is_none(), "not yet visible");
        world.refresh_visibility(eye.position, &mut NullSink::default());
        assert_eq!(
            picker.pick(&eye, CROSSHAIR, &world).map(|h| h.block),
            Some(BlockType::Dirt)
        );
    }

    #[test]
    fn test_origin_cell_is_skipped() {
        let world = world_with(&[IVec3::new(0, 10, 0), IVec3::new(0, 10, -2)]);
        let eye = Eye::new(Vec3::new(0.5, 10.5, 0.5), 0.0, 0.0);
        let hit = CrosshairPicker::default().pick(&eye, CROSSHAIR, &world).unwrap();
        assert_eq!(hit.coord, IVec3::new(0, 10, -2));
    }

    #[test]
    fn test_off_centre_screen_point() {
        let world = world_with(&[IVec3::new(3, 10, -3)]);
        let picker = CrosshairPicker {
            fov_y: FRAC_PI_2,
            aspect: 1.0,
            reach: 10.0,
        };
        let eye = Eye::new(Vec3::new(0.3, 10.5, 0.5), 0.0, 0.0);
        // Right edge of a 90° square viewport is 45° right of forward.
        let dir = picker.ray_direction(&eye, Vec2::new(1.0, 0.0));
        assert!((dir - Vec3::new(1.0, 0.0, -1.0).normalize()).length() < EPS, "{dir:?}");
        let hit = picker.pick(&eye, Vec2::new(1.0, 0.0), &world).unwrap();
        assert_eq!(hit.coord, IVec3::new(3, 10, -3));
        assert!(picker.pick(&eye, CROSSHAIR, &world).is_none());
    }

    #[test]
    fn test_degenerate_direction_misses() {
        let world = world_with(&[IVec3::new(0, 10, -1)]);
        let picker = CrosshairPicker::default();
        assert!(picker.cast(Vec3::new(0.5, 10.5, 0.5), Vec3::ZERO, &world).is_none());
    }
}
