use glam::{IVec3, Vec3};

/// One of the six faces of a voxel, named by the axis its normal points along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +X
    East = 0,
    /// -X
    West = 1,
    /// +Y
    Top = 2,
    /// -Y
    Bottom = 3,
    /// +Z
    South = 4,
    /// -Z
    North = 5,
}

/// All six faces in fixed order.
pub const ALL_FACES: [Face; 6] = [
    Face::East,
    Face::West,
    Face::Top,
    Face::Bottom,
    Face::South,
    Face::North,
];

impl Face {
    /// Outward normal of this face. Y-up convention: Top = (0,1,0).
    pub fn normal(self) -> IVec3 {
        match self {
            Face::East => IVec3::new(1, 0, 0),
            Face::West => IVec3::new(-1, 0, 0),
            Face::Top => IVec3::new(0, 1, 0),
            Face::Bottom => IVec3::new(0, -1, 0),
            Face::South => IVec3::new(0, 0, 1),
            Face::North => IVec3::new(0, 0, -1),
        }
    }

    /// Normal as a float vector, for offsetting hit points.
    pub fn normal_f32(self) -> Vec3 {
        self.normal().as_vec3()
    }

    /// Face entered when a ray steps by `step` (±1) along `axis` (0=x, 1=y, 2=z).
    /// A ray moving in +X enters the next voxel through its West face.
    pub fn entered_by_step(axis: usize, step: i32) -> Face {
        match (axis, step > 0) {
            (0, true) => Face::West,
            (0, false) => Face::East,
            (1, true) => Face::Bottom,
            (1, false) => Face::Top,
            (_, true) => Face::North,
            (_, false) => Face::South,
        }
    }
}
