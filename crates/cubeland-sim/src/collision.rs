use cubeland_core::constants::{DEFAULT_COLLISION_MARGIN, PLAYER_DEPTH, PLAYER_HEIGHT, PLAYER_WIDTH};
use cubeland_core::math::voxel_at;
use cubeland_world::grid::BlockGrid;
use glam::Vec3;

/// Player bounding box, centred on the player position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for PlayerBounds {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            depth: PLAYER_DEPTH,
        }
    }
}

impl PlayerBounds {
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Per-face contact flags from one probe. Left/right are -X/+X, back/front
/// are -Z/+Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub front: bool,
    pub back: bool,
    /// Top surface y of the highest block under the feet, when `bottom` is set.
    pub floor: Option<i32>,
}

impl Contacts {
    pub fn blocks_x(&self) -> bool {
        self.left || self.right
    }

    pub fn blocks_y(&self) -> bool {
        self.top || self.bottom
    }

    pub fn blocks_z(&self) -> bool {
        self.front || self.back
    }
}

/// Sample offsets around the player centre, grouped by the face they guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeLayout {
    /// Just below the box: centre plus four points inset by the margin from
    /// the X and Z edges, so a ledge under one edge still holds the player.
    pub feet: [Vec3; 5],
    /// Just above the box.
    pub head: Vec3,
    /// Mid height, just outside each lateral face: +X, -X, +Z, -Z.
    pub sides: [Vec3; 4],
    /// Mid height, just outside each vertical edge.
    pub corners: [Vec3; 4],
}

impl ProbeLayout {
    pub fn new(bounds: PlayerBounds, margin: f32) -> Self {
        let hw = bounds.width / 2.0;
        let hh = bounds.half_height();
        let hd = bounds.depth / 2.0;
        let feet = -hh - margin;
        let head = hh + margin;
        let sx = hw + margin;
        let sz = hd + margin;
        Self {
            feet: [
                Vec3::new(0.0, feet, 0.0),
                Vec3::new(hw - margin, feet, 0.0),
                Vec3::new(-hw + margin, feet, 0.0),
                Vec3::new(0.0, feet, hd - margin),
                Vec3::new(0.0, feet, -hd + margin),
            ],
            head: Vec3::new(0.0, head, 0.0),
            sides: [
                Vec3::new(sx, 0.0, 0.0),
                Vec3::new(-sx, 0.0, 0.0),
                Vec3::new(0.0, 0.0, sz),
                Vec3::new(0.0, 0.0, -sz),
            ],
            corners: [
                Vec3::new(sx, 0.0, sz),
                Vec3::new(sx, 0.0, -sz),
                Vec3::new(-sx, 0.0, sz),
                Vec3::new(-sx, 0.0, -sz),
            ],
        }
    }

    /// Every sample offset, feet first.
    #[cfg(test)]
    fn all(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.feet
            .iter()
            .copied()
            .chain(std::iter::once(self.head))
            .chain(self.sides.iter().copied())
            .chain(self.corners.iter().copied())
    }
}

/// Discrete occupancy probe of a candidate position.
///
/// Only the destination is tested, not the swept path, so a large enough
/// step can pass through a one-block wall. The movement integrator clamps
/// fall speed and splits long frames to keep each probed step short.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    bounds: PlayerBounds,
    layout: ProbeLayout,
}

impl CollisionResolver {
    pub fn new(bounds: PlayerBounds, margin: f32) -> Self {
        Self {
            bounds,
            layout: ProbeLayout::new(bounds, margin),
        }
    }

    pub fn bounds(&self) -> PlayerBounds {
        self.bounds
    }

    /// Contact flags for the player centred at `candidate`.
    ///
    /// Feet samples only ever set `bottom` and the head sample only `top`.
    /// Side samples set the flag of their face. A corner sample sets both of
    /// its lateral flags, but only when neither adjacent side sample hit: a
    /// flat wall is already reported by its side sample, and letting its
    /// corners flag the other axis would stop the player sliding along it.
    pub fn probe(&self, grid: &BlockGrid, candidate: Vec3) -> Contacts {
        let occupied = |offset: Vec3| grid.contains(voxel_at(candidate + offset));
        let mut contacts = Contacts::default();

        for offset in self.layout.feet {
            let voxel = voxel_at(candidate + offset);
            if grid.contains(voxel) {
                contacts.bottom = true;
                let top = voxel.y + 1;
                contacts.floor = Some(contacts.floor.map_or(top, |f| f.max(top)));
            }
        }

        contacts.top = occupied(self.layout.head);

        let [east, west, south, north] = self.layout.sides;
        contacts.right = occupied(east);
        contacts.left = occupied(west);
        contacts.front = occupied(south);
        contacts.back = occupied(north);

        for corner in self.layout.corners {
            let x_face = if corner.x > 0.0 { contacts.right } else { contacts.left };
            let z_face = if corner.z > 0.0 { contacts.front } else { contacts.back };
            if x_face || z_face || !occupied(corner) {
                continue;
            }
            if corner.x > 0.0 {
                contacts.right = true;
            } else {
                contacts.left = true;
            }
            if corner.z > 0.0 {
                contacts.front = true;
            } else {
                contacts.back = true;
            }
        }

        contacts
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(PlayerBounds::default(), DEFAULT_COLLISION_MARGIN)
    }
}
