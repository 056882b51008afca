use glam::Vec2;

/// Intent sampled from the input source once per tick.
///
/// Movement keys and jump are held state. `break_block` and `place_block`
/// are triggers: true only on the tick the action was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub break_block: bool,
    pub place_block: bool,
    /// Inventory slot requested this tick, if any.
    pub select_slot: Option<usize>,
    /// Camera yaw in radians; 0 looks down -Z.
    pub yaw: f32,
    /// Camera pitch in radians; positive looks up.
    pub pitch: f32,
}

impl InputState {
    /// Horizontal movement axes: x is right minus left, y is forward minus
    /// back. Opposing keys cancel.
    pub fn move_axes(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.back))
    }

    pub fn with_look(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}
