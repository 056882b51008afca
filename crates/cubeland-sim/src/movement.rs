use crate::collision::{CollisionResolver, Contacts};
use crate::input::InputState;
use cubeland_core::config::WorldConfig;
use cubeland_core::constants::REFERENCE_TICK_RATE;
use cubeland_core::math::horizontal_basis;
use cubeland_world::World;
use glam::Vec3;

/// Rounding allowance when splitting a frame into reference ticks, so a
/// 1/60 s frame whose scale rounds to just over 1.0 stays a single step.
const SUB_STEP_SLACK: f32 = 1e-3;

/// Kinematic state of the player avatar. `position` is the bounding box
/// centre.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    /// Set when a jump fires, cleared when the jump input is released.
    pub jump_latched: bool,
}

impl PlayerState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Physics tunables, all per reference tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    pub gravity: f32,
    pub jump_force: f32,
    pub movement_speed: f32,
    pub air_control: f32,
    pub terminal_velocity: f32,
    pub fall_limit: f32,
}

impl MovementParams {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            gravity: config.gravity,
            jump_force: config.jump_force,
            movement_speed: config.movement_speed,
            air_control: config.air_control,
            terminal_velocity: config.terminal_velocity,
            fall_limit: config.fall_limit,
        }
    }
}

impl Default for MovementParams {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

/// What happened during one integrator step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    pub contacts: Contacts,
    pub jumped: bool,
    pub respawned: bool,
}

/// Per-tick player physics: gravity, camera-relative walking, latched jump,
/// then an axis-separated response to one collision probe.
#[derive(Debug, Clone, Copy)]
pub struct MovementIntegrator {
    params: MovementParams,
    resolver: CollisionResolver,
}

impl MovementIntegrator {
    pub fn new(params: MovementParams, resolver: CollisionResolver) -> Self {
        Self { params, resolver }
    }

    /// Advance `player` by `dt` seconds. `dt` is assumed finite and already
    /// bounded by the caller.
    ///
    /// A frame longer than one reference tick is split into equal sub-steps
    /// of at most one reference tick each, so no single probe moves the
    /// player further than the terminal velocity allows.
    pub fn step(
        &self,
        player: &mut PlayerState,
        input: &InputState,
        dt: f32,
        world: &World,
    ) -> StepOutcome {
        let p = &self.params;
        let scale = dt * REFERENCE_TICK_RATE;
        let sub_steps = (scale - SUB_STEP_SLACK).ceil().max(1.0);
        let sub_scale = scale / sub_steps;
        let mut outcome = StepOutcome::default();

        for i in 0..sub_steps as u32 {
            if !player.grounded {
                player.velocity.y -= p.gravity * sub_scale;
                player.velocity.y = player.velocity.y.max(-p.terminal_velocity);
            }

            if i == 0 {
                let horizontal = self.horizontal_velocity(input, player.grounded);
                player.velocity.x = horizontal.x;
                player.velocity.z = horizontal.z;

                if input.jump {
                    if player.grounded && !player.jump_latched {
                        player.velocity.y = p.jump_force;
                        player.grounded = false;
                        player.jump_latched = true;
                        outcome.jumped = true;
                    }
                } else {
                    player.jump_latched = false;
                }
            }

            outcome.contacts = self.advance(player, sub_scale, world);

            if player.position.y < p.fall_limit {
                let spawn = world.spawn_point();
                log::warn!(
                    "Player fell below y = {} at ({:.1}, {:.1}); respawning at ({:.1}, {:.1}, {:.1})",
                    p.fall_limit,
                    player.position.x,
                    player.position.z,
                    spawn.x,
                    spawn.y,
                    spawn.z
                );
                player.position = spawn;
                player.velocity = Vec3::ZERO;
                player.grounded = false;
                outcome.respawned = true;
                break;
            }
        }

        outcome
    }

    /// Probe one sub-step ahead and commit each unblocked axis.
    fn advance(&self, player: &mut PlayerState, scale: f32, world: &World) -> Contacts {
        let candidate = player.position + player.velocity * scale;
        let contacts = self.resolver.probe(world.grid(), candidate);

        if contacts.blocks_x() {
            player.velocity.x = 0.0;
        } else {
            player.position.x = candidate.x;
        }

        if contacts.blocks_z() {
            player.velocity.z = 0.0;
        } else {
            player.position.z = candidate.z;
        }

        if contacts.blocks_y() {
            player.velocity.y = 0.0;
            player.grounded = contacts.bottom;
            // Settle onto the supporting surface, never lifting the player.
            if let Some(floor) = contacts.floor {
                let rest = floor as f32 + self.resolver.bounds().half_height();
                player.position.y = player.position.y.min(rest);
            }
        } else {
            player.position.y = candidate.y;
            player.grounded = false;
        }

        contacts
    }

    /// Camera-relative walking velocity. Diagonals are normalized; no input
    /// means an immediate stop.
    fn horizontal_velocity(&self, input: &InputState, grounded: bool) -> Vec3 {
        let axes = input.move_axes();
        let (forward, right) = horizontal_basis(input.yaw);
        let Some(direction) = (forward * axes.y + right * axes.x).try_normalize() else {
            return Vec3::ZERO;
        };
        let mut speed = self.params.movement_speed;
        if !grounded {
            speed *= self.params.air_control;
        }
        direction * speed
    }
}
