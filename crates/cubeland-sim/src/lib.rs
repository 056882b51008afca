pub mod collision;
pub mod edit;
pub mod input;
pub mod movement;
pub mod pick;

#[cfg(test)]
mod test_harness;

use collision::{CollisionResolver, PlayerBounds};
use cubeland_core::config::WorldConfig;
use cubeland_core::error::ConfigError;
use cubeland_world::sink::RenderSink;
use cubeland_world::streaming::PassStats;
use cubeland_world::World;
use edit::{EditOutcome, Inventory};
use input::InputState;
use movement::{MovementIntegrator, MovementParams, PlayerState, StepOutcome};
use pick::{Eye, RayPicker, CROSSHAIR};

/// Everything one call to [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// The elapsed time was rejected and nothing ran.
    pub skipped: bool,
    pub step: StepOutcome,
    pub edit: Option<EditOutcome>,
    /// Statistics of the periodic visibility pass, if one ran this tick.
    pub visibility: Option<PassStats>,
}

/// Primary public struct for the cubeland-sim crate.
/// Owns the world, the player and the inventory, and advances them one tick
/// at a time: input, movement, edits, then the periodic visibility pass.
pub struct Simulation {
    config: WorldConfig,
    world: World,
    player: PlayerState,
    inventory: Inventory,
    mover: MovementIntegrator,
    visibility_timer: f32,
    ticks: u64,
}

impl Simulation {
    /// Validate `config`, generate the world and spawn the player above its
    /// centre column.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (world, _) = World::generate(&config);
        Self::with_world(config, world)
    }

    /// Validate `config` and wrap an existing world.
    pub fn with_world(config: WorldConfig, world: World) -> Result<Self, ConfigError> {
        config.validate()?;
        let resolver = CollisionResolver::new(PlayerBounds::default(), config.collision_margin);
        let mover = MovementIntegrator::new(MovementParams::from_config(&config), resolver);
        let spawn = world.spawn_point();
        log::info!(
            "Player spawned at ({:.1}, {:.1}, {:.1})",
            spawn.x,
            spawn.y,
            spawn.z
        );
        Ok(Self {
            config,
            world,
            player: PlayerState::at(spawn),
            inventory: Inventory::new(),
            mover,
            visibility_timer: 0.0,
            ticks: 0,
        })
    }

    /// Initial visibility pass around the spawn point.
    pub fn prime(&mut self, sink: &mut dyn RenderSink) -> PassStats {
        let stats = self.world.refresh_visibility(self.player.position, sink);
        log::info!("Initial visibility pass: {} blocks visible", stats.visible);
        stats
    }

    /// Advance by `dt` seconds.
    ///
    /// A non-finite, negative or too large `dt` is a dropped frame: the tick
    /// is skipped entirely rather than integrated in one huge step.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputState,
        picker: &dyn RayPicker,
        sink: &mut dyn RenderSink,
    ) -> TickReport {
        if !dt.is_finite() || dt < 0.0 || dt > self.config.max_frame_delta {
            log::trace!("Dropped frame: dt = {dt}");
            return TickReport {
                skipped: true,
                ..Default::default()
            };
        }
        self.ticks += 1;

        if let Some(slot) = input.select_slot {
            self.inventory.select(slot);
        }

        let step = self.mover.step(&mut self.player, input, dt, &self.world);

        let edit = if input.break_block || input.place_block {
            let eye = Eye::new(self.player.position, input.yaw, input.pitch);
            let hit = picker.pick(&eye, CROSSHAIR, &self.world);
            let outcome = if input.break_block {
                edit::break_block(&mut self.world, hit.as_ref(), sink)
            } else {
                edit::place_block(
                    &mut self.world,
                    hit.as_ref(),
                    self.inventory.selected_block(),
                    self.player.position,
                    sink,
                )
            };
            Some(outcome)
        } else {
            None
        };

        self.visibility_timer += dt;
        let visibility = if self.visibility_timer >= self.config.visibility_interval {
            self.visibility_timer = 0.0;
            Some(self.world.refresh_visibility(self.player.position, sink))
        } else {
            None
        };

        TickReport {
            skipped: false,
            step,
            edit,
            visibility,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Ticks that ran, not counting skipped ones.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
