use crate::constants::*;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable world parameters consumed once at startup.
///
/// Every field has a default, so a RON file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// World extent along X in blocks.
    pub world_width: u32,
    /// World extent along Z in blocks.
    pub world_depth: u32,
    /// Render distance in blocks.
    pub render_distance: f32,
    /// Upper y bound of column scans and of the visibility admission band.
    pub scan_height: i32,
    /// Gravity per reference tick squared.
    pub gravity: f32,
    /// Jump impulse (blocks per reference tick).
    pub jump_force: f32,
    /// Ground speed (blocks per reference tick).
    pub movement_speed: f32,
    /// Speed multiplier while airborne (0.0–1.0).
    pub air_control: f32,
    /// Maximum falling speed (blocks per reference tick).
    pub terminal_velocity: f32,
    /// Number of trees placed by the generator.
    pub tree_count: u32,
    /// Seed of the tree placement hash.
    pub seed: u64,
    /// Epsilon of the collision sample constellation.
    pub collision_margin: f32,
    /// Seconds between periodic visibility passes.
    pub visibility_interval: f32,
    /// Larger elapsed times (seconds) drop the tick.
    pub max_frame_delta: f32,
    /// Fell-through-world threshold on the y axis.
    pub fall_limit: f32,
    /// Spawn height above the highest block of the centre column.
    pub spawn_height: f32,
    /// Pick distance of the crosshair raycaster.
    pub reach: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_EXTENT,
            world_depth: DEFAULT_WORLD_EXTENT,
            render_distance: DEFAULT_RENDER_DISTANCE,
            scan_height: DEFAULT_SCAN_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            jump_force: DEFAULT_JUMP_FORCE,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            air_control: DEFAULT_AIR_CONTROL,
            terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
            tree_count: DEFAULT_TREE_COUNT,
            seed: DEFAULT_SEED,
            collision_margin: DEFAULT_COLLISION_MARGIN,
            visibility_interval: DEFAULT_VISIBILITY_INTERVAL,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            fall_limit: DEFAULT_FALL_LIMIT,
            spawn_height: DEFAULT_SPAWN_HEIGHT,
            reach: DEFAULT_REACH,
        }
    }
}

impl WorldConfig {
    /// Parse a config from a RON string and validate it.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        let config: WorldConfig = options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width == 0 {
            return Err(invalid("world_width", "must be at least 1 block"));
        }
        if self.world_depth == 0 {
            return Err(invalid("world_depth", "must be at least 1 block"));
        }
        positive("render_distance", self.render_distance)?;
        positive("visibility_interval", self.visibility_interval)?;
        positive("max_frame_delta", self.max_frame_delta)?;
        positive("terminal_velocity", self.terminal_velocity)?;
        if self.terminal_velocity >= 1.0 {
            return Err(invalid(
                "terminal_velocity",
                "must be below one block per reference tick",
            ));
        }
        positive("reach", self.reach)?;
        non_negative("gravity", self.gravity)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("movement_speed", self.movement_speed)?;
        non_negative("collision_margin", self.collision_margin)?;
        non_negative("spawn_height", self.spawn_height)?;
        if !(0.0..=1.0).contains(&self.air_control) {
            return Err(invalid("air_control", "must be within 0.0..=1.0"));
        }
        if self.scan_height < 0 {
            return Err(invalid("scan_height", "must not be negative"));
        }
        if !self.fall_limit.is_finite() {
            return Err(invalid("fall_limit", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must not be negative, got {value}")))
    }
}
