//! Single source of truth for shared constants.
//! Tunable values live in `WorldConfig`; the constants here are either its
//! defaults or fixed properties of the block/player model.

/// Default world extent in blocks along X and Z (8 × 16 = 128), held in one
/// sparse grid.
pub const DEFAULT_WORLD_EXTENT: u32 = 128;

/// Default render distance in blocks.
pub const DEFAULT_RENDER_DISTANCE: f32 = 20.0;

/// Upper y bound for column scans and the visibility admission band.
pub const DEFAULT_SCAN_HEIGHT: i32 = 100;

/// Gravity per reference tick squared.
pub const DEFAULT_GRAVITY: f32 = 0.08;

/// Vertical velocity applied on jump (blocks per reference tick).
pub const DEFAULT_JUMP_FORCE: f32 = 0.5;

/// Horizontal speed on the ground (blocks per reference tick).
pub const DEFAULT_MOVEMENT_SPEED: f32 = 0.15;

/// Horizontal speed multiplier while airborne.
pub const DEFAULT_AIR_CONTROL: f32 = 0.8;

/// Largest downward speed (blocks per reference tick). Kept below one block
/// so a single reference tick cannot skip a one-block floor.
pub const DEFAULT_TERMINAL_VELOCITY: f32 = 0.9;

/// Number of trees scattered by the terrain generator.
pub const DEFAULT_TREE_COUNT: u32 = 10;

/// Seed of the tree placement hash.
pub const DEFAULT_SEED: u64 = 1337;

/// Epsilon of the collision sample constellation.
pub const DEFAULT_COLLISION_MARGIN: f32 = 0.1;

/// Seconds between periodic visibility passes.
pub const DEFAULT_VISIBILITY_INTERVAL: f32 = 0.5;

/// Elapsed times above this (seconds) are treated as a dropped frame.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.2;

/// Below this y the player is considered to have fallen through the world.
pub const DEFAULT_FALL_LIMIT: f32 = -10.0;

/// Spawn/respawn height above the highest block of the centre column.
pub const DEFAULT_SPAWN_HEIGHT: f32 = 3.0;

/// Velocities are expressed per tick at this rate; elapsed seconds are
/// scaled by it before integration.
pub const REFERENCE_TICK_RATE: f32 = 60.0;

/// Player bounding box (width, height, depth) in blocks.
pub const PLAYER_WIDTH: f32 = 0.6;
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_DEPTH: f32 = 0.6;

/// Per-axis half extents of the no-build zone around the player. A block
/// whose centre is closer than this on every axis is not placed.
pub const PLACE_CLEARANCE: [f32; 3] = [0.8, 1.8, 0.8];

/// Trunk height of generated trees.
pub const TRUNK_HEIGHT: i32 = 4;

/// Number of dirt blocks under the grass block of each column.
pub const DIRT_DEPTH: i32 = 3;

/// Maximum pick distance of the crosshair raycaster, in blocks.
pub const DEFAULT_REACH: f32 = 8.0;
