pub mod block;
pub mod config;
pub mod constants;
pub mod direction;
pub mod error;
pub mod math;
pub mod types;

pub use block::BlockType;
pub use config::WorldConfig;
pub use error::ConfigError;
pub use types::VoxelCoord;
