//! Bot Arena - collision resolution core for a shared arena of bots
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, world registry, collisions)
//! - `geometry`: Heading and point helpers used by the bounce impulse
//! - `config`: Data-driven engine tuning (score rates, thresholds, speed curve)

pub mod config;
pub mod geometry;
pub mod sim;

pub use config::{ConfigError, EngineConfig};
pub use geometry::{Heading, project_point, reverse_heading};

/// Engine configuration defaults
pub mod consts {
    /// Bots strictly below this size are destroyed
    pub const MINIMUM_PLAYER_SIZE: f32 = 5.0;

    /// Score awarded for consuming (part of) another bot
    pub const PLAYER_SCORE_RATE: u64 = 10;
    /// Score awarded for a food pickup
    pub const FOOD_SCORE_RATE: u64 = 1;
    /// Obstacles are never consumed, so they award nothing
    pub const OBSTACLE_SCORE_RATE: u64 = 0;

    /// Speed = ratio / size, rounded up
    pub const SPEED_RATIO: f32 = 200.0;
    /// Speed floor so huge bots still crawl
    pub const MIN_SPEED: f32 = 1.0;

    /// Spacing for bounces that carry no consumption (equal sizes)
    pub const EQUAL_SIZE_BOUNCE: f32 = 1.0;
    /// Spacing a bot is pushed back when it hits an obstacle
    pub const OBSTACLE_BOUNCE: f32 = 1.0;

    /// Default share of the size difference taken per bite
    pub const CONSUMPTION_RATIO: f32 = 0.5;
}
