//! Engine configuration
//!
//! Loaded from JSON; every field falls back to the defaults in [`crate::consts`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Category;

/// Errors raised while loading or validating an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("minimum player size must be a finite non-negative number, got {0}")]
    InvalidMinimumSize(f32),
    #[error("no score rate configured for {0:?}")]
    MissingScoreRate(Category),
    #[error("speed curve is invalid: ratio {ratio}, minimum {min}")]
    InvalidSpeedCurve { ratio: f32, min: f32 },
    #[error("bounce spacing must be finite and non-negative, got {0}")]
    InvalidBounce(f32),
}

/// How a bot's speed derives from its size (larger bots move slower)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    /// Speed = ratio / size, rounded up
    pub ratio: f32,
    /// Lower bound for any bot with a positive size
    pub min: f32,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            ratio: SPEED_RATIO,
            min: MIN_SPEED,
        }
    }
}

impl SpeedCurve {
    /// Speed for a bot of the given size. A bot with no size does not move.
    pub fn speed_for(&self, size: f32) -> f32 {
        if size <= 0.0 {
            return 0.0;
        }
        (self.ratio / size).ceil().max(self.min)
    }
}

/// Tunables consumed by the collision core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Score a consumer earns, keyed by the category it consumed
    pub score_rates: BTreeMap<Category, u64>,
    /// Entities ending a collision strictly below this size are destroyed
    pub minimum_player_size: f32,
    /// Size to speed mapping applied by the world registry
    pub speed: SpeedCurve,
    /// Spacing a bot is pushed back after hitting an obstacle
    pub obstacle_bounce: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let score_rates = BTreeMap::from([
            (Category::Player, PLAYER_SCORE_RATE),
            (Category::Food, FOOD_SCORE_RATE),
            (Category::Obstacle, OBSTACLE_SCORE_RATE),
        ]);
        Self {
            score_rates,
            minimum_player_size: MINIMUM_PLAYER_SIZE,
            speed: SpeedCurve::default(),
            obstacle_bounce: OBSTACLE_BOUNCE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Check the invariants the collision core relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.minimum_player_size.is_finite() || self.minimum_player_size < 0.0 {
            return Err(ConfigError::InvalidMinimumSize(self.minimum_player_size));
        }
        if let Some(missing) = Category::ALL
            .iter()
            .find(|c| !self.score_rates.contains_key(*c))
        {
            return Err(ConfigError::MissingScoreRate(*missing));
        }
        let SpeedCurve { ratio, min } = self.speed;
        if !ratio.is_finite() || !min.is_finite() || ratio < 0.0 || min < 0.0 {
            return Err(ConfigError::InvalidSpeedCurve { ratio, min });
        }
        if !self.obstacle_bounce.is_finite() || self.obstacle_bounce < 0.0 {
            return Err(ConfigError::InvalidBounce(self.obstacle_bounce));
        }
        Ok(())
    }

    /// Score awarded for consuming something of `category`
    pub fn score_rate(&self, category: Category) -> u64 {
        // validate() guarantees every category is present
        self.score_rates.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_json_round_trip_of_default() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = EngineConfig::from_json(r#"{ "minimum_player_size": 2.0 }"#).unwrap();
        assert_eq!(config.minimum_player_size, 2.0);
        assert_eq!(config.score_rate(Category::Player), PLAYER_SCORE_RATE);
        assert_eq!(config.speed, SpeedCurve::default());
    }

    #[test]
    fn test_missing_score_rate_rejected() {
        let json = r#"{ "score_rates": { "Player": 3, "Food": 1 } }"#;
        let err = EngineConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::MissingScoreRate(Category::Obstacle)));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = EngineConfig::from_json(r#"{ "minimum_player_size": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMinimumSize(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_speed_curve_slows_large_bots() {
        let curve = SpeedCurve::default();
        assert_eq!(curve.speed_for(0.0), 0.0);
        assert_eq!(curve.speed_for(10.0), 20.0);
        assert_eq!(curve.speed_for(30.0), 7.0);
        assert!(curve.speed_for(100.0) < curve.speed_for(10.0));
        assert_eq!(curve.speed_for(1_000_000.0), MIN_SPEED);
    }
}
