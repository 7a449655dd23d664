//! Seeded arena population
//!
//! Scatters bots, food and obstacles over a square arena. The same seed
//! always yields the same layout.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, GameObject};
use super::world::{World, WorldError};
use crate::geometry::Heading;

/// How many of what to spawn, and how big
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Half the side length of the spawn square, centred on the origin
    pub half_extent: f32,
    pub bots: usize,
    /// Inclusive-exclusive range of starting bot sizes
    pub bot_size: (f32, f32),
    pub food: usize,
    pub food_size: f32,
    pub obstacles: usize,
    pub obstacle_size: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            half_extent: 500.0,
            bots: 8,
            bot_size: (5.0, 40.0),
            food: 40,
            food_size: 3.0,
            obstacles: 4,
            obstacle_size: 30.0,
        }
    }
}

/// Spawn everything described by `population` into `world`.
///
/// Returns the ids in spawn order: bots first, then food, then obstacles.
/// Bots start moving in a random direction. A negative or NaN size in
/// `population` stops the spawn at the first offending entity.
pub fn populate(
    world: &mut World,
    population: &PopulationConfig,
    seed: u64,
) -> Result<Vec<EntityId>, WorldError> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut ids = Vec::with_capacity(population.bots + population.food + population.obstacles);
    let extent = population.half_extent.abs();
    let (min_size, max_size) = population.bot_size;

    let random_point = |rng: &mut Pcg32| {
        if extent == 0.0 {
            Vec2::ZERO
        } else {
            Vec2::new(
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
            )
        }
    };

    for _ in 0..population.bots {
        let position = random_point(&mut rng);
        let size = if max_size > min_size {
            rng.random_range(min_size..max_size).floor()
        } else {
            min_size
        };
        let heading = Heading::new(rng.random_range(0.0..360.0f32).floor());
        ids.push(world.insert(GameObject::bot(position, size, heading).moving(heading))?);
    }
    for _ in 0..population.food {
        let position = random_point(&mut rng);
        ids.push(world.insert(GameObject::food(position, population.food_size))?);
    }
    for _ in 0..population.obstacles {
        let position = random_point(&mut rng);
        ids.push(world.insert(GameObject::obstacle(position, population.obstacle_size))?);
    }

    log::info!(
        "Populated arena (seed {}): {} bots, {} food, {} obstacles",
        seed,
        population.bots,
        population.food,
        population.obstacles
    );
    Ok(ids)
}
