//! Arena state
//!
//! Everything one simulation run owns: the world registry, the engine
//! tunables, the dispatch table and the consumption policy.

use super::consumption::{ConsumptionRule, ProportionalConsumption};
use super::dispatch::CollisionDispatcher;
use super::world::World;
use crate::config::EngineConfig;

/// A running arena
pub struct Arena {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub config: EngineConfig,
    pub dispatcher: CollisionDispatcher,
    pub rule: Box<dyn ConsumptionRule>,
}

impl Arena {
    /// Empty arena with the default dispatch table and consumption rule
    pub fn new(seed: u64, config: EngineConfig) -> Self {
        Self {
            seed,
            time_ticks: 0,
            world: World::new(config.speed),
            config,
            dispatcher: CollisionDispatcher::standard(),
            rule: Box::new(ProportionalConsumption::default()),
        }
    }

    /// Swap the consumption policy
    pub fn with_rule(mut self, rule: impl ConsumptionRule + 'static) -> Self {
        self.rule = Box::new(rule);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: CollisionDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// The largest live bot, if any remain
    pub fn leader(&self) -> Option<&super::entity::GameObject> {
        self.world
            .bots()
            .max_by(|a, b| a.size.total_cmp(&b.size))
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("seed", &self.seed)
            .field("time_ticks", &self.time_ticks)
            .field("world", &self.world)
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
