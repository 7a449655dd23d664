//! Per-tick collision resolution
//!
//! Pairs are resolved strictly in the order detection produced them, one at
//! a time. A pair may reference an entity that an earlier pair in the same
//! tick already removed; the resolvers handle that as a stale reference.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionContext, CollisionError};
use super::dispatch::{CollisionDispatcher, Outcome};
use super::entity::EntityId;
use super::observer::DeathObserver;
use super::state::Arena;
use super::world::WorldRegistry;

/// One collision reported by the detection phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPair {
    /// The entity that was hit
    pub target: EntityId,
    /// The entity whose movement caused the hit
    pub mover: EntityId,
}

impl CollisionPair {
    pub fn new(target: EntityId, mover: EntityId) -> Self {
        Self { target, mover }
    }
}

/// Summary of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pairs handed to a resolver
    pub resolved: usize,
    /// Pairs no resolver applies to
    pub ignored: usize,
    /// Pairs skipped because one side was already gone
    pub stale: usize,
    /// Movers that did not survive their collision
    pub mover_deaths: usize,
    /// Ids removed this tick, in removal order
    pub removed: Vec<EntityId>,
}

/// Resolve every pair of a tick in order.
///
/// The first contract violation aborts the rest of the tick; mutations from
/// earlier pairs are kept.
pub fn resolve_tick<W: WorldRegistry + ?Sized>(
    world: &mut W,
    dispatcher: &CollisionDispatcher,
    pairs: &[CollisionPair],
    ctx: &mut CollisionContext<'_>,
) -> Result<TickReport, CollisionError> {
    let mut report = TickReport::default();
    for pair in pairs {
        let watched = [pair.target, pair.mover];
        let alive_before = watched.map(|id| world.exists(id));

        let outcome = dispatcher.dispatch(world, pair.target, pair.mover, ctx)?;
        match outcome {
            Outcome::Resolved { mover_alive, .. } => {
                report.resolved += 1;
                if !mover_alive {
                    report.mover_deaths += 1;
                }
            }
            Outcome::Ignored => report.ignored += 1,
            Outcome::Stale { .. } => report.stale += 1,
        }

        for (id, was_alive) in watched.into_iter().zip(alive_before) {
            if was_alive && !world.exists(id) && !report.removed.contains(&id) {
                report.removed.push(id);
            }
        }
    }
    Ok(report)
}

/// Advance the arena by one tick
pub fn tick(
    arena: &mut Arena,
    pairs: &[CollisionPair],
    observer: &mut dyn DeathObserver,
) -> Result<TickReport, CollisionError> {
    arena.time_ticks += 1;
    let mut ctx = CollisionContext {
        config: &arena.config,
        rule: arena.rule.as_ref(),
        observer,
    };
    let report = resolve_tick(&mut arena.world, &arena.dispatcher, pairs, &mut ctx)?;
    if !report.removed.is_empty() {
        log::debug!(
            "Tick {}: {} resolved, {} removed, {} live",
            arena.time_ticks,
            report.resolved,
            report.removed.len(),
            arena.world.len()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::geometry::Heading;
    use crate::sim::consumption::FixedConsumption;
    use crate::sim::entity::GameObject;
    use crate::sim::observer::DeathLog;
    use glam::Vec2;

    fn arena() -> Arena {
        let config = EngineConfig {
            minimum_player_size: 2.0,
            ..EngineConfig::default()
        };
        Arena::new(7, config).with_rule(FixedConsumption(2.0))
    }

    fn bot(size: f32) -> GameObject {
        GameObject::bot(Vec2::ZERO, size, Heading::new(0.0)).moving(Heading::new(0.0))
    }

    #[test]
    fn test_same_victim_in_two_pairs() {
        let mut arena = arena();
        let hunter = arena.world.insert(bot(10.0)).unwrap();
        let rival = arena.world.insert(bot(20.0)).unwrap();
        let prey = arena.world.insert(bot(3.0)).unwrap();
        let pairs = [CollisionPair::new(prey, hunter), CollisionPair::new(prey, rival)];
        let mut deaths = DeathLog::default();

        let report = tick(&mut arena, &pairs, &mut deaths).unwrap();

        assert_eq!(report.resolved, 1);
        assert_eq!(report.stale, 1);
        assert_eq!(report.removed, vec![prey]);
        assert_eq!(arena.world.get(hunter).unwrap().size, 13.0);
        assert_eq!(arena.world.get(rival).unwrap().size, 20.0);
        assert_eq!(arena.time_ticks, 1);
    }

    #[test]
    fn test_dead_mover_skips_later_pairs() {
        let mut arena = arena();
        let big = arena.world.insert(bot(10.0)).unwrap();
        let small = arena.world.insert(bot(3.0)).unwrap();
        let food = arena.world.insert(GameObject::food(Vec2::ZERO, 1.0)).unwrap();
        let pairs = [CollisionPair::new(big, small), CollisionPair::new(food, small)];
        let mut deaths = DeathLog::default();

        let report = tick(&mut arena, &pairs, &mut deaths).unwrap();

        assert_eq!(report.mover_deaths, 1);
        assert_eq!(report.stale, 1);
        assert_eq!(deaths.events.len(), 1);
        assert!(arena.world.exists(food));
        assert_eq!(arena.world.len(), 2);
    }

    #[test]
    fn test_inert_mover_pair_is_ignored() {
        let mut arena = arena();
        let bot_id = arena.world.insert(bot(10.0)).unwrap();
        let food = arena.world.insert(GameObject::food(Vec2::ZERO, 1.0)).unwrap();
        let rock = arena.world.insert(GameObject::obstacle(Vec2::ZERO, 5.0)).unwrap();
        let pairs = [
            CollisionPair::new(bot_id, food),
            CollisionPair::new(rock, food),
            CollisionPair::new(food, bot_id),
        ];
        let mut deaths = DeathLog::default();

        let report = tick(&mut arena, &pairs, &mut deaths).unwrap();

        assert_eq!(report.ignored, 2);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.removed, vec![food]);
        assert_eq!(arena.world.get(bot_id).unwrap().size, 11.0);
        assert_eq!(arena.world.get(rock).unwrap().size, 5.0);
    }

    #[test]
    fn test_contract_violation_aborts_tick() {
        let config = EngineConfig {
            minimum_player_size: 2.0,
            ..EngineConfig::default()
        };
        // asks for more than the consumee has
        let mut arena = Arena::new(7, config)
            .with_rule(|_: &GameObject, consumee: &GameObject| consumee.size + 1.0);
        let big = arena.world.insert(bot(10.0)).unwrap();
        let small = arena.world.insert(bot(4.0)).unwrap();
        let other = arena.world.insert(GameObject::food(Vec2::ZERO, 1.0)).unwrap();
        let pairs = [CollisionPair::new(small, big), CollisionPair::new(other, big)];
        let mut deaths = DeathLog::default();

        let err = tick(&mut arena, &pairs, &mut deaths).unwrap_err();

        assert_eq!(
            err,
            CollisionError::ConsumptionOutOfRange {
                consumed: 5.0,
                available: 4.0
            }
        );
        assert!(arena.world.exists(small));
        assert!(arena.world.exists(other));
        assert_eq!(arena.world.get(big).unwrap().size, 10.0);
    }

    #[test]
    fn test_mixed_tick_counts() {
        let mut arena = arena();
        let a = arena.world.insert(bot(8.0)).unwrap();
        let b = arena.world.insert(bot(8.0)).unwrap();
        let food = arena.world.insert(GameObject::food(Vec2::ZERO, 2.0)).unwrap();
        let rock = arena.world.insert(GameObject::obstacle(Vec2::ZERO, 50.0)).unwrap();
        let pairs = [
            CollisionPair::new(a, b),
            CollisionPair::new(food, a),
            CollisionPair::new(rock, b),
        ];
        let mut deaths = DeathLog::default();

        let report = tick(&mut arena, &pairs, &mut deaths).unwrap();

        assert_eq!(report.resolved, 3);
        assert_eq!(report.removed, vec![food]);
        assert_eq!(arena.world.get(a).unwrap().size, 10.0);
        assert_eq!(arena.leader().unwrap().id, a);
    }
}
