//! Collision resolution
//!
//! One resolver per applicable pair of categories. A resolver receives the
//! ids of the stationary target and of the mover that initiated the
//! collision, re-reads both from the world, mutates them, and reports whether
//! the mover is still alive.

use thiserror::Error;

use super::consumption::ConsumptionRule;
use super::entity::{Body, EntityId};
use super::observer::{DeathEvent, DeathObserver};
use super::world::WorldRegistry;
use crate::config::EngineConfig;
use crate::consts::EQUAL_SIZE_BOUNCE;
use crate::geometry::{project_point, reverse_heading};

/// Contract violations. These point at a dispatcher or rule bug and abort
/// the tick; stale ids are not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    #[error("{id:?} is not a bot but was routed to a bot resolver")]
    NotABot { id: EntityId },
    #[error("consumption rule returned {consumed}, outside [0, {available}]")]
    ConsumptionOutOfRange { consumed: f32, available: f32 },
}

/// Everything a resolver needs besides the world itself
pub struct CollisionContext<'a> {
    pub config: &'a EngineConfig,
    pub rule: &'a dyn ConsumptionRule,
    pub observer: &'a mut dyn DeathObserver,
}

/// Result of the already-dead checks every resolver starts with
enum Liveness {
    MoverGone,
    TargetGone,
    BothAlive,
}

fn check_liveness<W: WorldRegistry + ?Sized>(
    world: &W,
    target: EntityId,
    mover: EntityId,
) -> Result<Liveness, CollisionError> {
    // An earlier collision this tick may already have removed either side
    let Some(mover_object) = world.get(mover) else {
        return Ok(Liveness::MoverGone);
    };
    if !mover_object.is_bot() {
        return Err(CollisionError::NotABot { id: mover });
    }
    if !world.exists(target) {
        return Ok(Liveness::TargetGone);
    }
    Ok(Liveness::BothAlive)
}

/// Push moving bots back the way they came.
///
/// Each listed bot with a current action turns 180° and is moved `spacing`
/// units along its new heading. Idle bots, inert entities and absent ids are
/// left alone. Size and score never change.
pub fn bounce<W: WorldRegistry + ?Sized>(world: &mut W, ids: &[EntityId], spacing: f32) {
    for &id in ids {
        let Some(object) = world.get_mut(id) else {
            continue;
        };
        let Body::Bot(bot) = &mut object.body else {
            continue;
        };
        let Some(action) = bot.action.as_mut() else {
            continue;
        };
        bot.heading = reverse_heading(bot.heading);
        action.heading = bot.heading;
        object.position = project_point(object.position, spacing, bot.heading);
    }
}

/// Bounce spacing after `consumed` size changed hands
#[inline]
pub fn consumption_spacing(consumed: f32) -> f32 {
    ((consumed + 1.0) / 2.0).ceil()
}

/// Bot hits bot: the larger one eats part of the smaller one.
///
/// Consumer and consumee are decided by size alone, so a small mover running
/// into a large bot is the one that gets eaten. The return value is about the
/// mover, not the consumer.
pub fn resolve_bot_collision<W: WorldRegistry + ?Sized>(
    world: &mut W,
    target: EntityId,
    mover: EntityId,
    ctx: &mut CollisionContext<'_>,
) -> Result<bool, CollisionError> {
    match check_liveness(world, target, mover)? {
        Liveness::MoverGone => return Ok(false),
        Liveness::TargetGone => return Ok(true),
        Liveness::BothAlive => {}
    }

    let (target_size, mover_size) = match (world.get(target), world.get(mover)) {
        (Some(t), Some(m)) if t.is_bot() => (t.size, m.size),
        _ => return Err(CollisionError::NotABot { id: target }),
    };

    if target_size == mover_size {
        bounce(world, &[target, mover], EQUAL_SIZE_BOUNCE);
        return Ok(true);
    }

    let (consumer, consumee) = if mover_size > target_size {
        (mover, target)
    } else {
        (target, mover)
    };

    let (consumed, available, consumee_category) =
        match (world.get(consumer), world.get(consumee)) {
            (Some(c), Some(e)) => (ctx.rule.consumed_size(c, e), e.size, e.category),
            // Both were checked above and nothing has been removed since
            _ => return Ok(world.exists(mover)),
        };
    if !(0.0..=available).contains(&consumed) {
        return Err(CollisionError::ConsumptionOutOfRange {
            consumed,
            available,
        });
    }

    if let Some(object) = world.get_mut(consumee) {
        object.size -= consumed;
    }
    let score_rate = ctx.config.score_rate(consumee_category);
    if let Some(object) = world.get_mut(consumer) {
        object.size += consumed;
        if let Some(bot) = object.as_bot_mut() {
            bot.score += score_rate;
        }
    }
    world.recompute_speed(consumer);

    bounce(world, &[consumee, consumer], consumption_spacing(consumed));

    let threshold = ctx.config.minimum_player_size;
    let remaining = world.get(consumee).map_or(0.0, |object| object.size);
    if remaining < threshold {
        if let Some(object) = world.get_mut(consumer) {
            object.size += remaining;
        }
        if let Some(object) = world.get_mut(consumee) {
            object.size = 0.0;
        }
        world.remove(consumee);
        log::debug!("{consumer:?} fully absorbed {consumee:?}");
    } else {
        world.recompute_speed(consumee);
    }

    match world.get(mover) {
        Some(object) if object.size > threshold => Ok(true),
        alive => {
            let final_size = alive.map_or(0.0, |object| object.size);
            // A mover left exactly at the threshold is still registered
            if world.exists(mover) {
                world.remove(mover);
            }
            let opponent = if mover == consumer { consumee } else { consumer };
            ctx.observer.on_death(&DeathEvent {
                id: mover,
                opponent,
                final_size,
            });
            Ok(false)
        }
    }
}

/// Bot hits food: the bot absorbs the whole pickup
pub fn resolve_food_collision<W: WorldRegistry + ?Sized>(
    world: &mut W,
    target: EntityId,
    mover: EntityId,
    ctx: &mut CollisionContext<'_>,
) -> Result<bool, CollisionError> {
    match check_liveness(world, target, mover)? {
        Liveness::MoverGone => return Ok(false),
        Liveness::TargetGone => return Ok(true),
        Liveness::BothAlive => {}
    }

    let Some(food) = world.remove(target) else {
        return Ok(true);
    };
    let score_rate = ctx.config.score_rate(food.category);
    if let Some(object) = world.get_mut(mover) {
        object.size += food.size;
        if let Some(bot) = object.as_bot_mut() {
            bot.score += score_rate;
        }
    }
    world.recompute_speed(mover);
    Ok(true)
}

/// Bot hits an obstacle: the bot is pushed back, the obstacle stays put
pub fn resolve_obstacle_collision<W: WorldRegistry + ?Sized>(
    world: &mut W,
    target: EntityId,
    mover: EntityId,
    ctx: &mut CollisionContext<'_>,
) -> Result<bool, CollisionError> {
    match check_liveness(world, target, mover)? {
        Liveness::MoverGone => return Ok(false),
        Liveness::TargetGone => return Ok(true),
        Liveness::BothAlive => {}
    }

    bounce(world, &[mover], ctx.config.obstacle_bounce);
    Ok(true)
}
