//! Collision dispatch
//!
//! A fixed, priority-ordered table of (predicate, resolver) entries. The
//! table is checked once at construction: no pair of categories may be
//! claimed by two entries.

use thiserror::Error;

use super::collision::{
    CollisionContext, CollisionError, resolve_bot_collision, resolve_food_collision,
    resolve_obstacle_collision,
};
use super::entity::{Category, EntityId};
use super::world::WorldRegistry;

/// The closed set of collision resolvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    /// Bot vs bot consumption
    Bot,
    /// Bot picks up food
    Food,
    /// Bot bounces off an obstacle
    Obstacle,
}

impl ResolverKind {
    pub const ALL: [ResolverKind; 3] = [
        ResolverKind::Bot,
        ResolverKind::Food,
        ResolverKind::Obstacle,
    ];

    /// The category pair each resolver is written for
    pub fn default_predicate(self) -> Predicate {
        match self {
            ResolverKind::Bot => bot_hits_bot,
            ResolverKind::Food => bot_hits_food,
            ResolverKind::Obstacle => bot_hits_obstacle,
        }
    }

    fn resolve<W: WorldRegistry + ?Sized>(
        self,
        world: &mut W,
        target: EntityId,
        mover: EntityId,
        ctx: &mut CollisionContext<'_>,
    ) -> Result<bool, CollisionError> {
        match self {
            ResolverKind::Bot => resolve_bot_collision(world, target, mover, ctx),
            ResolverKind::Food => resolve_food_collision(world, target, mover, ctx),
            ResolverKind::Obstacle => resolve_obstacle_collision(world, target, mover, ctx),
        }
    }
}

/// Applicability test over (target category, mover category)
pub type Predicate = fn(Category, Category) -> bool;

fn bot_hits_bot(target: Category, mover: Category) -> bool {
    target == Category::Player && mover == Category::Player
}

fn bot_hits_food(target: Category, mover: Category) -> bool {
    target == Category::Food && mover == Category::Player
}

fn bot_hits_obstacle(target: Category, mover: Category) -> bool {
    target == Category::Obstacle && mover == Category::Player
}

/// One row of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct ResolverEntry {
    pub kind: ResolverKind,
    pub applies: Predicate,
}

impl ResolverEntry {
    pub fn new(kind: ResolverKind) -> Self {
        Self {
            kind,
            applies: kind.default_predicate(),
        }
    }

    pub fn with_predicate(kind: ResolverKind, applies: Predicate) -> Self {
        Self { kind, applies }
    }
}

/// Dispatch table misconfiguration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("{first:?} and {second:?} both claim target {target:?} hit by mover {mover:?}")]
    OverlappingResolvers {
        target: Category,
        mover: Category,
        first: ResolverKind,
        second: ResolverKind,
    },
}

/// What happened to one collision pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A resolver ran
    Resolved {
        resolver: ResolverKind,
        mover_alive: bool,
    },
    /// No resolver applies; nothing changed
    Ignored,
    /// One side was removed earlier this tick; nothing changed
    Stale { mover_alive: bool },
}

impl Outcome {
    pub fn mover_alive(&self) -> bool {
        match *self {
            Outcome::Resolved { mover_alive, .. } | Outcome::Stale { mover_alive } => mover_alive,
            Outcome::Ignored => true,
        }
    }
}

/// Routes each collision pair to exactly one resolver
#[derive(Debug, Clone)]
pub struct CollisionDispatcher {
    entries: Vec<ResolverEntry>,
}

impl Default for CollisionDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl CollisionDispatcher {
    /// Build a table, rejecting any overlap between predicates
    pub fn new(entries: Vec<ResolverEntry>) -> Result<Self, DispatchError> {
        check_exclusive(&entries)?;
        Ok(Self { entries })
    }

    /// Bot, food and obstacle resolvers with their default predicates
    pub fn standard() -> Self {
        let entries: Vec<_> = ResolverKind::ALL.into_iter().map(ResolverEntry::new).collect();
        debug_assert!(check_exclusive(&entries).is_ok());
        Self { entries }
    }

    /// The resolver for a category pair, if any
    pub fn select(&self, target: Category, mover: Category) -> Option<ResolverKind> {
        self.entries
            .iter()
            .find(|entry| (entry.applies)(target, mover))
            .map(|entry| entry.kind)
    }

    /// Resolve one collision between a stationary `target` and the `mover`
    /// that ran into it
    pub fn dispatch<W: WorldRegistry + ?Sized>(
        &self,
        world: &mut W,
        target: EntityId,
        mover: EntityId,
        ctx: &mut CollisionContext<'_>,
    ) -> Result<Outcome, CollisionError> {
        let Some(mover_category) = world.get(mover).map(|object| object.category) else {
            return Ok(Outcome::Stale { mover_alive: false });
        };
        let Some(target_object) = world.get(target) else {
            return Ok(Outcome::Stale { mover_alive: true });
        };
        if target == mover {
            log::warn!("Ignoring self-collision of {mover:?}");
            return Ok(Outcome::Ignored);
        }

        let Some(resolver) = self.select(target_object.category, mover_category) else {
            log::debug!(
                "No resolver for {:?} hit by {:?}",
                target_object.category,
                mover_category
            );
            return Ok(Outcome::Ignored);
        };
        let mover_alive = resolver.resolve(world, target, mover, ctx)?;
        Ok(Outcome::Resolved {
            resolver,
            mover_alive,
        })
    }
}

fn check_exclusive(entries: &[ResolverEntry]) -> Result<(), DispatchError> {
    for target in Category::ALL {
        for mover in Category::ALL {
            let mut matching = entries.iter().filter(|entry| (entry.applies)(target, mover));
            if let (Some(first), Some(second)) = (matching.next(), matching.next()) {
                return Err(DispatchError::OverlappingResolvers {
                    target,
                    mover,
                    first: first.kind,
                    second: second.kind,
                });
            }
        }
    }
    Ok(())
}
