//! World registry
//!
//! The authoritative store of live entities. Presence of an id means the
//! entity is alive; removal is terminal.

use slotmap::SlotMap;
use thiserror::Error;

use super::entity::{Category, EntityId, GameObject};
use crate::config::SpeedCurve;

/// What collision resolvers need from the world.
///
/// Resolvers must re-query through this trait on every step instead of
/// holding on to entity snapshots: an earlier collision in the same tick may
/// have removed either side of the current pair.
pub trait WorldRegistry {
    /// True iff `id` denotes a live entity
    fn exists(&self, id: EntityId) -> bool;

    fn get(&self, id: EntityId) -> Option<&GameObject>;

    fn get_mut(&mut self, id: EntityId) -> Option<&mut GameObject>;

    /// Remove `id` for good, returning the final record if it was alive
    fn remove(&mut self, id: EntityId) -> Option<GameObject>;

    /// Re-derive a bot's speed from its current size. No-op for absent or
    /// inert entities.
    fn recompute_speed(&mut self, id: EntityId);
}

/// Rejected insertion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("entity size {size} is negative or NaN")]
    InvalidSize { size: f32 },
}

/// Slot-map backed registry with stable iteration order
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: SlotMap<EntityId, GameObject>,
    /// Ids in insertion order (for deterministic iteration). Removed ids
    /// stay behind until the next compaction.
    order: Vec<EntityId>,
    /// Removed ids still in `order`
    tombstones: usize,
    speed: SpeedCurve,
}

impl World {
    pub fn new(speed: SpeedCurve) -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
            tombstones: 0,
            speed,
        }
    }

    /// Register a new entity and return its id. Bots get their initial speed.
    pub fn insert(&mut self, mut object: GameObject) -> Result<EntityId, WorldError> {
        if object.size.is_nan() || object.size < 0.0 {
            return Err(WorldError::InvalidSize { size: object.size });
        }
        let speed = self.speed.speed_for(object.size);
        if let Some(bot) = object.as_bot_mut() {
            bot.speed = speed;
        }
        let id = self.entities.insert_with_key(|id| {
            object.id = id;
            object
        });
        self.order.push(id);
        Ok(id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|id| self.entities.contains_key(*id))
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.order.iter().filter_map(|id| self.entities.get(*id))
    }

    /// Live bots in insertion order
    pub fn bots(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.iter().filter(|object| object.is_bot())
    }

    pub fn count(&self, category: Category) -> usize {
        self.entities
            .values()
            .filter(|object| object.category == category)
            .count()
    }

    /// Sum of all live sizes
    pub fn total_size(&self) -> f32 {
        self.entities.values().map(|object| object.size).sum()
    }

    pub fn speed_curve(&self) -> SpeedCurve {
        self.speed
    }
}

impl WorldRegistry for World {
    fn exists(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    fn get(&self, id: EntityId) -> Option<&GameObject> {
        self.entities.get(id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut GameObject> {
        self.entities.get_mut(id)
    }

    fn remove(&mut self, id: EntityId) -> Option<GameObject> {
        let removed = self.entities.remove(id)?;
        self.tombstones += 1;
        if self.tombstones > self.entities.len() {
            self.order.retain(|live| self.entities.contains_key(*live));
            self.tombstones = 0;
        }
        log::debug!("Removed {:?} {:?} (size {})", removed.category, id, removed.size);
        Some(removed)
    }

    fn recompute_speed(&mut self, id: EntityId) {
        let curve = self.speed;
        if let Some(object) = self.entities.get_mut(id) {
            let size = object.size;
            if let Some(bot) = object.as_bot_mut() {
                bot.speed = curve.speed_for(size);
            }
        }
    }
}
