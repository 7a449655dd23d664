//! Deterministic simulation module
//!
//! All collision logic lives here. This module must stay pure and
//! deterministic:
//! - Collision pairs resolved one at a time, in the order given
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering, transport or platform dependencies

pub mod collision;
pub mod consumption;
pub mod dispatch;
pub mod entity;
pub mod observer;
pub mod populate;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionContext, CollisionError, bounce, consumption_spacing};
pub use consumption::{ConsumptionRule, FixedConsumption, ProportionalConsumption};
pub use dispatch::{CollisionDispatcher, DispatchError, Outcome, ResolverEntry, ResolverKind};
pub use entity::{Body, BotState, Category, EntityId, GameObject, MovementAction};
pub use observer::{DeathEvent, DeathLog, DeathObserver, LogDeathObserver};
pub use populate::{PopulationConfig, populate};
pub use state::Arena;
pub use tick::{CollisionPair, TickReport, resolve_tick, tick};
pub use world::{World, WorldError, WorldRegistry};
