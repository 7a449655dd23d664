//! Death observation
//!
//! Resolvers report a mover's death to an injected sink rather than a global
//! logger, so tests can count deaths without capturing log output.

use super::entity::EntityId;

/// Log target used for death events
pub const DEATH_TARGET: &str = "BotDeath";
/// Message attached to every death event
pub const DEATH_MESSAGE: &str = "Bot Consumed";

/// A mover did not survive its collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEvent {
    pub id: EntityId,
    /// The other side of the fatal collision
    pub opponent: EntityId,
    /// Size the mover held when it was removed (zero once fully absorbed)
    pub final_size: f32,
}

impl DeathEvent {
    pub fn category(&self) -> &'static str {
        DEATH_TARGET
    }

    pub fn message(&self) -> &'static str {
        DEATH_MESSAGE
    }
}

/// Receives death events. Must not influence resolution.
pub trait DeathObserver {
    fn on_death(&mut self, event: &DeathEvent);
}

impl<F> DeathObserver for F
where
    F: FnMut(&DeathEvent),
{
    fn on_death(&mut self, event: &DeathEvent) {
        self(event)
    }
}

/// Default sink: one `info` record per death under the `BotDeath` target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDeathObserver;

impl DeathObserver for LogDeathObserver {
    fn on_death(&mut self, event: &DeathEvent) {
        log::info!(
            target: DEATH_TARGET,
            "{} ({:?} after colliding with {:?})",
            DEATH_MESSAGE,
            event.id,
            event.opponent
        );
    }
}

/// Collects every event; handy for tick reports and tests
#[derive(Debug, Clone, Default)]
pub struct DeathLog {
    pub events: Vec<DeathEvent>,
}

impl DeathObserver for DeathLog {
    fn on_death(&mut self, event: &DeathEvent) {
        self.events.push(*event);
    }
}
