//! Entity model
//!
//! Every object in the arena is a [`GameObject`]. Bots carry a movable
//! [`BotState`] body; food and obstacles are inert.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::geometry::Heading;

new_key_type! {
    /// Stable handle for arena entities. Generational, so a removed id never
    /// comes back to denote a different entity.
    pub struct EntityId;
}

/// Entity category, used for resolver selection and score rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// AI or human-controlled bot
    Player,
    Food,
    Obstacle,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Player, Category::Food, Category::Obstacle];
}

/// An in-progress movement intent. Bots without one are idle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementAction {
    pub heading: Heading,
}

/// Movable state of a bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotState {
    pub heading: Heading,
    /// `None` while idle; idle bots are never repositioned by bounces
    pub action: Option<MovementAction>,
    pub score: u64,
    /// Derived from size by the world registry
    pub speed: f32,
}

impl BotState {
    pub fn new(heading: Heading) -> Self {
        Self {
            heading,
            action: None,
            score: 0,
            speed: 0.0,
        }
    }

    /// Start moving along `heading`
    pub fn steer(&mut self, heading: Heading) {
        self.heading = heading;
        self.action = Some(MovementAction { heading });
    }

    /// Stop moving; the heading is kept
    pub fn halt(&mut self) {
        self.action = None;
    }

    pub fn is_moving(&self) -> bool {
        self.action.is_some()
    }
}

/// Category-specific part of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Body {
    /// Pickups and static obstacles
    Inert,
    Bot(BotState),
}

/// An arena entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Assigned by the world on insertion
    pub id: EntityId,
    pub category: Category,
    pub position: Vec2,
    /// Never negative
    pub size: f32,
    pub body: Body,
}

impl GameObject {
    /// A bot at `position`, idle, facing `heading`
    pub fn bot(position: Vec2, size: f32, heading: Heading) -> Self {
        Self {
            id: EntityId::default(),
            category: Category::Player,
            position,
            size,
            body: Body::Bot(BotState::new(heading)),
        }
    }

    pub fn food(position: Vec2, size: f32) -> Self {
        Self::inert(Category::Food, position, size)
    }

    pub fn obstacle(position: Vec2, size: f32) -> Self {
        Self::inert(Category::Obstacle, position, size)
    }

    fn inert(category: Category, position: Vec2, size: f32) -> Self {
        Self {
            id: EntityId::default(),
            category,
            position,
            size,
            body: Body::Inert,
        }
    }

    /// Builder-style: put the bot in motion along `heading`
    pub fn moving(mut self, heading: Heading) -> Self {
        if let Some(bot) = self.as_bot_mut() {
            bot.steer(heading);
        }
        self
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.body, Body::Bot(_))
    }

    pub fn as_bot(&self) -> Option<&BotState> {
        match &self.body {
            Body::Bot(bot) => Some(bot),
            Body::Inert => None,
        }
    }

    pub fn as_bot_mut(&mut self) -> Option<&mut BotState> {
        match &mut self.body {
            Body::Bot(bot) => Some(bot),
            Body::Inert => None,
        }
    }

    /// Score of a bot; inert entities have none
    pub fn score(&self) -> u64 {
        self.as_bot().map_or(0, |bot| bot.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_starts_idle() {
        let bot = GameObject::bot(Vec2::ZERO, 10.0, Heading::new(45.0));
        assert!(bot.is_bot());
        assert_eq!(bot.category, Category::Player);
        assert!(!bot.as_bot().unwrap().is_moving());
        assert_eq!(bot.score(), 0);
    }

    #[test]
    fn test_moving_sets_action_and_heading() {
        let bot = GameObject::bot(Vec2::ZERO, 10.0, Heading::new(0.0)).moving(Heading::new(90.0));
        let state = bot.as_bot().unwrap();
        assert_eq!(state.heading.degrees(), 90.0);
        assert_eq!(state.action.unwrap().heading.degrees(), 90.0);
    }

    #[test]
    fn test_moving_is_ignored_for_inert() {
        let food = GameObject::food(Vec2::ONE, 2.0).moving(Heading::new(90.0));
        assert_eq!(food.body, Body::Inert);
        assert!(food.as_bot().is_none());
    }

    #[test]
    fn test_halt_keeps_heading() {
        let mut bot = GameObject::bot(Vec2::ZERO, 10.0, Heading::new(0.0)).moving(Heading::new(30.0));
        bot.as_bot_mut().unwrap().halt();
        let state = bot.as_bot().unwrap();
        assert!(!state.is_moving());
        assert_eq!(state.heading.degrees(), 30.0);
    }
}
