//! Consumption rules
//!
//! A rule decides how much size a larger bot takes from a smaller one in a
//! single collision. Every rule must return an amount in
//! `[0, consumee.size]`; the resolver rejects anything else rather than
//! clamping it.

use super::entity::GameObject;
use crate::consts::CONSUMPTION_RATIO;

/// Policy for the size transferred from consumee to consumer
pub trait ConsumptionRule {
    fn consumed_size(&self, consumer: &GameObject, consumee: &GameObject) -> f32;
}

impl<F> ConsumptionRule for F
where
    F: Fn(&GameObject, &GameObject) -> f32,
{
    fn consumed_size(&self, consumer: &GameObject, consumee: &GameObject) -> f32 {
        self(consumer, consumee)
    }
}

/// Takes a share of the size difference, never more than the consumee has
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalConsumption {
    pub ratio: f32,
}

impl Default for ProportionalConsumption {
    fn default() -> Self {
        Self {
            ratio: CONSUMPTION_RATIO,
        }
    }
}

impl ConsumptionRule for ProportionalConsumption {
    fn consumed_size(&self, consumer: &GameObject, consumee: &GameObject) -> f32 {
        let difference = (consumer.size - consumee.size).max(0.0);
        (difference * self.ratio).clamp(0.0, consumee.size.max(0.0))
    }
}

/// Takes a fixed bite, capped at the consumee's size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedConsumption(pub f32);

impl ConsumptionRule for FixedConsumption {
    fn consumed_size(&self, _consumer: &GameObject, consumee: &GameObject) -> f32 {
        self.0.clamp(0.0, consumee.size.max(0.0))
    }
}
