//! Heading and point helpers
//!
//! Headings are compass-free angles in degrees measured counter-clockwise from
//! the +x axis, always kept in `[0, 360)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction of travel in degrees, normalized to `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Heading(f32);

impl Heading {
    pub fn new(degrees: f32) -> Self {
        Self(normalize_degrees(degrees))
    }

    #[inline]
    pub fn degrees(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Unit vector pointing along this heading
    #[inline]
    pub fn direction(self) -> Vec2 {
        Vec2::from_angle(self.radians())
    }
}

impl From<f32> for Heading {
    fn from(degrees: f32) -> Self {
        Self::new(degrees)
    }
}

impl From<Heading> for f32 {
    fn from(heading: Heading) -> Self {
        heading.0
    }
}

/// Normalize an angle to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// The opposite direction (a 180° turn)
#[inline]
pub fn reverse_heading(heading: Heading) -> Heading {
    Heading::new(heading.0 + 180.0)
}

/// The point reached by moving `distance` units from `point` along `heading`
#[inline]
pub fn project_point(point: Vec2, distance: f32, heading: Heading) -> Vec2 {
    point + heading.direction() * distance
}
