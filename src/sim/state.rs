//! Shadow state and core simulation types
//!
//! Everything a running simulation mutates lives here. Dropping the state is
//! how a simulation is torn down.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::bounds::Bounds;
use super::random::RandomSource;
use crate::{heading, velocity_from_angle};

/// The bouncing shadow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowState {
    /// Current container bounds
    pub bounds: Bounds,
    /// Configured edge length before the bounds cap is applied
    pub preferred_size: f32,
    /// Effective edge length, `min(preferred, 0.6 * w, 0.6 * h)`
    pub entity_size: f32,
    /// Fixed velocity magnitude (pixels per second)
    pub speed: f32,
    /// Top-left corner within the container
    pub pos: Vec2,
    pub vel: Vec2,
}

impl ShadowState {
    /// Place a shadow at a random spot heading in a random direction.
    ///
    /// Draws three samples from `rng`: x, y, then the heading.
    pub fn spawn<R: RandomSource + ?Sized>(
        bounds: Bounds,
        preferred_size: f32,
        speed: f32,
        rng: &mut R,
    ) -> Self {
        let entity_size = bounds.entity_size(preferred_size);
        let max = bounds.max_offset(entity_size);
        let pos = Vec2::new(rng.unit() * max.x, rng.unit() * max.y);
        let angle = rng.unit() * TAU;

        Self {
            bounds,
            preferred_size,
            entity_size,
            speed,
            pos,
            vel: velocity_from_angle(angle, speed),
        }
    }

    /// Adopt new container bounds.
    ///
    /// Position is left alone; the next tick's wall check pulls it back inside.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.entity_size = bounds.entity_size(self.preferred_size);
    }

    /// Largest allowed top-left offset for the current bounds
    pub fn max_offset(&self) -> Vec2 {
        self.bounds.max_offset(self.entity_size)
    }

    /// Current heading (radians)
    pub fn angle(&self) -> f32 {
        heading(self.vel)
    }

    /// Whether the shadow currently sits fully inside its bounds
    pub fn is_contained(&self) -> bool {
        let max = self.max_offset();
        (0.0..=max.x).contains(&self.pos.x) && (0.0..=max.y).contains(&self.pos.y)
    }
}
