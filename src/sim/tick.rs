//! Per-frame simulation tick
//!
//! Integrates position by elapsed time and bounces off the container walls.
//! Frame-rate independent: all motion scales with `dt`.

use glam::Vec2;

use super::random::RandomSource;
use super::state::ShadowState;
use crate::consts::BOUNCE_JITTER;
use crate::{heading, velocity_from_angle};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Offset to render after this tick
    pub position: Vec2,
    pub bounced_x: bool,
    pub bounced_y: bool,
}

impl TickReport {
    pub fn bounced(&self) -> bool {
        self.bounced_x || self.bounced_y
    }
}

/// Advance the shadow by `dt` seconds
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut ShadowState,
    rng: &mut R,
    dt: f32,
) -> TickReport {
    state.pos += state.vel * dt;

    let max = state.max_offset();
    let mut report = TickReport::default();

    // Horizontal walls
    if state.pos.x <= 0.0 || state.pos.x >= max.x {
        state.vel.x = -state.vel.x;
        state.pos.x = state.pos.x.min(max.x).max(0.0);
        state.vel = perturb(state.vel, state.speed, rng);
        report.bounced_x = true;
    }

    // Vertical walls, checked against the already-updated velocity
    if state.pos.y <= 0.0 || state.pos.y >= max.y {
        state.vel.y = -state.vel.y;
        state.pos.y = state.pos.y.min(max.y).max(0.0);
        state.vel = perturb(state.vel, state.speed, rng);
        report.bounced_y = true;
    }

    if report.bounced() {
        log::trace!(
            "bounce x={} y={} at ({:.1}, {:.1})",
            report.bounced_x,
            report.bounced_y,
            state.pos.x,
            state.pos.y
        );
    }

    report.position = state.pos;
    report
}

/// Nudge a velocity's heading by a uniform angle in `[-BOUNCE_JITTER, BOUNCE_JITTER)`
/// and rebuild it at exactly `speed`. Breaks up periodic bounce loops.
pub fn perturb<R: RandomSource + ?Sized>(vel: Vec2, speed: f32, rng: &mut R) -> Vec2 {
    let jitter = (rng.unit() - 0.5) * 2.0 * BOUNCE_JITTER;
    velocity_from_angle(heading(vel) + jitter, speed)
}
