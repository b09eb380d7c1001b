//! DVD Shadow - the drifting backdrop blob of the ReCall study app
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bounds, bounce integrator, trail)
//! - `animator`: Start/stop lifecycle over injected bounds, sink and RNG
//! - `config`: Tunables, validation and LocalStorage persistence
//! - `platform`: Browser bindings (DOM, ResizeObserver, animation frames)

pub mod animator;
pub mod config;
pub mod platform;
pub mod sim;

pub use animator::{Animator, BoundsProvider, Frame, PositionSink, TrailRenderer, TrailSink};
pub use config::{ConfigError, ShadowConfig, TrailConfig};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Preferred edge length of the shadow (pixels)
    pub const DEFAULT_PREFERRED_SIZE: f32 = 380.0;
    /// Drift speed (pixels per second)
    pub const DEFAULT_SPEED: f32 = 50.0;

    /// Shadow never exceeds this fraction of either container dimension
    pub const SIZE_FRACTION: f32 = 0.6;

    /// Half-width of the random angle nudge applied on every bounce (radians)
    pub const BOUNCE_JITTER: f32 = 0.1;

    /// dt used for the very first frame, before a previous timestamp exists
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Upper bound on a single frame's dt (backgrounded tabs)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Trail defaults
    pub const DEFAULT_TRAIL_CAPACITY: usize = 64;
    pub const DEFAULT_TRAIL_TTL: f32 = 3.0;
}

/// Velocity of the given magnitude pointing along `angle`
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * speed
}

/// Direction of a velocity vector (radians, `atan2(vy, vx)`)
#[inline]
pub fn heading(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
