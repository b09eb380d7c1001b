//! Shadow lifecycle
//!
//! Owns a simulation between `start` and `stop` and drives it from frame
//! timestamps. The container, the renderer and the RNG are all handed in;
//! nothing is looked up from the surrounding page.

use glam::Vec2;

use crate::config::{ConfigError, ShadowConfig};
use crate::consts::{FIRST_FRAME_DT, MAX_FRAME_DT};
use crate::sim::{Bounds, RandomSource, ShadowState, TickReport, Trail, tick};

/// Reports the current size of the containing region
pub trait BoundsProvider {
    /// `None` when the container no longer exists
    fn bounds(&self) -> Option<Bounds>;
}

impl<F> BoundsProvider for F
where
    F: Fn() -> Option<Bounds>,
{
    fn bounds(&self) -> Option<Bounds> {
        self()
    }
}

/// What gets rendered after each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Top-left offset of the shadow inside its container
    pub offset: Vec2,
    /// Edge length of the shadow
    pub size: f32,
    /// Seconds simulated by this frame
    pub dt: f32,
}

/// Receives the shadow's rendered position
pub trait PositionSink {
    fn present(&mut self, frame: &Frame);

    /// Called once when the simulation stops
    fn clear(&mut self) {}
}

impl<A: PositionSink, B: PositionSink> PositionSink for (A, B) {
    fn present(&mut self, frame: &Frame) {
        self.0.present(frame);
        self.1.present(frame);
    }

    fn clear(&mut self) {
        self.0.clear();
        self.1.clear();
    }
}

impl<S: PositionSink> PositionSink for Option<S> {
    fn present(&mut self, frame: &Frame) {
        if let Some(sink) = self {
            sink.present(frame);
        }
    }

    fn clear(&mut self) {
        if let Some(sink) = self {
            sink.clear();
        }
    }
}

/// Draws the afterimage trail
pub trait TrailRenderer {
    fn render(&mut self, trail: &Trail);

    fn clear(&mut self) {}
}

/// Sink that samples frames into a bounded trail and hands it to a renderer
#[derive(Debug)]
pub struct TrailSink<T> {
    trail: Trail,
    renderer: T,
}

impl<T: TrailRenderer> TrailSink<T> {
    pub fn new(capacity: usize, ttl: f32, renderer: T) -> Self {
        Self {
            trail: Trail::new(capacity, ttl),
            renderer,
        }
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn renderer(&self) -> &T {
        &self.renderer
    }
}

impl<T: TrailRenderer> PositionSink for TrailSink<T> {
    fn present(&mut self, frame: &Frame) {
        self.trail.advance(frame.dt);
        self.trail.record(frame.offset, frame.size);
        self.renderer.render(&self.trail);
    }

    fn clear(&mut self) {
        self.trail.clear();
        self.renderer.clear();
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Stopped,
    Running {
        shadow: ShadowState,
        /// Timestamp of the previous frame (ms)
        last_time: Option<f64>,
    },
}

/// Bouncing shadow driven by animation frames
pub struct Animator<B, S, R> {
    config: ShadowConfig,
    bounds: B,
    sink: S,
    rng: R,
    phase: Phase,
}

impl<B, S, R> Animator<B, S, R>
where
    B: BoundsProvider,
    S: PositionSink,
    R: RandomSource,
{
    /// Create a stopped animator
    pub fn new(config: ShadowConfig, bounds: B, sink: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            bounds,
            sink,
            rng,
            phase: Phase::Stopped,
        })
    }

    /// Spawn the shadow at a random spot and begin animating.
    ///
    /// Returns false, leaving the animator stopped, when the container is absent.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            log::debug!("Shadow already running");
            return true;
        }
        let Some(bounds) = self.bounds.bounds() else {
            log::debug!("No container to bounce in, shadow not started");
            return false;
        };

        let shadow = ShadowState::spawn(
            bounds,
            self.config.preferred_size,
            self.config.speed,
            &mut self.rng,
        );
        log::info!(
            "Shadow started in {}x{} (size {:.0}, heading {:.2} rad)",
            bounds.width,
            bounds.height,
            shadow.entity_size,
            shadow.angle()
        );
        self.phase = Phase::Running {
            shadow,
            last_time: None,
        };
        true
    }

    /// Advance one animation frame at timestamp `now_ms`.
    ///
    /// Does nothing once stopped.
    pub fn frame(&mut self, now_ms: f64) -> Option<TickReport> {
        let Phase::Running { shadow, last_time } = &mut self.phase else {
            return None;
        };

        let dt = frame_dt(*last_time, now_ms);
        *last_time = Some(now_ms);

        let report = tick(shadow, &mut self.rng, dt);
        self.sink.present(&Frame {
            offset: report.position,
            size: shadow.entity_size,
            dt,
        });
        Some(report)
    }

    /// Re-read the container size after it changed.
    ///
    /// The position is corrected by the next frame's wall check.
    pub fn on_resize(&mut self) -> bool {
        let Phase::Running { shadow, .. } = &mut self.phase else {
            return false;
        };
        let Some(bounds) = self.bounds.bounds() else {
            log::debug!("Container vanished, keeping previous bounds");
            return false;
        };
        if bounds != shadow.bounds {
            shadow.resize(bounds);
            log::debug!(
                "Container resized to {}x{}, shadow size {:.0}",
                bounds.width,
                bounds.height,
                shadow.entity_size
            );
        }
        true
    }

    /// Stop animating and discard position and velocity.
    ///
    /// Safe to call repeatedly; returns whether this call did the stopping.
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running { .. } => {
                self.sink.clear();
                log::info!("Shadow stopped");
                true
            }
            Phase::Stopped => false,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Live simulation state, if running
    pub fn state(&self) -> Option<&ShadowState> {
        match &self.phase {
            Phase::Running { shadow, .. } => Some(shadow),
            Phase::Stopped => None,
        }
    }

    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Seconds between two frame timestamps, clamped to `[0, MAX_FRAME_DT]`
fn frame_dt(last_ms: Option<f64>, now_ms: f64) -> f32 {
    let Some(prev) = last_ms else {
        return FIRST_FRAME_DT;
    };
    let dt = ((now_ms - prev) / 1000.0) as f32;
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
