//! Deterministic simulation module
//!
//! All motion logic lives here. This module must stay pure:
//! - Time only arrives as an explicit `dt`
//! - Randomness only through an injected `RandomSource`
//! - No DOM or platform dependencies

pub mod bounds;
pub mod random;
pub mod state;
pub mod tick;
pub mod trail;

pub use bounds::Bounds;
pub use random::{RandomSource, SequenceRandom};
pub use state::ShadowState;
pub use tick::{TickReport, perturb, tick};
pub use trail::{Trail, TrailPoint};
