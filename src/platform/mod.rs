//! Platform abstraction layer
//!
//! Browser-only collaborators for the animator:
//! - Container bounds from the DOM
//! - Shadow and trail rendering through inline styles
//! - requestAnimationFrame loop and ResizeObserver subscription

#[cfg(target_arch = "wasm32")]
pub mod web;
