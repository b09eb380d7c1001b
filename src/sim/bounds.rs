//! Container bounds and derived shadow size

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SIZE_FRACTION;

/// Size of the containing region (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create bounds; negative or non-finite dimensions collapse to 0
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Edge length of the square shadow for these bounds
    pub fn entity_size(&self, preferred: f32) -> f32 {
        preferred
            .min(self.width * SIZE_FRACTION)
            .min(self.height * SIZE_FRACTION)
            .max(0.0)
    }

    /// Largest top-left offset that keeps an entity of `size` inside
    pub fn max_offset(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_size_capped_by_fraction() {
        let b = Bounds::new(400.0, 400.0);
        assert!((b.entity_size(380.0) - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_entity_size_uses_preferred_when_room() {
        let b = Bounds::new(1920.0, 1080.0);
        assert_eq!(b.entity_size(380.0), 380.0);
    }

    #[test]
    fn test_entity_size_narrow_dimension_wins() {
        let b = Bounds::new(1000.0, 300.0);
        assert!((b.entity_size(380.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_max_offset() {
        let b = Bounds::new(400.0, 300.0);
        let size = b.entity_size(380.0);
        let max = b.max_offset(size);
        assert!((max.x - 220.0).abs() < 1e-4);
        assert!((max.y - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_dimensions_collapse() {
        let b = Bounds::new(-5.0, f32::NAN);
        assert_eq!(b, Bounds::new(0.0, 0.0));
        assert!(b.is_empty());
        assert_eq!(b.entity_size(380.0), 0.0);
        assert_eq!(b.max_offset(10.0), Vec2::ZERO);
    }
}
