//! Bounded afterimage trail
//!
//! Fixed-capacity ring of recent positions. Points fade with age and expire
//! after `ttl` seconds; when full, the oldest point is evicted first.
//! `record` spaces points `ttl / capacity` apart so a full ring spans the
//! whole lifetime and the tail fades out instead of being cut off.

use glam::Vec2;
use std::collections::VecDeque;

/// One recorded afterimage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub size: f32,
    /// Seconds since the point was recorded
    pub age: f32,
}

#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    ttl: f32,
    /// Seconds since the last recorded point
    since_record: f32,
}

impl Trail {
    pub fn new(capacity: usize, ttl: f32) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            ttl,
            since_record: 0.0,
        }
    }

    /// Minimum spacing between recorded points (seconds)
    pub fn interval(&self) -> f32 {
        self.ttl / self.capacity as f32
    }

    /// Record a point if `interval` has elapsed since the last one.
    ///
    /// Returns whether the point was kept.
    pub fn record(&mut self, pos: Vec2, size: f32) -> bool {
        if !self.points.is_empty() && self.since_record < self.interval() {
            return false;
        }
        self.push(pos, size);
        true
    }

    /// Record a new point, evicting the oldest if full
    pub fn push(&mut self, pos: Vec2, size: f32) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint { pos, size, age: 0.0 });
        self.since_record = 0.0;
    }

    /// Age every point by `dt` and drop the expired ones.
    ///
    /// Returns how many points expired.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.since_record += dt;
        for p in &mut self.points {
            p.age += dt;
        }
        let before = self.points.len();
        // Oldest points sit at the front
        while self.points.front().is_some_and(|p| p.age >= self.ttl) {
            self.points.pop_front();
        }
        before - self.points.len()
    }

    /// Fade factor in `[0, 1]`, 1 for a fresh point
    pub fn opacity(&self, point: &TrailPoint) -> f32 {
        if self.ttl <= 0.0 {
            return 0.0;
        }
        (1.0 - point.age / self.ttl).clamp(0.0, 1.0)
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.since_record = 0.0;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> f32 {
        self.ttl
    }
}
