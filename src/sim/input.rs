//! Touch input queue
//!
//! The platform layer pushes touch events as they arrive; the tick drains
//! them once, before any figure is updated, so input never races the
//! simulation.

use glam::Vec2;

/// Logical touch events in screen coordinates, stamped in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down { x: f32, y: f32, at_ms: u64 },
    Move { x: f32, y: f32, at_ms: u64 },
    /// Second tap of a double tap
    DoubleDown { x: f32, y: f32, at_ms: u64 },
    Up { x: f32, y: f32, at_ms: u64 },
}

impl TouchEvent {
    pub fn point(&self) -> Vec2 {
        match *self {
            TouchEvent::Down { x, y, .. }
            | TouchEvent::Move { x, y, .. }
            | TouchEvent::DoubleDown { x, y, .. }
            | TouchEvent::Up { x, y, .. } => Vec2::new(x, y),
        }
    }

    pub fn at_ms(&self) -> u64 {
        match *self {
            TouchEvent::Down { at_ms, .. }
            | TouchEvent::Move { at_ms, .. }
            | TouchEvent::DoubleDown { at_ms, .. }
            | TouchEvent::Up { at_ms, .. } => at_ms,
        }
    }
}

/// Pending touch events, drained once per tick
#[derive(Debug, Clone)]
pub struct TouchQueue {
    events: Vec<TouchEvent>,
}

impl TouchQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: TouchEvent) {
        self.events.push(event);
    }

    /// Take all pending events in arrival order
    pub fn drain(&mut self) -> Vec<TouchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for TouchQueue {
    fn default() -> Self {
        Self::new()
    }
}
