//! Figure velocity with optional gravity accumulation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;

/// Velocity owned by a figure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Speed {
    /// (vx, vy) in pixels per tick
    pub vel: Vec2,
    /// When set, `update` accelerates the figure downward
    pub gravity: bool,
}

impl Speed {
    /// Motionless, no gravity
    pub const ZERO: Self = Self {
        vel: Vec2::ZERO,
        gravity: false,
    };

    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            vel: Vec2::new(vx, vy),
            gravity: false,
        }
    }

    /// Speed of a freely falling figure
    pub fn falling(vx: f32, vy: f32) -> Self {
        Self {
            gravity: true,
            ..Self::new(vx, vy)
        }
    }

    /// Horizontal speed inferred from a drag delta over a time scale,
    /// clamped to `±max_speed`.
    ///
    /// A non-positive time scale saturates toward the sign of `delta`
    /// rather than producing infinities or NaN.
    pub fn from_drag(delta: f32, time_scale: f32, max_speed: f32) -> Self {
        let vx = if time_scale > 0.0 {
            delta / time_scale
        } else if delta == 0.0 {
            0.0
        } else {
            delta.signum() * max_speed
        };

        Self {
            vel: Vec2::new(vx.clamp(-max_speed, max_speed), 0.0),
            gravity: false,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.vel.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.vel.y
    }

    pub fn set_gravity(&mut self, gravity: bool) {
        self.gravity = gravity;
    }

    /// Integrate gravity for one tick
    pub fn update(&mut self) {
        if self.gravity {
            self.vel.y += GRAVITY;
        }
    }

    /// Stop all motion (gravity flag untouched)
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accumulates() {
        let mut speed = Speed::falling(1.0, 2.0);
        speed.update();
        speed.update();
        assert!((speed.y() - (2.0 + 2.0 * GRAVITY)).abs() < 1e-6);
        assert_eq!(speed.x(), 1.0);
    }

    #[test]
    fn test_no_gravity_no_change() {
        let mut speed = Speed::new(3.0, -4.0);
        speed.update();
        assert_eq!(speed.vel, Vec2::new(3.0, -4.0));

        let mut speed = Speed::falling(0.0, 1.0);
        speed.set_gravity(false);
        speed.update();
        assert_eq!(speed.y(), 1.0);
    }

    #[test]
    fn test_from_drag_scales_and_clamps() {
        // 4 pixels over half a time unit
        let speed = Speed::from_drag(4.0, 0.5, 10.0);
        assert!((speed.x() - 8.0).abs() < 1e-6);
        assert_eq!(speed.y(), 0.0);

        assert_eq!(Speed::from_drag(50.0, 0.5, 10.0).x(), 10.0);
        assert_eq!(Speed::from_drag(-50.0, 0.5, 10.0).x(), -10.0);
    }

    #[test]
    fn test_from_drag_zero_time() {
        assert_eq!(Speed::from_drag(3.0, 0.0, 10.0).x(), 10.0);
        assert_eq!(Speed::from_drag(-3.0, 0.0, 10.0).x(), -10.0);
        assert_eq!(Speed::from_drag(0.0, 0.0, 10.0).x(), 0.0);
    }
}
