//! Data-driven game balance
//!
//! Loaded from JSON; any missing field falls back to the built-in default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Basket geometry and drag behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketTuning {
    pub width: f32,
    pub height: f32,
    /// Space kept free below the basket
    pub bottom_margin: f32,
    /// Fraction of each touch delta applied to the basket
    pub drag_damping: f32,
    /// Maximum drag speed magnitude
    pub max_drag_speed: f32,
    /// Milliseconds per drag time unit
    pub drag_time_divisor: f32,
    pub edge_radius: f32,
    pub edge_mass: f32,
}

impl Default for BasketTuning {
    fn default() -> Self {
        Self {
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
            bottom_margin: BASKET_BOTTOM_MARGIN,
            drag_damping: DRAG_DAMPING,
            max_drag_speed: MAX_DRAG_SPEED,
            drag_time_divisor: DRAG_TIME_DIVISOR,
            edge_radius: EDGE_RADIUS,
            edge_mass: EDGE_MASS,
        }
    }
}

/// Falling figure spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub radius: f32,
    pub mass: f32,
    pub spawn_y: f32,
    pub min_vx: f32,
    pub max_vx: f32,
    pub min_vy: f32,
    pub max_vy: f32,
    /// Probability (0-1) of spawning a bad ball
    pub bad_ball_chance: f32,
    /// Probability (0-1) of spawning a life ball
    pub life_ball_chance: f32,
    /// Ticks between spawns in the runner
    pub interval_ticks: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            spawn_y: SPAWN_Y,
            min_vx: -10.0,
            max_vx: 10.0,
            min_vy: 2.0,
            max_vy: 5.0,
            bad_ball_chance: 0.25,
            life_ball_chance: 0.05,
            interval_ticks: 60,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub basket: BasketTuning,
    pub spawn: SpawnTuning,
}

impl BasketTuning {
    fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err("basket width and height must be positive".into());
        }
        if self.drag_time_divisor <= 0.0 {
            return Err("drag_time_divisor must be positive".into());
        }
        if self.max_drag_speed < 0.0 {
            return Err("max_drag_speed must not be negative".into());
        }
        Ok(())
    }
}

impl SpawnTuning {
    fn validate(&self) -> Result<(), String> {
        if self.min_vx > self.max_vx {
            return Err(format!(
                "min_vx {} exceeds max_vx {}",
                self.min_vx, self.max_vx
            ));
        }
        if self.min_vy > self.max_vy {
            return Err(format!(
                "min_vy {} exceeds max_vy {}",
                self.min_vy, self.max_vy
            ));
        }
        if self.radius <= 0.0 || self.mass <= 0.0 {
            return Err("radius and mass must be positive".into());
        }
        Ok(())
    }
}

impl Tuning {
    /// Parse and check a tuning file. Inverted ranges and non-positive
    /// sizes are rejected like malformed JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.basket.validate()?;
        self.spawn.validate()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
