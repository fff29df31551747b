//! Wacky Balls - a falling-balls basket catching game
//!
//! Core modules:
//! - `sim`: Simulation core (figures, collisions, basket containment)
//! - `score`: Score/life reporting sink
//! - `highscores`: Best score per player
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod score;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use score::{ScoreSink, Scoreboard};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Added to a falling figure's vertical speed every tick (screen y grows downward)
    pub const GRAVITY: f32 = 0.25;

    /// Score for a good ball collected from the basket
    pub const GOOD_BALL_SCORE: i32 = 10;
    /// Score for a bad ball collected from the basket
    pub const BAD_BALL_SCORE: i32 = -5;
    /// Lives gained per life ball collected from the basket
    pub const LIFE_BALL_LIVES: i32 = 1;
    /// Starting lives
    pub const START_LIVES: i32 = 3;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 160.0;
    pub const BASKET_HEIGHT: f32 = 120.0;
    /// Space reserved below the basket when no system bar height is known
    pub const BASKET_BOTTOM_MARGIN: f32 = 350.0;
    /// Extra gap between the basket and the reserved bottom area
    pub const BASKET_OFFSET: f32 = 20.0;
    /// Fraction of the touch delta actually applied to the basket
    pub const DRAG_DAMPING: f32 = 0.8;
    /// Maximum basket drag speed (either direction)
    pub const MAX_DRAG_SPEED: f32 = 10.0;
    /// Milliseconds per drag time unit
    pub const DRAG_TIME_DIVISOR: f32 = 200.0;

    /// Edge posts sitting on the basket rim
    pub const EDGE_RADIUS: f32 = 5.0;
    pub const EDGE_MASS: f32 = 30.0;
    /// How far above the basket top the edge posts sit
    pub const EDGE_LIFT: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 24.0;
    pub const BALL_MASS: f32 = 1.0;
    /// Spawn height (just above the visible screen)
    pub const SPAWN_Y: f32 = -50.0;

    /// Extra distance added when pulling overlapping circles apart
    pub const SEPARATION_SLOP: f32 = 0.01;
}
