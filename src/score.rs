//! Score and life reporting
//!
//! The simulation reports signed deltas; what happens with them (display,
//! persistence) is up to the sink.

use serde::{Deserialize, Serialize};

use crate::consts::START_LIVES;

/// Receiver of score and life deltas produced by the simulation
pub trait ScoreSink {
    fn lives_changed(&mut self, delta: i32);
    fn score_changed(&mut self, delta: i32);
}

/// Running totals for a single game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: i64,
    pub lives: i32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
        }
    }
}

impl Scoreboard {
    pub fn new(lives: i32) -> Self {
        Self { score: 0, lives }
    }

    /// Out of lives
    pub fn is_over(&self) -> bool {
        self.lives <= 0
    }
}

impl ScoreSink for Scoreboard {
    fn lives_changed(&mut self, delta: i32) {
        self.lives += delta;
    }

    fn score_changed(&mut self, delta: i32) {
        self.score += i64::from(delta);
    }
}
