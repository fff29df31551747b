//! Seeded figure spawner
//!
//! Figures enter just above the screen at a random column with a random
//! sideways drift and fall under gravity.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::figure::{Figure, FigureKind};
use super::state::Screen;
use crate::tuning::SpawnTuning;

pub struct Spawner {
    rng: Pcg32,
    tuning: SpawnTuning,
}

impl Spawner {
    /// Reversed speed bounds are swapped so sampling never sees an empty range
    pub fn new(seed: u64, mut tuning: SpawnTuning) -> Self {
        if tuning.min_vx > tuning.max_vx {
            std::mem::swap(&mut tuning.min_vx, &mut tuning.max_vx);
        }
        if tuning.min_vy > tuning.max_vy {
            std::mem::swap(&mut tuning.min_vy, &mut tuning.max_vy);
        }

        Self {
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    fn pick_kind(&mut self) -> FigureKind {
        let roll: f32 = self.rng.random();
        if roll < self.tuning.life_ball_chance {
            FigureKind::LifeBall
        } else if roll < self.tuning.life_ball_chance + self.tuning.bad_ball_chance {
            FigureKind::BadBall
        } else {
            FigureKind::Ball
        }
    }

    /// A new falling figure. The id is left at 0 for the game state to assign.
    pub fn spawn(&mut self, screen: Screen) -> Figure {
        let t = self.tuning;
        let kind = self.pick_kind();
        let x = self.rng.random_range(0.0..=screen.width);
        let vx = self.rng.random_range(t.min_vx..=t.max_vx);
        let vy = self.rng.random_range(t.min_vy..=t.max_vy);

        Figure::falling(
            0,
            kind,
            Vec2::new(x, t.spawn_y),
            t.radius,
            t.mass,
            Vec2::new(vx, vy),
        )
    }
}
