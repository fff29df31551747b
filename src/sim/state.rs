//! Game state and screen geometry
//!
//! The state owns every falling figure (in ascending id order), the basket,
//! and the pending touch input.

use serde::{Deserialize, Serialize};

use super::basket::Basket;
use super::figure::{Figure, FigureId};
use super::input::{TouchEvent, TouchQueue};
use crate::tuning::Tuning;

/// Display surface size, supplied every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Falling figures, sorted by id
    pub figures: Vec<Figure>,
    pub basket: Basket,
    /// Touch events waiting for the next tick
    pub input: TouchQueue,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next figure ID
    next_id: FigureId,
}

impl GameState {
    /// Empty playfield with the basket at its starting place
    pub fn new(screen: Screen, tuning: Tuning) -> Self {
        Self {
            tuning,
            figures: Vec::new(),
            basket: Basket::placed(screen, tuning.basket),
            input: TouchQueue::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new figure ID
    pub fn next_figure_id(&mut self) -> FigureId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take ownership of a figure, giving it a fresh id
    pub fn add_figure(&mut self, mut figure: Figure) -> FigureId {
        figure.id = self.next_figure_id();
        let id = figure.id;
        self.figures.push(figure);
        id
    }

    pub fn figure(&self, id: FigureId) -> Option<&Figure> {
        self.figures
            .binary_search_by_key(&id, |f| f.id)
            .ok()
            .map(|index| &self.figures[index])
    }

    /// Queue a touch event for the next tick
    pub fn push_touch(&mut self, event: TouchEvent) {
        self.input.push(event);
    }

    /// Drop dead figures. Only called between ticks.
    pub fn compact(&mut self) -> usize {
        let before = self.figures.len();
        self.figures.retain(Figure::is_alive);
        before - self.figures.len()
    }

    pub fn alive_count(&self) -> usize {
        self.figures.iter().filter(|f| f.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::figure::FigureKind;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(Screen::new(1080.0, 1920.0), Tuning::default())
    }

    #[test]
    fn test_ids_are_increasing_and_nonzero() {
        let mut state = state();
        let a = state.add_figure(Figure::new(0, FigureKind::Ball, Vec2::ZERO, 5.0, 1.0));
        let b = state.add_figure(Figure::new(0, FigureKind::Ball, Vec2::ZERO, 5.0, 1.0));
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(state.figure(2).map(|f| f.id), Some(2));
        assert!(state.figure(3).is_none());
    }

    #[test]
    fn test_compact_removes_dead() {
        let mut state = state();
        for _ in 0..3 {
            state.add_figure(Figure::new(0, FigureKind::Ball, Vec2::ZERO, 5.0, 1.0));
        }
        state.figures[1].kill();
        assert_eq!(state.alive_count(), 2);
        assert_eq!(state.compact(), 1);
        assert_eq!(state.figures.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
