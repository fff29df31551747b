//! Figures: every body taking part in the simulation
//!
//! A figure is a circle (or an edge point) with a position, radius, mass and
//! an owned [`Speed`]. Behavior differences between figure kinds are
//! dispatched on [`FigureKind`] by the tick and the collision resolver.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::speed::Speed;
use super::state::Screen;
use crate::consts::{BAD_BALL_SCORE, GOOD_BALL_SCORE, LIFE_BALL_LIVES};
use crate::score::ScoreSink;

/// Arena handle of a figure. Allocated ids start at 1; 0 is never handed out.
pub type FigureId = u32;

/// What a figure is, and therefore how it collides and scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FigureKind {
    /// Good ball, scores when collected
    Ball,
    /// Costs score when collected
    BadBall,
    /// Grants a life when collected
    LifeBall,
    /// The player's basket
    Basket,
    /// Immovable helper body (basket edge posts)
    StaticBall,
}

impl FigureKind {
    /// Kinds that fall under gravity and collide with everything
    pub fn is_falling(self) -> bool {
        matches!(self, FigureKind::Ball | FigureKind::BadBall | FigureKind::LifeBall)
    }

    /// Score awarded when this kind is collected from the basket
    pub fn score_value(self) -> i32 {
        match self {
            FigureKind::Ball => GOOD_BALL_SCORE,
            FigureKind::BadBall => BAD_BALL_SCORE,
            _ => 0,
        }
    }

    /// Lives awarded when this kind is collected from the basket
    pub fn life_value(self) -> i32 {
        match self {
            FigureKind::LifeBall => LIFE_BALL_LIVES,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FigureState {
    #[default]
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Structural role of a figure, independent of its id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Free,
    /// Rim post owned by the basket
    EdgePost(Side),
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Inclusive point test
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Whether the bounding box of a circle overlaps this rectangle
    /// (touching edges do not count)
    pub fn overlaps_circle_bounds(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.min.x
            && center.x - radius < self.max.x
            && center.y + radius > self.min.y
            && center.y - radius < self.max.y
    }

    /// Closest point of the rectangle to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub id: FigureId,
    pub kind: FigureKind,
    #[serde(default)]
    pub role: Role,
    pub state: FigureState,
    pub pos: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Visual extent (width, height)
    pub size: Vec2,
    pub speed: Speed,
    /// Player's active touch point is inside this figure (basket only)
    #[serde(default)]
    pub touched: bool,
}

impl Figure {
    /// A motionless figure whose visual extent matches its circle
    pub fn new(id: FigureId, kind: FigureKind, pos: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            id,
            kind,
            role: Role::Free,
            state: FigureState::Alive,
            pos,
            radius,
            mass,
            size: Vec2::splat(radius * 2.0),
            speed: Speed::ZERO,
            touched: false,
        }
    }

    /// A figure falling under gravity
    pub fn falling(
        id: FigureId,
        kind: FigureKind,
        pos: Vec2,
        radius: f32,
        mass: f32,
        vel: Vec2,
    ) -> Self {
        Self {
            speed: Speed::falling(vel.x, vel.y),
            ..Self::new(id, kind, pos, radius, mass)
        }
    }

    /// Basket rim post. Edge posts carry id 0 and are identified by role.
    pub fn edge_post(side: Side, pos: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            role: Role::EdgePost(side),
            ..Self::new(0, FigureKind::StaticBall, pos, radius, mass)
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == FigureState::Alive
    }

    pub fn is_edge_post(&self) -> bool {
        matches!(self.role, Role::EdgePost(_))
    }

    /// Mark dead. Returns true only on the Alive -> Dead transition.
    pub fn kill(&mut self) -> bool {
        if self.is_alive() {
            self.state = FigureState::Dead;
            true
        } else {
            false
        }
    }

    /// Immovable figures act as infinite mass in collisions
    pub fn is_static(&self) -> bool {
        matches!(self.kind, FigureKind::StaticBall | FigureKind::Basket) || self.mass <= 0.0
    }

    /// Inverse mass (0 for immovable figures)
    pub fn inv_mass(&self) -> f32 {
        if self.is_static() { 0.0 } else { 1.0 / self.mass }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Rectangle covered by the figure's visual extent
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Advance one tick: move, integrate gravity, and die when fallen past
    /// the bottom of the screen.
    pub fn update(&mut self, screen: Screen, sink: &mut dyn ScoreSink) {
        if !self.kind.is_falling() || !self.is_alive() {
            return;
        }

        self.pos += self.speed.vel;
        self.speed.update();

        if self.pos.y > screen.height + 2.0 * self.radius && self.kill() {
            log::debug!("Figure {} fell off the screen", self.id);
            sink.lives_changed(-1);
        }
    }
}

/// Position of a figure in an arena slice
pub fn index_of(figures: &[Figure], id: FigureId) -> Option<usize> {
    figures.iter().position(|f| f.id == id)
}

/// Mutable access to two distinct figures of the same slice
///
/// Panics if `i == j`: resolving a figure against itself is a caller bug.
pub fn pair_mut(figures: &mut [Figure], i: usize, j: usize) -> (&mut Figure, &mut Figure) {
    assert_ne!(i, j, "a figure cannot collide with itself");
    if i < j {
        let (head, tail) = figures.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = figures.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Scoreboard;

    fn screen() -> Screen {
        Screen::new(480.0, 800.0)
    }

    #[test]
    fn test_update_moves_then_accelerates() {
        let (pos, vel) = (Vec2::new(100.0, 0.0), Vec2::new(1.0, 2.0));
        let mut ball = Figure::falling(1, FigureKind::Ball, pos, 10.0, 1.0, vel);
        let mut board = Scoreboard::default();
        ball.update(screen(), &mut board);
        assert_eq!(ball.pos, Vec2::new(101.0, 2.0));
        assert!((ball.speed.y() - (2.0 + crate::consts::GRAVITY)).abs() < 1e-6);
    }

    #[test]
    fn test_falls_off_screen_once() {
        let (pos, vel) = (Vec2::new(100.0, 819.0), Vec2::new(0.0, 2.0));
        let mut ball = Figure::falling(1, FigureKind::Ball, pos, 10.0, 1.0, vel);
        let mut board = Scoreboard::default();
        let start = board.lives;

        ball.update(screen(), &mut board);
        assert!(!ball.is_alive());
        assert_eq!(board.lives, start - 1);

        // Further updates neither move nor report again
        let pos = ball.pos;
        ball.update(screen(), &mut board);
        ball.update(screen(), &mut board);
        assert_eq!(board.lives, start - 1);
        assert_eq!(ball.pos, pos);
    }

    #[test]
    fn test_static_figures_do_not_move() {
        let mut post = Figure::edge_post(Side::Left, Vec2::new(10.0, 10.0), 5.0, 30.0);
        post.speed.vel = Vec2::new(3.0, 3.0);
        let mut board = Scoreboard::default();
        post.update(screen(), &mut board);
        assert_eq!(post.pos, Vec2::new(10.0, 10.0));
        assert!(post.is_static());
        assert_eq!(post.inv_mass(), 0.0);
        assert!(post.is_edge_post());
    }

    #[test]
    fn test_kill_is_one_way() {
        let mut ball = Figure::new(3, FigureKind::BadBall, Vec2::ZERO, 5.0, 1.0);
        assert!(ball.kill());
        assert!(!ball.kill());
        assert_eq!(ball.state, FigureState::Dead);
    }

    #[test]
    fn test_kind_values() {
        assert_eq!(FigureKind::Ball.score_value(), 10);
        assert_eq!(FigureKind::BadBall.score_value(), -5);
        assert_eq!(FigureKind::LifeBall.score_value(), 0);
        assert_eq!(FigureKind::LifeBall.life_value(), 1);
        assert!(!FigureKind::Basket.is_falling());
    }

    #[test]
    fn test_rect_overlap() {
        let rect = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(40.0, 20.0));
        assert!(rect.overlaps_circle_bounds(Vec2::new(100.0, 100.0), 1.0));
        assert!(rect.overlaps_circle_bounds(Vec2::new(125.0, 100.0), 6.0));
        assert!(!rect.overlaps_circle_bounds(Vec2::new(125.0, 100.0), 5.0));
        assert!(!rect.overlaps_circle_bounds(Vec2::new(100.0, 80.0), 10.0));
        assert!(rect.contains_point(Vec2::new(80.0, 90.0)));
        assert!(!rect.contains_point(Vec2::new(79.0, 90.0)));
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut figures = vec![
            Figure::new(1, FigureKind::Ball, Vec2::ZERO, 1.0, 1.0),
            Figure::new(2, FigureKind::Ball, Vec2::ONE, 1.0, 1.0),
        ];
        let (a, b) = pair_mut(&mut figures, 1, 0);
        assert_eq!((a.id, b.id), (2, 1));
        let (a, b) = pair_mut(&mut figures, 0, 1);
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    #[should_panic]
    fn test_pair_mut_self_panics() {
        let mut figures = vec![Figure::new(1, FigureKind::Ball, Vec2::ZERO, 1.0, 1.0)];
        let _ = pair_mut(&mut figures, 0, 0);
    }
}
