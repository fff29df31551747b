//! The player's basket and the figures it currently holds
//!
//! The basket owns its body and its two rim posts. Caught figures are only
//! referenced by id: the arena owns them, and membership is re-checked every
//! tick against the basket rectangle.

use glam::Vec2;

use super::collision::{resolve_edge_posts, resolve_outside_basket};
use super::figure::{Figure, FigureId, FigureKind, Rect, Side, index_of};
use super::speed::Speed;
use super::state::Screen;
use crate::consts::{BASKET_OFFSET, EDGE_LIFT};
use crate::score::ScoreSink;
use crate::tuning::BasketTuning;

/// Entry of the basket's containment set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// Rim post, permanent
    Edge(Side),
    /// Figure from the arena currently inside the basket
    Caught(FigureId),
}

#[derive(Debug, Clone)]
pub struct Basket {
    /// Basket body (kind `Basket`), centered at `body.pos`
    pub body: Figure,
    left_edge: Figure,
    right_edge: Figure,
    members: Vec<Member>,
    tuning: BasketTuning,
    /// Timestamp of the last touch down/move, for drag speed
    last_touch_ms: u64,
}

impl Basket {
    pub fn new(center: Vec2, tuning: BasketTuning) -> Self {
        let mut body = Figure::new(
            0,
            FigureKind::Basket,
            center,
            tuning.width.min(tuning.height) / 2.0,
            0.0,
        );
        body.size = Vec2::new(tuning.width, tuning.height);

        let mut basket = Self {
            body,
            left_edge: Figure::edge_post(
                Side::Left,
                Vec2::ZERO,
                tuning.edge_radius,
                tuning.edge_mass,
            ),
            right_edge: Figure::edge_post(
                Side::Right,
                Vec2::ZERO,
                tuning.edge_radius,
                tuning.edge_mass,
            ),
            members: vec![Member::Edge(Side::Left), Member::Edge(Side::Right)],
            tuning,
            last_touch_ms: 0,
        };
        basket.sync_edges();
        basket
    }

    /// Basket at its starting place: horizontally centered, resting above
    /// the reserved bottom margin.
    pub fn placed(screen: Screen, tuning: BasketTuning) -> Self {
        let y = screen.height - tuning.bottom_margin - tuning.height / 2.0 - BASKET_OFFSET;
        Self::new(Vec2::new(screen.width / 2.0, y), tuning)
    }

    pub fn rect(&self) -> Rect {
        self.body.bounds()
    }

    pub fn edge(&self, side: Side) -> &Figure {
        match side {
            Side::Left => &self.left_edge,
            Side::Right => &self.right_edge,
        }
    }

    pub fn edges_mut(&mut self) -> [&mut Figure; 2] {
        [&mut self.left_edge, &mut self.right_edge]
    }

    /// Containment set, edge posts included
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Ids of the caught figures
    pub fn caught(&self) -> impl Iterator<Item = FigureId> + '_ {
        self.members.iter().filter_map(|m| match *m {
            Member::Caught(id) => Some(id),
            Member::Edge(_) => None,
        })
    }

    pub fn is_figure_contained(&self, id: FigureId) -> bool {
        self.members.contains(&Member::Caught(id))
    }

    /// Add a figure to the basket. Returns false if it was already inside.
    pub fn add_figure(&mut self, id: FigureId) -> bool {
        if self.is_figure_contained(id) {
            return false;
        }
        self.members.push(Member::Caught(id));
        log::debug!("Figure {} in the basket", id);
        true
    }

    /// Put the rim posts back on the basket's top corners
    fn sync_edges(&mut self) {
        let rect = self.rect();
        let y = rect.top() - EDGE_LIFT;
        self.left_edge.pos = Vec2::new(rect.left(), y);
        self.right_edge.pos = Vec2::new(rect.right(), y);
    }

    /// Per-tick refresh: reset the basket and rim post speeds, then evict
    /// every caught figure that is gone, dead, or no longer overlapping the
    /// basket.
    ///
    /// Drag speed only lives until the next update, so a basket held still
    /// acts as a still wall in the collision pass.
    pub fn update(&mut self, figures: &mut [Figure]) {
        self.body.speed.stop();
        for edge in self.edges_mut() {
            edge.speed.stop();
        }

        let rect = self.rect();
        self.members.retain(|member| {
            let Member::Caught(id) = *member else {
                return true;
            };

            let Some(index) = index_of(figures, id) else {
                log::debug!("Figure {} left the arena, removed from basket", id);
                return false;
            };

            let figure = &mut figures[index];
            if !figure.is_alive() {
                log::debug!("Figure {} dead, removed from basket", id);
                false
            } else if !rect.overlaps_circle_bounds(figure.pos, figure.radius) {
                // Out of the basket, falling again
                figure.speed.set_gravity(true);
                log::debug!("Figure {} removed from basket", id);
                false
            } else {
                true
            }
        });
    }

    /// Touch down: the basket is grabbed only if the point is on it
    pub fn handle_down(&mut self, point: Vec2, at_ms: u64) {
        self.body.touched = self.rect().contains_point(point);
        if self.body.touched {
            self.last_touch_ms = at_ms;
        }
    }

    /// Drag the basket toward `point`
    ///
    /// The basket and everything inside it move by the damped horizontal
    /// delta. Figures outside collide with the moved basket walls and rim
    /// posts. The basket speed is inferred from the delta and elapsed time.
    /// Returns false when the drag is ignored (not touched, or the basket
    /// would leave the screen).
    pub fn handle_move(
        &mut self,
        point: Vec2,
        at_ms: u64,
        screen: Screen,
        figures: &mut [Figure],
    ) -> bool {
        if !self.body.touched {
            return false;
        }

        let half_width = self.body.width() / 2.0;
        if point.x > screen.width - half_width || point.x < half_width {
            return false;
        }

        let delta = point.x - self.body.pos.x;
        let step = delta * self.tuning.drag_damping;

        self.body.pos.x += step;
        self.sync_edges();

        let elapsed = at_ms.saturating_sub(self.last_touch_ms);
        self.last_touch_ms = at_ms;
        self.body.speed = Speed::from_drag(
            delta,
            elapsed as f32 / self.tuning.drag_time_divisor,
            self.tuning.max_drag_speed,
        );
        let drag_vel = self.body.speed.vel;
        for edge in self.edges_mut() {
            edge.speed.vel = drag_vel;
        }

        for figure in figures.iter_mut() {
            if !figure.is_alive() {
                continue;
            }

            if self.is_figure_contained(figure.id) {
                figure.pos.x += step;
            } else if figure.kind.is_falling() {
                resolve_outside_basket(&self.body, figure);
                if resolve_edge_posts(self, figure) {
                    figure.speed.set_gravity(true);
                }
            }
        }

        true
    }

    /// Double tap on the basket: collect everything inside it
    ///
    /// Every caught figure is killed and removed; good balls and bad balls
    /// change the score, life balls add lives. Both deltas are reported to
    /// `sink` and returned as `(lives, score)`. Returns `None` when the tap
    /// misses the basket.
    pub fn handle_double_down(
        &mut self,
        point: Vec2,
        figures: &mut [Figure],
        sink: &mut dyn ScoreSink,
    ) -> Option<(i32, i32)> {
        if !self.rect().contains_point(point) {
            return None;
        }

        let mut lives = 0;
        let mut score = 0;
        self.members.retain(|member| {
            let Member::Caught(id) = *member else {
                return true;
            };

            if let Some(index) = index_of(figures, id) {
                let figure = &mut figures[index];
                if figure.kill() {
                    lives += figure.kind.life_value();
                    score += figure.kind.score_value();
                }
            }
            false
        });

        log::debug!("Basket emptied: lives {:+}, score {:+}", lives, score);
        sink.lives_changed(lives);
        sink.score_changed(score);

        Some((lives, score))
    }

    /// Touch released: let go of the basket
    pub fn handle_up(&mut self) {
        if self.body.touched {
            self.body.touched = false;
            self.body.speed.stop();
        }
    }
}
