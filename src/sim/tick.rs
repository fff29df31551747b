//! Simulation tick
//!
//! One tick: drain touch input, update every figure, resolve collisions for
//! every figure, then drop the dead ones. Update must run before resolve.

use super::basket::Basket;
use super::collision::{
    resolve_basket_catch, resolve_edge_posts, resolve_figure_pair, resolve_outside_basket,
    resolve_side_wall,
};
use super::figure::{Figure, pair_mut};
use super::input::TouchEvent;
use super::state::{GameState, Screen};
use crate::score::ScoreSink;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, screen: Screen, sink: &mut dyn ScoreSink) {
    for event in state.input.drain() {
        apply_touch(state, event, screen, sink);
    }

    update_figures(state, screen, sink);
    resolve_figures(state, screen);

    let removed = state.compact();
    if removed > 0 {
        log::debug!("Tick {}: removed {} dead figures", state.time_ticks, removed);
    }

    state.time_ticks += 1;
}

/// Route a touch event to the basket
pub fn apply_touch(
    state: &mut GameState,
    event: TouchEvent,
    screen: Screen,
    sink: &mut dyn ScoreSink,
) {
    let point = event.point();
    match event {
        TouchEvent::Down { at_ms, .. } => state.basket.handle_down(point, at_ms),
        TouchEvent::Move { at_ms, .. } => {
            state
                .basket
                .handle_move(point, at_ms, screen, &mut state.figures);
        }
        TouchEvent::DoubleDown { .. } => {
            state
                .basket
                .handle_double_down(point, &mut state.figures, sink);
        }
        TouchEvent::Up { .. } => state.basket.handle_up(),
    }
}

/// Update pass: integrate every figure, then refresh basket membership
pub fn update_figures(state: &mut GameState, screen: Screen, sink: &mut dyn ScoreSink) {
    for figure in &mut state.figures {
        figure.update(screen, sink);
    }
    state.basket.update(&mut state.figures);
}

/// Collision pass over every figure
pub fn resolve_figures(state: &mut GameState, screen: Screen) {
    for index in 0..state.figures.len() {
        resolve_collisions(index, screen, &mut state.figures, &mut state.basket);
    }
}

/// Resolve all collisions of the figure at `index`
///
/// Order: screen side walls, then the basket (catch, or its outer walls),
/// then the rim posts, then every other live figure. A collision between
/// two figures turns gravity back on for both.
pub fn resolve_collisions(
    index: usize,
    screen: Screen,
    figures: &mut [Figure],
    basket: &mut Basket,
) {
    {
        let figure = &mut figures[index];
        if !figure.is_alive() || !figure.kind.is_falling() {
            return;
        }

        resolve_side_wall(screen, figure);

        if !resolve_basket_catch(basket, figure) && !basket.is_figure_contained(figure.id) {
            resolve_outside_basket(&basket.body, figure);
        }

        if resolve_edge_posts(basket, figure) {
            figure.speed.set_gravity(true);
        }
    }

    for other in 0..figures.len() {
        if other == index || !figures[other].is_alive() {
            continue;
        }

        let (figure, other) = pair_mut(figures, index, other);
        if resolve_figure_pair(figure, other) {
            figure.speed.set_gravity(true);
            if other.kind.is_falling() {
                other.speed.set_gravity(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Scoreboard;
    use crate::sim::figure::{FigureKind, Side};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn screen() -> Screen {
        Screen::new(1080.0, 1920.0)
    }

    fn state() -> GameState {
        GameState::new(screen(), Tuning::default())
    }

    fn falling(kind: FigureKind, x: f32, y: f32, vx: f32, vy: f32) -> Figure {
        Figure::falling(0, kind, Vec2::new(x, y), 24.0, 1.0, Vec2::new(vx, vy))
    }

    #[test]
    fn test_ball_falls_into_basket_and_rests() {
        let mut state = state();
        let rect = state.basket.rect();
        let x = rect.center().x;
        let id = state.add_figure(falling(FigureKind::Ball, x, rect.top() - 200.0, 0.0, 2.0));
        let mut board = Scoreboard::default();

        for _ in 0..400 {
            tick(&mut state, screen(), &mut board);
        }

        assert!(state.basket.is_figure_contained(id));
        let figure = state.figure(id).unwrap();
        assert!((figure.pos.y - (rect.bottom() - figure.radius)).abs() < 1e-3);
        assert_eq!(figure.speed.y(), 0.0);
        assert_eq!(board, Scoreboard::default());
    }

    #[test]
    fn test_missed_ball_costs_one_life_and_is_removed() {
        let mut state = state();
        state.add_figure(falling(FigureKind::Ball, 60.0, 1800.0, 0.0, 10.0));
        let mut board = Scoreboard::default();

        for _ in 0..50 {
            tick(&mut state, screen(), &mut board);
        }

        assert_eq!(board.lives, crate::consts::START_LIVES - 1);
        assert!(state.figures.is_empty());
    }

    #[test]
    fn test_colliding_balls_bounce_and_regain_gravity() {
        let mut state = state();
        let a = state.add_figure(falling(FigureKind::Ball, 100.0, 200.0, 3.0, 0.0));
        let b = state.add_figure(falling(FigureKind::Ball, 150.0, 200.0, -3.0, 0.0));
        state.figures[0].speed.set_gravity(false);
        state.figures[1].speed.set_gravity(false);
        let mut board = Scoreboard::default();

        tick(&mut state, screen(), &mut board);

        let a = state.figure(a).unwrap();
        let b = state.figure(b).unwrap();
        assert!(a.speed.x() < 0.0);
        assert!(b.speed.x() > 0.0);
        assert!(a.speed.gravity && b.speed.gravity);
        assert!(a.pos.distance(b.pos) >= 48.0);
    }

    #[test]
    fn test_basket_catch_takes_priority_over_neighbour() {
        let mut state = state();
        let rect = state.basket.rect();
        let x = rect.center().x;
        // Lower ball straddles the opening, upper ball sits on top of it
        let low = state.add_figure(falling(FigureKind::Ball, x, rect.top() - 10.0, 0.0, 4.0));
        state.add_figure(falling(FigureKind::Ball, x, rect.top() - 50.0, 0.0, 4.0));

        resolve_figures(&mut state, screen());

        assert!(state.basket.is_figure_contained(low));
    }

    #[test]
    fn test_drag_then_double_tap_scores() {
        let mut state = state();
        let rect = state.basket.rect();
        let center = rect.center();
        let y = rect.bottom() - 30.0;
        let good = state.add_figure(falling(FigureKind::Ball, center.x - 40.0, y, 0.0, 0.0));
        let bad = state.add_figure(falling(FigureKind::BadBall, center.x + 40.0, y, 0.0, 0.0));
        state.basket.add_figure(good);
        state.basket.add_figure(bad);
        let mut board = Scoreboard::default();

        state.push_touch(TouchEvent::Down {
            x: center.x,
            y: center.y,
            at_ms: 0,
        });
        state.push_touch(TouchEvent::Move {
            x: center.x + 50.0,
            y: center.y,
            at_ms: 100,
        });
        state.push_touch(TouchEvent::Up {
            x: center.x + 50.0,
            y: center.y,
            at_ms: 120,
        });
        tick(&mut state, screen(), &mut board);

        assert!((state.basket.body.pos.x - (center.x + 40.0)).abs() < 1e-3);
        assert!(state.basket.is_figure_contained(good));
        assert!(state.basket.is_figure_contained(bad));
        assert!(!state.basket.body.touched);

        let tap = state.basket.body.pos;
        state.push_touch(TouchEvent::DoubleDown {
            x: tap.x,
            y: tap.y,
            at_ms: 400,
        });
        tick(&mut state, screen(), &mut board);

        assert_eq!(board.score, 5);
        assert!(state.figures.is_empty());
        assert_eq!(state.basket.caught().count(), 0);
    }

    #[test]
    fn test_ball_bounces_off_resting_basket_wall() {
        let mut state = state();
        let rect = state.basket.rect();
        let y = rect.center().y;
        let mut ball = falling(FigureKind::Ball, rect.left() - 20.0, y, 2.0, 0.0);
        ball.speed.set_gravity(false);
        let id = state.add_figure(ball);
        let mut board = Scoreboard::default();

        tick(&mut state, screen(), &mut board);

        let ball = state.figure(id).unwrap();
        assert_eq!(ball.pos.x, rect.left() - 24.0);
        assert_eq!(ball.speed.x(), -2.0);
        assert!(!state.basket.is_figure_contained(id));
    }

    #[test]
    fn test_held_basket_wall_does_not_push_with_old_drag_speed() {
        let mut state = state();
        let center = state.basket.rect().center();
        let mut board = Scoreboard::default();

        // 30 px in 16 ms saturates the drag speed
        state.push_touch(TouchEvent::Down {
            x: center.x,
            y: center.y,
            at_ms: 0,
        });
        state.push_touch(TouchEvent::Move {
            x: center.x + 30.0,
            y: center.y,
            at_ms: 16,
        });
        tick(&mut state, screen(), &mut board);
        for _ in 0..10 {
            tick(&mut state, screen(), &mut board);
        }
        assert!(state.basket.body.touched);
        let held_x = state.basket.body.pos.x;

        let rect = state.basket.rect();
        let y = rect.center().y;
        let mut ball = falling(FigureKind::Ball, rect.right() + 20.0, y, -1.0, 0.0);
        ball.speed.set_gravity(false);
        let id = state.add_figure(ball);

        tick(&mut state, screen(), &mut board);

        let ball = state.figure(id).unwrap();
        assert_eq!(state.basket.body.pos.x, held_x);
        assert_eq!(ball.pos.x, rect.right() + 24.0);
        assert_eq!(ball.speed.x(), 1.0);
    }

    #[test]
    fn test_ball_bounces_off_rim_post() {
        let mut state = state();
        let post = state.basket.edge(Side::Left).pos;
        // Falls onto the left post, just outside the opening
        let id = state.add_figure(falling(FigureKind::Ball, post.x, post.y - 30.0, 0.0, 3.0));
        let mut board = Scoreboard::default();

        tick(&mut state, screen(), &mut board);

        let ball = state.figure(id).unwrap();
        assert!(ball.speed.y() < 0.0);
        assert!(ball.speed.gravity);
        assert!(ball.pos.distance(post) >= 29.0);
        assert_eq!(state.basket.edge(Side::Left).pos, post);
        assert!(!state.basket.is_figure_contained(id));
    }

    #[test]
    fn test_dead_figures_are_skipped() {
        let mut figures = vec![
            falling(FigureKind::Ball, 100.0, 200.0, 3.0, 0.0),
            falling(FigureKind::Ball, 110.0, 200.0, 0.0, 0.0),
        ];
        figures[0].id = 1;
        figures[1].id = 2;
        figures[1].kill();
        let mut basket = Basket::new(Vec2::new(540.0, 1500.0), Tuning::default().basket);

        resolve_collisions(0, screen(), &mut figures, &mut basket);

        assert_eq!(figures[0].pos, Vec2::new(100.0, 200.0));
        assert_eq!(figures[1].pos, Vec2::new(110.0, 200.0));
    }
}
