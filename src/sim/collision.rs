//! Collision detection and response between figures
//!
//! All resolvers are free functions: they hold no state and only mutate the
//! figures (and basket) handed to them. Immovable figures take part through
//! a zero inverse mass, which is the infinite-mass limit of the elastic
//! response.

use glam::Vec2;

use super::basket::Basket;
use super::figure::{Figure, Rect};
use super::speed::Speed;
use super::state::Screen;
use crate::consts::SEPARATION_SLOP;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal pointing from the first shape toward the second
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Overlap test between two circles. Touching circles count as a hit.
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = b_pos - a_pos;
    let dist = delta.length();
    let reach = a_radius + b_radius;

    if dist > reach {
        return CollisionResult::miss();
    }

    // Coincident centers: pick a fixed axis so the pair still separates
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };

    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Overlap test between a rectangle and a circle; the normal points from the
/// rectangle toward the circle center.
pub fn circle_rect_contact(rect: &Rect, center: Vec2, radius: f32) -> CollisionResult {
    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist = delta.length();

    if dist >= radius {
        return CollisionResult::miss();
    }

    if dist > f32::EPSILON {
        return CollisionResult {
            hit: true,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Center inside the rectangle: leave through the nearest side
    let exits = [
        (center.x - rect.left(), Vec2::NEG_X),
        (rect.right() - center.x, Vec2::X),
        (center.y - rect.top(), Vec2::NEG_Y),
        (rect.bottom() - center.y, Vec2::Y),
    ];
    let (depth, normal) = exits
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::Y));

    CollisionResult {
        hit: true,
        normal,
        penetration: depth + radius,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect a speed off a wall with outward normal `normal`, moving at `wall_vel`.
/// The result never moves into the wall slower than the wall itself.
fn bounce_off(speed: &mut Speed, normal: Vec2, wall_vel: Vec2) {
    if speed.vel.dot(normal) < 0.0 {
        speed.vel = reflect_velocity(speed.vel, normal);
    }

    let wall_along = wall_vel.dot(normal);
    let along = speed.vel.dot(normal);
    if wall_along > along {
        speed.vel += normal * (wall_along - along);
    }
}

/// Keep a figure between the left and right screen edges
///
/// Top and bottom are not handled here: falling off the bottom is the
/// figure's own death check.
pub fn resolve_side_wall(screen: Screen, figure: &mut Figure) -> bool {
    if figure.pos.x - figure.radius < 0.0 {
        figure.pos.x = figure.radius;
        bounce_off(&mut figure.speed, Vec2::X, Vec2::ZERO);
        true
    } else if figure.pos.x + figure.radius > screen.width {
        figure.pos.x = screen.width - figure.radius;
        bounce_off(&mut figure.speed, Vec2::NEG_X, Vec2::ZERO);
        true
    } else {
        false
    }
}

/// Elastic collision between two circles
///
/// Velocity along the line of centers is exchanged in proportion to inverse
/// mass (only while the circles approach each other), then the pair is
/// pushed apart so no overlap remains. Returns whether the circles
/// overlapped.
pub fn resolve_figure_pair(a: &mut Figure, b: &mut Figure) -> bool {
    let contact = circle_contact(a.pos, a.radius, b.pos, b.radius);
    if !contact.hit {
        return false;
    }

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        // Two immovable bodies
        return true;
    }

    let normal = contact.normal;

    // Positive when the figures approach each other
    let closing = (a.speed.vel - b.speed.vel).dot(normal);
    if closing > 0.0 {
        // Restitution 1: j = (1 + e) * closing / (1/ma + 1/mb)
        let impulse = 2.0 * closing / inv_sum;
        a.speed.vel -= normal * (impulse * inv_a);
        b.speed.vel += normal * (impulse * inv_b);
    }

    let push = contact.penetration + SEPARATION_SLOP;
    a.pos -= normal * (push * inv_a / inv_sum);
    b.pos += normal * (push * inv_b / inv_sum);

    true
}

/// Catch a falling figure entering the basket's top opening
///
/// On the first overlap the figure stops falling (vertical speed zeroed) and
/// joins the basket; its horizontal speed is left alone. Figures already in
/// the basket are kept on its floor and between its inner walls instead.
/// Returns true only for a new catch.
pub fn resolve_basket_catch(basket: &mut Basket, figure: &mut Figure) -> bool {
    if !figure.is_alive() || !figure.kind.is_falling() {
        return false;
    }

    let rect = basket.rect();

    if basket.is_figure_contained(figure.id) {
        settle_inside(&rect, figure);
        return false;
    }

    let in_opening = figure.pos.x > rect.left() && figure.pos.x < rect.right();
    let straddles_top =
        figure.pos.y + figure.radius >= rect.top() && figure.pos.y - figure.radius <= rect.top();
    if !in_opening || !straddles_top || figure.speed.y() < 0.0 {
        return false;
    }

    figure.speed.vel.y = 0.0;
    basket.add_figure(figure.id)
}

/// Keep a contained figure on the basket floor and inside its side walls
fn settle_inside(rect: &Rect, figure: &mut Figure) {
    if figure.pos.y + figure.radius > rect.bottom() {
        figure.pos.y = rect.bottom() - figure.radius;
        figure.speed.vel.y = 0.0;
        // Resting: gravity comes back with the next collision or on eviction
        figure.speed.set_gravity(false);
    }

    if figure.pos.x - figure.radius < rect.left() {
        figure.pos.x = rect.left() + figure.radius;
        bounce_off(&mut figure.speed, Vec2::X, Vec2::ZERO);
    } else if figure.pos.x + figure.radius > rect.right() {
        figure.pos.x = rect.right() - figure.radius;
        bounce_off(&mut figure.speed, Vec2::NEG_X, Vec2::ZERO);
    }
}

/// Bounce a figure that is not in the basket off the basket's outer walls
///
/// Only the part of the basket below its opening acts as a wall; the rim is
/// covered by the edge posts and the opening by [`resolve_basket_catch`].
/// The figure leaves through the nearer side with its horizontal speed
/// reflected, and at least as fast as the basket is being dragged into it.
pub fn resolve_outside_basket(basket: &Figure, figure: &mut Figure) -> bool {
    let rect = basket.bounds();
    if figure.pos.y < rect.top() {
        return false;
    }

    if !circle_rect_contact(&rect, figure.pos, figure.radius).hit {
        return false;
    }

    let normal = if figure.pos.x < rect.center().x {
        figure.pos.x = rect.left() - figure.radius;
        Vec2::NEG_X
    } else {
        figure.pos.x = rect.right() + figure.radius;
        Vec2::X
    };
    bounce_off(&mut figure.speed, normal, basket.speed.vel);

    true
}

/// Collide a figure with both basket rim posts
pub fn resolve_edge_posts(basket: &mut Basket, figure: &mut Figure) -> bool {
    let mut hit = false;
    for edge in basket.edges_mut() {
        hit |= resolve_figure_pair(edge, figure);
    }
    hit
}
