//! Simulation module
//!
//! All gameplay physics lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick = update every figure, then resolve every figure
//! - Touch input arrives through a queue drained at the start of a tick
//! - Stable iteration order (by figure ID)

pub mod basket;
pub mod collision;
pub mod figure;
pub mod input;
pub mod spawn;
pub mod speed;
pub mod state;
pub mod tick;

pub use basket::{Basket, Member};
pub use collision::{
    CollisionResult, circle_contact, circle_rect_contact, reflect_velocity, resolve_basket_catch,
    resolve_edge_posts, resolve_figure_pair, resolve_outside_basket, resolve_side_wall,
};
pub use figure::{Figure, FigureId, FigureKind, FigureState, Rect, Role, Side};
pub use input::{TouchEvent, TouchQueue};
pub use spawn::Spawner;
pub use speed::Speed;
pub use state::{GameState, Screen};
pub use tick::{apply_touch, resolve_collisions, resolve_figures, tick, update_figures};
