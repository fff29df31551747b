//! Wacky Balls headless runner
//!
//! Plays a seeded game with a scripted player: the basket chases the lowest
//! falling ball and is emptied with a double tap whenever it holds something.
//!
//! Usage: `wacky-balls [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use glam::Vec2;
#[cfg(not(target_arch = "wasm32"))]
use wacky_balls::sim::{GameState, Screen, Spawner, TouchEvent, tick};
#[cfg(not(target_arch = "wasm32"))]
use wacky_balls::{HighScores, Scoreboard, Tuning};

/// Upper bound on simulated ticks (a little over 3 minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 12_000;
/// Milliseconds per tick at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const TICK_MS: u64 = 16;
/// Ticks between attempts to empty the basket
#[cfg(not(target_arch = "wasm32"))]
const EMPTY_INTERVAL: u64 = 300;

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };

    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(err) => {
                log::warn!("Invalid tuning file {}: {}; using defaults", path, err);
                Tuning::default()
            }
        },
        Err(err) => {
            log::warn!("Cannot read {}: {}; using defaults", path, err);
            Tuning::default()
        }
    }
}

/// Scripted player input for one tick
#[cfg(not(target_arch = "wasm32"))]
fn play(state: &mut GameState, at_ms: u64) {
    let basket = state.basket.rect();
    let Vec2 { x: cx, y: cy } = basket.center();

    let empty_now = state.time_ticks % EMPTY_INTERVAL == EMPTY_INTERVAL - 1;
    if empty_now && state.basket.caught().count() > 0 {
        state.push_touch(TouchEvent::DoubleDown {
            x: cx,
            y: cy,
            at_ms,
        });
        return;
    }

    // Chase the lowest ball that is still falling toward the basket
    let target = state
        .figures
        .iter()
        .filter(|f| f.is_alive() && f.pos.y < basket.top())
        .filter(|f| !state.basket.is_figure_contained(f.id))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|f| f.pos.x);

    match target {
        Some(x) => {
            if !state.basket.body.touched {
                state.push_touch(TouchEvent::Down {
                    x: cx,
                    y: cy,
                    at_ms,
                });
            }
            state.push_touch(TouchEvent::Move { x, y: cy, at_ms });
        }
        None if state.basket.body.touched => {
            state.push_touch(TouchEvent::Up {
                x: cx,
                y: cy,
                at_ms,
            });
        }
        None => {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let tuning = load_tuning(args.get(1).map(String::as_str));
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    log::info!("Wacky Balls (headless) starting, seed {}", seed);

    let screen = Screen::new(1080.0, 1920.0);
    let mut state = GameState::new(screen, tuning);
    let mut spawner = Spawner::new(seed, tuning.spawn);
    let mut board = Scoreboard::default();
    let interval = u64::from(tuning.spawn.interval_ticks.max(1));

    while state.time_ticks < MAX_TICKS && !board.is_over() {
        if state.time_ticks % interval == 0 {
            let figure = spawner.spawn(screen);
            state.add_figure(figure);
        }

        let at_ms = state.time_ticks * TICK_MS;
        play(&mut state, at_ms);
        tick(&mut state, screen, &mut board);
    }

    log::info!(
        "Game finished after {} ticks: score {}, lives {}, {} figures in play",
        state.time_ticks,
        board.score,
        board.lives,
        state.alive_count()
    );

    let mut highscores = HighScores::new();
    log::info!("Rank {}", highscores.potential_rank(board.score));
    highscores.save_score("runner", board.score);
    for entry in highscores.sorted() {
        log::debug!("{:>8} {}", entry.score, entry.name);
    }
    match highscores.to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => log::warn!("Cannot serialize high scores: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page on the web
}
