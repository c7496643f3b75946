//! # arcade_games
//!
//! Hand-controlled games stepped once per rendered frame.
//!
//! Every engine is a plain struct driven through [`Game`]: it takes the
//! frame to draw on, its control signal and the current time, advances
//! exactly one tick, draws, and hands the frame back.  Engines hold no
//! locks and read no clocks; the caller serializes access and supplies
//! `now` in seconds.
//!
//! ## Control signals
//!
//! | Game | `Input` | Source |
//! |---|---|---|
//! | [`SnakeGame`] | `Option<(i32, i32)>` | index fingertip in pixels |
//! | [`FruitNinjaGame`] | `Option<(i32, i32)>` | index fingertip in pixels |
//! | [`DinoRunGame`] | `bool` | jump edge (pinch) |
//! | [`PongGame`] | `Option<f32>` | normalized hand y |
//! | [`Whiteboard`] | [`WhiteboardInput`] | whiteboard action + pen |
//! | [`Presentation`] | `GestureLabel` | stable gesture |
//!
//! ## Invariants
//!
//! * A zero-sized [`Canvas`] is returned unchanged and the game does not tick.
//! * Once a game is over its score, lives and physics are frozen until
//!   [`Game::reset`]; the frame is still drawn, with a GAME OVER overlay.
//! * Entities that leave the play area are pruned on the tick they leave.

use serde::Serialize;

pub mod error;
pub mod canvas;
pub mod snake;
pub mod fruit_ninja;
pub mod dino_run;
pub mod pong;
pub mod whiteboard;
pub mod presentation;

pub use canvas::{blend, colors, rgb, Canvas};
pub use dino_run::DinoRunGame;
pub use error::{GameError, Result};
pub use fruit_ninja::FruitNinjaGame;
pub use pong::PongGame;
pub use presentation::Presentation;
pub use snake::SnakeGame;
pub use whiteboard::{StrokeSizes, Whiteboard, WhiteboardInput};

// ════════════════════════════════════════════════════════════════════════════
// Game contract
// ════════════════════════════════════════════════════════════════════════════

/// Polled game state, serialized as `{score, gameOver, lives?, level?}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub score: u32,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lives: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

pub trait Game {
    type Input;

    fn name(&self) -> &'static str;

    /// Back to the starting state; safe at any time.
    fn reset(&mut self);

    /// Advance one tick and draw onto `frame`.
    fn update(&mut self, frame: Canvas, input: Self::Input, now: f64) -> Canvas;

    fn state(&self) -> GameSnapshot;
}

/// Dimmed backdrop with a centred GAME OVER banner.
pub(crate) fn draw_game_over(frame: &mut Canvas, subtitle: &str) {
    frame.overlay(colors::BLACK, 0.5);
    let cy = frame.height() as i32 / 2;
    frame.draw_text_centered("GAME OVER", cy - 20, 6, colors::RED);
    frame.draw_text_centered(subtitle, cy + 25, 2, colors::WHITE);
}
