//! # hand_arcade
//!
//! Desktop runner for the gesture arcade.  A landmark source feeds the
//! [`gesture_core`] pipeline on a fixed-rate inference thread; the render
//! loop reads the latest snapshot and steps one of the [`arcade_games`]
//! engines into a minifb window.
//!
//! ## Games
//!
//! | Key | Game | Control |
//! |---|---|---|
//! | `F1` / `1` | Snake | index fingertip steers the head |
//! | `F2` / `2` | Fruit Ninja | fingertip slashes fruit |
//! | `F3` / `3` | Dino Run | pinch to jump |
//! | `F4` / `4` | Pong | hand height moves the left paddle |
//! | `F5` / `5` | Whiteboard | one finger draws, two erase, three change colour, pinky clears |
//! | `F6` / `6` | Presentation | one finger next, two previous, open palm pauses |
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Hand |
//! |---|---|
//! | mouse | index fingertip position (left button = one finger) |
//! | `A` `S` `D` `F` `G` `X` | one, two, three fingers, pinky, thumbs up, fist |
//! | `Space` | pinch |
//! | `H` | hide / show the hand |
//! | `R` | reset the active game |
//! | `U` | undo the last whiteboard stroke |
//! | `[` / `]` | smaller / larger whiteboard stroke |
//! | `Q` / `Escape` | quit |

pub mod arcade;
pub mod app;
pub mod config;
pub mod inference;
pub mod source;
pub mod visualizer;

pub use app::{run, AppState};
pub use arcade::{Arcade, GameKind};
pub use config::AppConfig;
pub use inference::{run_cycle, spawn_inference, InferenceHandle};
pub use source::{LandmarkSource, SimInput, SimLandmarkSource};
