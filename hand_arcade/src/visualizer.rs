//! Window, keyboard/mouse simulation and frame presentation via `minifb`.
//!
//! The mouse is the index fingertip.  Held keys pick the hand pose; with no
//! pose key held the hand is an open palm, which every game reads as "no
//! gesture".
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                                                          │
//! │                  active game canvas                      │
//! │                                                          │
//! ├──────────────────────────────────────────────────────────┤
//! │ status bar: game │ gesture │ score                       │
//! │ key legend                                               │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::{anyhow, Result};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::debug;

use arcade_games::Canvas;
use gesture_core::SyntheticPose;

use crate::arcade::GameKind;
use crate::source::SimInput;

/// Held-key poses, highest priority first.
const POSE_KEYS: [(Key, SyntheticPose); 7] = [
    (Key::Space, SyntheticPose::Pinch),
    (Key::A,     SyntheticPose::OneFinger),
    (Key::S,     SyntheticPose::TwoFingers),
    (Key::D,     SyntheticPose::ThreeFingers),
    (Key::F,     SyntheticPose::Pinky),
    (Key::G,     SyntheticPose::ThumbsUp),
    (Key::X,     SyntheticPose::Fist),
];

const GAME_KEYS: [(Key, Key); 6] = [
    (Key::F1, Key::Key1),
    (Key::F2, Key::Key2),
    (Key::F3, Key::Key3),
    (Key::F4, Key::Key4),
    (Key::F5, Key::Key5),
    (Key::F6, Key::Key6),
];

pub const KEY_LEGEND: &str =
    "F1-F6 GAME  MOUSE TIP  A/S/D/F/G/X POSE  SPACE PINCH  H HAND  R RESET  U UNDO  [ ] SIZE  Q QUIT";

/// Window requests that the app, not the hand simulation, handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    SelectGame(GameKind),
    Reset,
    Undo,
    StrokeSize { larger: bool },
}

/// Pose for the current keyboard/mouse state.
pub fn held_pose(is_down: impl Fn(Key) -> bool, mouse_down: bool) -> SyntheticPose {
    POSE_KEYS
        .iter()
        .find(|(k, _)| is_down(*k))
        .map(|&(_, p)| p)
        .unwrap_or(if mouse_down { SyntheticPose::OneFinger } else { SyntheticPose::OpenPalm })
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:       Window,
    width:        usize,
    height:       usize,
    sim_tx:       Sender<SimInput>,

    // Last values sent, so only changes go over the channel.
    pose:         Option<SyntheticPose>,
    pointer:      Option<(f32, f32)>,
    hand_visible: bool,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self> {
        let mut window = Window::new(
            "Hand Arcade",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("opening window: {}", e))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            width,
            height,
            sim_tx,
            pose:         None,
            pointer:      None,
            hand_visible: true,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Forward hand input to the landmark source and return app requests.
    pub fn poll_input(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() {
            events.push(UiEvent::Quit);
            return events;
        }

        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if pressed(Key::Q) || pressed(Key::Escape) {
            let _ = self.sim_tx.send(SimInput::Quit);
            events.push(UiEvent::Quit);
            return events;
        }
        for (slot, &(fkey, digit)) in GAME_KEYS.iter().enumerate() {
            if pressed(fkey) || pressed(digit) {
                if let Some(kind) = GameKind::from_slot(slot) {
                    events.push(UiEvent::SelectGame(kind));
                }
            }
        }
        if pressed(Key::R) { events.push(UiEvent::Reset); }
        if pressed(Key::U) { events.push(UiEvent::Undo); }
        if pressed(Key::LeftBracket)  { events.push(UiEvent::StrokeSize { larger: false }); }
        if pressed(Key::RightBracket) { events.push(UiEvent::StrokeSize { larger: true }); }
        let toggle_hand = pressed(Key::H);

        if toggle_hand {
            self.hand_visible = !self.hand_visible;
            let _ = self.sim_tx.send(SimInput::HandVisible(self.hand_visible));
        }

        let mouse_down = self.window.get_mouse_down(MouseButton::Left);
        let pose = held_pose(|k| self.window.is_key_down(k), mouse_down);
        if self.pose != Some(pose) {
            debug!("pose key: {}", pose.name());
            self.pose = Some(pose);
            let _ = self.sim_tx.send(SimInput::Pose(pose));
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let p = (mx / self.width as f32, my / self.height as f32);
            if self.pointer != Some(p) {
                self.pointer = Some(p);
                let _ = self.sim_tx.send(SimInput::Pointer { x: p.0, y: p.1 });
            }
        }

        events
    }

    pub fn present(&mut self, frame: &Canvas) -> Result<()> {
        self.window
            .update_with_buffer(frame.pixels(), frame.width(), frame.height())
            .map_err(|e| anyhow!("presenting frame: {}", e))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_is_an_open_palm() {
        assert_eq!(held_pose(|_| false, false), SyntheticPose::OpenPalm);
        assert_eq!(held_pose(|_| false, true), SyntheticPose::OneFinger);
    }

    #[test]
    fn pinch_wins_over_other_held_keys() {
        let down = |k: Key| k == Key::Space || k == Key::X;
        assert_eq!(held_pose(down, true), SyntheticPose::Pinch);
        assert_eq!(held_pose(|k| k == Key::X, true), SyntheticPose::Fist);
    }

    #[test]
    fn every_pose_but_open_palm_has_a_key() {
        for pose in SyntheticPose::ALL {
            let mapped = POSE_KEYS.iter().any(|&(_, p)| p == pose);
            assert_eq!(mapped, pose != SyntheticPose::OpenPalm, "{}", pose.name());
        }
    }

    #[test]
    fn game_keys_cover_every_game() {
        assert_eq!(GAME_KEYS.len(), GameKind::ALL.len());
    }
}
