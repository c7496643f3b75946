//! Whiteboard mode: stable gesture → semantic action.
//!
//! Draw and erase are level-triggered (held gesture keeps acting).  Colour
//! change and clear are rate-limited, each by its own timer.  A suppressed
//! call does not restart the timer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::GestureLabel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhiteboardAction {
    #[default]
    None,
    Draw,
    Erase,
    ColorChange,
    ClearCanvas,
}

impl WhiteboardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WhiteboardAction::None        => "none",
            WhiteboardAction::Draw        => "draw",
            WhiteboardAction::Erase       => "erase",
            WhiteboardAction::ColorChange => "color_change",
            WhiteboardAction::ClearCanvas => "clear_canvas",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFilterConfig {
    /// Minimum seconds between colour changes.
    pub debounce_time: f64,
    /// Minimum seconds between canvas clears.
    pub clear_cooldown: f64,
}

impl Default for ModeFilterConfig {
    fn default() -> Self {
        ModeFilterConfig { debounce_time: 0.3, clear_cooldown: 0.3 }
    }
}

#[derive(Clone, Debug)]
pub struct ModeGestureFilter {
    config:            ModeFilterConfig,
    last_color_change: Option<f64>,
    last_clear:        Option<f64>,
}

impl ModeGestureFilter {
    pub fn new(config: ModeFilterConfig) -> Self {
        ModeGestureFilter { config, last_color_change: None, last_clear: None }
    }

    pub fn filter(&mut self, gesture: GestureLabel, now: f64) -> WhiteboardAction {
        match gesture {
            GestureLabel::OneFingerUp => WhiteboardAction::Draw,
            GestureLabel::TwoFingersUp => WhiteboardAction::Erase,
            GestureLabel::ThreeFingersUp => {
                if Self::elapsed(self.last_color_change, now, self.config.debounce_time) {
                    self.last_color_change = Some(now);
                    WhiteboardAction::ColorChange
                } else {
                    WhiteboardAction::None
                }
            }
            GestureLabel::PinkyFingerUp => {
                if Self::elapsed(self.last_clear, now, self.config.clear_cooldown) {
                    self.last_clear = Some(now);
                    WhiteboardAction::ClearCanvas
                } else {
                    debug!("clear suppressed, cooldown active");
                    WhiteboardAction::None
                }
            }
            // open palm and fist are explicitly ignored
            _ => WhiteboardAction::None,
        }
    }

    fn elapsed(last: Option<f64>, now: f64, min: f64) -> bool {
        last.map_or(true, |t| now - t >= min)
    }

    pub fn reset(&mut self) {
        self.last_color_change = None;
        self.last_clear = None;
    }
}

impl Default for ModeGestureFilter {
    fn default() -> Self { ModeGestureFilter::new(ModeFilterConfig::default()) }
}
