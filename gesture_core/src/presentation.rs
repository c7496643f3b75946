//! Presentation mode: stable gesture → slide navigation.
//!
//! One finger advances, two fingers go back, an open palm pauses or
//! resumes.  Navigation fires only when the gesture differs from the last
//! one that acted *and* the cooldown has passed, so a held gesture moves a
//! single slide.  The toggle fires on a change *or* after the cooldown, so
//! a held palm can resume what it paused.  While paused only the toggle is
//! accepted.  `None`/`Unknown` re-arm the change check.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::GestureLabel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationAction {
    #[default]
    None,
    Next,
    Prev,
    Toggle,
}

impl PresentationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PresentationAction::None   => "none",
            PresentationAction::Next   => "next",
            PresentationAction::Prev   => "prev",
            PresentationAction::Toggle => "toggle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Seconds that must pass between two actions.
    pub cooldown: f64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        PresentationConfig { cooldown: 1.2 }
    }
}

#[derive(Clone, Debug)]
pub struct PresentationFilter {
    config:       PresentationConfig,
    active:       bool,
    last_gesture: Option<GestureLabel>,
    last_time:    Option<f64>,
}

impl PresentationFilter {
    /// Starts running (not paused).
    pub fn new(config: PresentationConfig) -> Self {
        PresentationFilter { config, active: true, last_gesture: None, last_time: None }
    }

    /// False while paused.
    pub fn is_active(&self) -> bool { self.active }

    pub fn filter(&mut self, gesture: GestureLabel, now: f64) -> PresentationAction {
        let rearm = matches!(gesture, GestureLabel::None | GestureLabel::Unknown);

        if !self.active && gesture != GestureLabel::OpenPalm {
            if rearm {
                self.last_gesture = None;
            }
            return PresentationAction::None;
        }

        let changed = self.last_gesture != Some(gesture);
        let cooled = self.last_time.map_or(true, |t| now - t > self.config.cooldown);

        let action = match gesture {
            GestureLabel::OneFingerUp if changed && cooled => PresentationAction::Next,
            GestureLabel::TwoFingersUp if changed && cooled => PresentationAction::Prev,
            GestureLabel::OpenPalm if changed || cooled => {
                self.active = !self.active;
                debug!("presentation {}", if self.active { "resumed" } else { "paused" });
                PresentationAction::Toggle
            }
            _ => PresentationAction::None,
        };
        if action != PresentationAction::None {
            self.last_gesture = Some(gesture);
            self.last_time = Some(now);
        }
        if rearm {
            self.last_gesture = None;
        }
        action
    }

    pub fn reset(&mut self) {
        self.active = true;
        self.last_gesture = None;
        self.last_time = None;
    }
}

impl Default for PresentationFilter {
    fn default() -> Self { PresentationFilter::new(PresentationConfig::default()) }
}
