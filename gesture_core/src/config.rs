//! Pipeline configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::debounce::DebounceConfig;
use crate::error::{CoreError, Result};
use crate::mode_filter::ModeFilterConfig;
use crate::pen::PenConfig;
use crate::presentation::PresentationConfig;
use crate::trigger::PinchConfig;

/// Which edge detector produces the jump trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpSource {
    #[default]
    Pinch,
    /// Fist followed by open palm.
    Transition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub debounce:    DebounceConfig,
    pub pinch:       PinchConfig,
    pub transition_cooldown: f64,
    pub mode_filter: ModeFilterConfig,
    /// Read by the presentation engine, not by the pipeline itself.
    pub presentation: PresentationConfig,
    pub pen:         PenConfig,
    pub jump_source: JumpSource,
    /// Published gesture is cleared after this many seconds without a hand.
    pub gesture_clear_timeout: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            debounce:    DebounceConfig::default(),
            pinch:       PinchConfig { threshold: 0.05, cooldown: 0.5 },
            transition_cooldown: 0.4,
            mode_filter: ModeFilterConfig::default(),
            presentation: PresentationConfig::default(),
            pen:         PenConfig::pipeline(),
            jump_source: JumpSource::Pinch,
            gesture_clear_timeout: 1.0,
        }
    }
}

impl PipelineConfig {
    /// Reject negative or non-finite durations and out-of-range factors.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("debounce.stability_time",    self.debounce.stability_time),
            ("debounce.hand_loss_timeout", self.debounce.hand_loss_timeout),
            ("pinch.cooldown",             self.pinch.cooldown),
            ("transition_cooldown",        self.transition_cooldown),
            ("mode_filter.debounce_time",  self.mode_filter.debounce_time),
            ("mode_filter.clear_cooldown", self.mode_filter.clear_cooldown),
            ("presentation.cooldown",      self.presentation.cooldown),
            ("gesture_clear_timeout",      self.gesture_clear_timeout),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{} must be a non-negative number of seconds, got {}", name, value
                )));
            }
        }

        if !(self.pinch.threshold > 0.0 && self.pinch.threshold.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "pinch.threshold must be positive, got {}", self.pinch.threshold
            )));
        }
        if !(self.pen.alpha > 0.0 && self.pen.alpha <= 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "pen.alpha must be in (0, 1], got {}", self.pen.alpha
            )));
        }
        if !(self.pen.min_movement >= 0.0 && self.pen.min_movement.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "pen.min_movement must be non-negative, got {}", self.pen.min_movement
            )));
        }
        if !(self.pen.max_velocity > self.pen.min_movement && self.pen.max_velocity.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "pen.max_velocity must exceed pen.min_movement, got {}", self.pen.max_velocity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_use_pipeline_wiring() {
        let c = PipelineConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.pinch.cooldown, 0.5);
        assert_eq!(c.pen.min_movement, 0.005);
        assert_eq!(c.pen.max_velocity, 0.08);
        assert_eq!(c.presentation.cooldown, 1.2);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: PipelineConfig = serde_json::from_str(
            r#"{ "jump_source": "transition", "pinch": { "threshold": 0.04 } }"#,
        ).unwrap();
        assert_eq!(c.jump_source, JumpSource::Transition);
        assert_eq!(c.pinch.threshold, 0.04);
        // Field-level default comes from PinchConfig, not the pipeline wiring.
        assert_eq!(c.pinch.cooldown, 0.3);
        assert_eq!(c.debounce.stability_time, 0.15);
    }

    #[test]
    fn negative_duration_rejected() {
        let mut c = PipelineConfig::default();
        c.debounce.stability_time = -0.1;
        assert!(matches!(c.validate(), Err(CoreError::InvalidConfig(_))));

        let mut c = PipelineConfig::default();
        c.presentation.cooldown = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn bad_alpha_rejected() {
        let mut c = PipelineConfig::default();
        c.pen.alpha = 0.0;
        assert!(c.validate().is_err());
    }
}
