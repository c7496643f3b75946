//! Dwell-time debouncing of raw gesture labels.
//!
//! A candidate label must be seen continuously for `stability_time` before it
//! replaces the stable label.  Hand absence (`None`) for longer than
//! `hand_loss_timeout` since the last accepted change forces the stable
//! label back to `None`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::GestureLabel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Seconds a candidate must persist before it becomes stable.
    pub stability_time: f64,
    /// Seconds of `None` after the last accepted change before clearing.
    pub hand_loss_timeout: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        DebounceConfig { stability_time: 0.15, hand_loss_timeout: 1.0 }
    }
}

/// Debounced gesture state machine.
#[derive(Clone, Debug)]
pub struct GestureDebouncer {
    config:          DebounceConfig,
    candidate:       GestureLabel,
    candidate_since: Option<f64>,
    stable:          GestureLabel,
    last_update:     f64,
}

impl GestureDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        GestureDebouncer {
            config,
            candidate:       GestureLabel::None,
            candidate_since: None,
            stable:          GestureLabel::None,
            last_update:     0.0,
        }
    }

    /// Feed one raw label observed at `now`; returns the stable label.
    pub fn update(&mut self, raw: GestureLabel, now: f64) -> GestureLabel {
        if raw == self.candidate {
            if let Some(since) = self.candidate_since {
                if now - since >= self.config.stability_time {
                    if self.stable != raw {
                        debug!("stable gesture {} -> {}", self.stable, raw);
                    }
                    self.stable = raw;
                    self.last_update = now;
                }
            }
        } else {
            self.candidate = raw;
            self.candidate_since = Some(now);
        }

        if raw.is_none() && now - self.last_update > self.config.hand_loss_timeout {
            self.stable = GestureLabel::None;
        }

        self.stable
    }

    pub fn stable(&self) -> GestureLabel { self.stable }
    pub fn candidate(&self) -> GestureLabel { self.candidate }
    pub fn last_update(&self) -> f64 { self.last_update }

    pub fn reset(&mut self) {
        *self = GestureDebouncer::new(self.config.clone());
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self { GestureDebouncer::new(DebounceConfig::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_dwell_never_promotes() {
        let mut d = GestureDebouncer::default();
        for i in 0..14 {
            let t = 10.0 + i as f64 * 0.01; // 0.13 s of fist
            assert_eq!(d.update(GestureLabel::Fist, t), GestureLabel::None);
        }
    }

    #[test]
    fn promotes_once_dwell_is_reached() {
        let mut d = GestureDebouncer::default();
        assert_eq!(d.update(GestureLabel::Fist, 10.0), GestureLabel::None);
        assert_eq!(d.update(GestureLabel::Fist, 10.1), GestureLabel::None);
        assert_eq!(d.update(GestureLabel::Fist, 10.15), GestureLabel::Fist);
        assert_eq!(d.last_update(), 10.15);
    }

    #[test]
    fn new_candidate_restarts_timer_and_keeps_stable() {
        let mut d = GestureDebouncer::default();
        d.update(GestureLabel::Fist, 1.0);
        d.update(GestureLabel::Fist, 1.2);
        assert_eq!(d.update(GestureLabel::OpenPalm, 1.25), GestureLabel::Fist);
        assert_eq!(d.update(GestureLabel::OpenPalm, 1.35), GestureLabel::Fist);
        assert_eq!(d.update(GestureLabel::OpenPalm, 1.41), GestureLabel::OpenPalm);
    }

    #[test]
    fn hand_loss_clears_after_timeout() {
        let mut d = GestureDebouncer::default();
        d.update(GestureLabel::Fist, 1.0);
        d.update(GestureLabel::Fist, 1.2);
        // An intervening candidate that never stabilizes.
        d.update(GestureLabel::OpenPalm, 1.3);
        // Last accepted change was at 1.2; dwell alone would need 0.15 s.
        assert_eq!(d.update(GestureLabel::None, 2.19), GestureLabel::Fist);
        assert_eq!(d.update(GestureLabel::None, 2.25), GestureLabel::None);
    }
}
