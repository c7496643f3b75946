//! Edge-triggered one-shot detectors with cooldown.
//!
//! Both detectors here reduce to the same machine: fire on an
//! inactive → active edge, but only if more than `cooldown` seconds have
//! passed since the previous fire.  [`EdgeTrigger`] is that machine;
//! [`TransitionDetector`] feeds it gesture-pair transitions and
//! [`PinchDetector`] feeds it thumb/index proximity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::GestureLabel;
use crate::landmark::HandFrame;

// ════════════════════════════════════════════════════════════════════════════
// EdgeTrigger
// ════════════════════════════════════════════════════════════════════════════

/// Rising-edge detector gated by a cooldown.
#[derive(Clone, Debug)]
pub struct EdgeTrigger {
    cooldown:   f64,
    was_active: bool,
    last_fire:  Option<f64>,
}

impl EdgeTrigger {
    pub fn new(cooldown: f64) -> Self {
        EdgeTrigger { cooldown, was_active: false, last_fire: None }
    }

    /// Observe the level at `now`; returns true on a fire.
    pub fn update(&mut self, active: bool, now: f64) -> bool {
        let cooled = self.last_fire.map_or(true, |t| now - t > self.cooldown);
        let fired = active && !self.was_active && cooled;
        if fired {
            self.last_fire = Some(now);
        }
        self.was_active = active;
        fired
    }

    /// Forget the held level (cooldown history is kept).
    pub fn release(&mut self) {
        self.was_active = false;
    }

    pub fn was_active(&self) -> bool { self.was_active }
    pub fn last_fire(&self) -> Option<f64> { self.last_fire }
}

// ════════════════════════════════════════════════════════════════════════════
// TransitionDetector — fist → open palm
// ════════════════════════════════════════════════════════════════════════════

/// Fires when the stable gesture goes from `from` to `to`.
#[derive(Clone, Debug)]
pub struct TransitionDetector {
    from:     GestureLabel,
    to:       GestureLabel,
    previous: GestureLabel,
    trigger:  EdgeTrigger,
}

impl TransitionDetector {
    pub fn new(from: GestureLabel, to: GestureLabel, cooldown: f64) -> Self {
        TransitionDetector {
            from,
            to,
            previous: GestureLabel::None,
            trigger:  EdgeTrigger::new(cooldown),
        }
    }

    /// The jump detector: fist then open palm, 0.4 s cooldown.
    pub fn fist_to_open_palm(cooldown: f64) -> Self {
        TransitionDetector::new(GestureLabel::Fist, GestureLabel::OpenPalm, cooldown)
    }

    pub fn detect(&mut self, current: GestureLabel, now: f64) -> bool {
        let edge = self.previous == self.from && current == self.to;
        self.previous = current;
        self.trigger.update(edge, now)
    }
}

impl Default for TransitionDetector {
    fn default() -> Self { TransitionDetector::fist_to_open_palm(0.4) }
}

// ════════════════════════════════════════════════════════════════════════════
// PinchDetector — thumb tip to index tip
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Normalized 3-D distance below which the hand counts as pinched.
    pub threshold: f32,
    /// Seconds between fires.
    pub cooldown: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        PinchConfig { threshold: 0.05, cooldown: 0.3 }
    }
}

/// Fires once per not-pinched → pinched edge.
#[derive(Clone, Debug)]
pub struct PinchDetector {
    threshold:     f32,
    trigger:       EdgeTrigger,
    last_distance: Option<f32>,
}

impl PinchDetector {
    pub fn new(config: &PinchConfig) -> Self {
        PinchDetector {
            threshold:     config.threshold,
            trigger:       EdgeTrigger::new(config.cooldown),
            last_distance: None,
        }
    }

    /// Observe one frame.  `None` (no hand) clears the pinched state so a
    /// reappearing hand cannot fire from stale history.
    pub fn detect(&mut self, hand: Option<&HandFrame>, now: f64) -> bool {
        self.detect_distance(hand.map(HandFrame::pinch_distance), now)
    }

    pub fn detect_distance(&mut self, distance: Option<f32>, now: f64) -> bool {
        self.last_distance = distance;
        let Some(d) = distance else {
            self.trigger.release();
            return false;
        };
        let fired = self.trigger.update(d < self.threshold, now);
        if fired {
            debug!("pinch fired at distance {:.4}", d);
        }
        fired
    }

    pub fn is_pinched(&self) -> bool { self.trigger.was_active() }
    pub fn last_distance(&self) -> Option<f32> { self.last_distance }
}

impl Default for PinchDetector {
    fn default() -> Self { PinchDetector::new(&PinchConfig::default()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{HandPoint, Landmark, LANDMARK_COUNT};

    fn hand_with_pinch(d: f32) -> HandFrame {
        let mut pts = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        pts[HandPoint::IndexTip.index()] = Landmark::new(0.5 + d, 0.5, 0.0);
        HandFrame::new(pts).unwrap()
    }

    #[test]
    fn pinch_fires_only_on_rising_edge() {
        let mut p = PinchDetector::new(&PinchConfig { threshold: 0.05, cooldown: 0.0 });
        let fires: Vec<bool> = [0.2, 0.2, 0.01, 0.01, 0.2]
            .iter()
            .enumerate()
            .map(|(i, &d)| p.detect(Some(&hand_with_pinch(d)), i as f64 * 0.05))
            .collect();
        assert_eq!(fires, vec![false, false, true, false, false]);
    }

    #[test]
    fn pinch_cooldown_blocks_quick_refire() {
        let mut p = PinchDetector::new(&PinchConfig { threshold: 0.05, cooldown: 0.5 });
        assert!(p.detect_distance(Some(0.01), 1.0));
        assert!(!p.detect_distance(Some(0.2), 1.1));
        assert!(!p.detect_distance(Some(0.01), 1.2));
        assert!(!p.detect_distance(Some(0.2), 1.3));
        assert!(p.detect_distance(Some(0.01), 1.6));
    }

    #[test]
    fn missing_hand_resets_pinched_state() {
        let mut p = PinchDetector::new(&PinchConfig { threshold: 0.05, cooldown: 0.0 });
        assert!(p.detect_distance(Some(0.01), 1.0));
        assert!(p.is_pinched());
        assert!(!p.detect(None, 1.1));
        assert!(!p.is_pinched());
        // Hand reappears already pinched: that is a fresh edge.
        assert!(p.detect_distance(Some(0.01), 1.2));
    }

    #[test]
    fn transition_fires_on_fist_then_palm() {
        let mut t = TransitionDetector::default();
        assert!(!t.detect(GestureLabel::Fist, 1.0));
        assert!(t.detect(GestureLabel::OpenPalm, 1.1));
        assert!(!t.detect(GestureLabel::OpenPalm, 1.2));
        // Within cooldown: recorded, but no fire.
        assert!(!t.detect(GestureLabel::Fist, 1.3));
        assert!(!t.detect(GestureLabel::OpenPalm, 1.4));
        assert!(!t.detect(GestureLabel::Fist, 1.6));
        assert!(t.detect(GestureLabel::OpenPalm, 1.7));
    }

    #[test]
    fn transition_ignores_other_orders() {
        let mut t = TransitionDetector::default();
        assert!(!t.detect(GestureLabel::OpenPalm, 1.0));
        assert!(!t.detect(GestureLabel::Fist, 1.1));
        assert!(!t.detect(GestureLabel::ThumbsUp, 1.2));
        assert!(!t.detect(GestureLabel::OpenPalm, 1.3));
    }
}
