//! One inference cycle: landmarks in, published gesture snapshot out.
//!
//! ```text
//! HandFrame ─► classify ─► debounce ─┬─► mode filter ─► pen stabilizer
//!                                    └─► transition ┐
//!           ─────────────────────────────► pinch ───┴─► jump trigger
//! ```
//!
//! The pipeline owns every stateful stage and is driven by a single
//! thread.  Its output, [`GestureSnapshot`], is plain data meant to be
//! handed to [`crate::shared::GesturePublisher::publish`].

use serde::Serialize;
use tracing::{debug, trace};

use crate::classifier::{classify, GestureLabel};
use crate::config::{JumpSource, PipelineConfig};
use crate::debounce::GestureDebouncer;
use crate::error::Result;
use crate::landmark::HandFrame;
use crate::mode_filter::{ModeGestureFilter, WhiteboardAction};
use crate::pen::PenStabilizer;
use crate::trigger::{PinchDetector, TransitionDetector};

// ════════════════════════════════════════════════════════════════════════════
// Snapshot
// ════════════════════════════════════════════════════════════════════════════

/// Index fingertip in normalized frame coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct HandPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visible: bool,
}

/// Stabilized pen; falls back to the raw fingertip while the pen is up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PenPosition {
    pub x: f32,
    pub y: f32,
    pub pen_down: bool,
}

/// Everything consumers read about the hand after one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GestureSnapshot {
    /// Incremented once per processed cycle.
    pub sequence: u64,
    pub gesture: GestureLabel,
    /// `now` of the last cycle that saw a hand.
    pub gesture_time: f64,
    pub hand: HandPosition,
    pub pen: PenPosition,
    /// True only on the cycle the jump edge fired.
    pub jump_trigger: bool,
    /// Total jump fires so far.  Readers that may skip cycles compare
    /// counts instead of sampling `jump_trigger`.
    pub jump_count: u64,
    pub action: WhiteboardAction,
}

// ════════════════════════════════════════════════════════════════════════════
// GesturePipeline
// ════════════════════════════════════════════════════════════════════════════

pub struct GesturePipeline {
    config:      PipelineConfig,
    debouncer:   GestureDebouncer,
    mode_filter: ModeGestureFilter,
    pen:         PenStabilizer,
    pinch:       PinchDetector,
    transition:  TransitionDetector,
    snapshot:    GestureSnapshot,
}

impl GesturePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(GesturePipeline {
            debouncer:   GestureDebouncer::new(config.debounce.clone()),
            mode_filter: ModeGestureFilter::new(config.mode_filter.clone()),
            pen:         PenStabilizer::new(config.pen.clone()),
            pinch:       PinchDetector::new(&config.pinch),
            transition:  TransitionDetector::fist_to_open_palm(config.transition_cooldown),
            snapshot:    GestureSnapshot::default(),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    /// Last snapshot produced by [`process`](Self::process).
    pub fn snapshot(&self) -> &GestureSnapshot { &self.snapshot }

    /// Run one cycle.  `hand` is `None` when the detector found no hand.
    pub fn process(&mut self, hand: Option<&HandFrame>, now: f64) -> GestureSnapshot {
        match hand {
            Some(frame) => self.process_hand(frame, now),
            None => self.process_absent(now),
        }
        self.snapshot.sequence += 1;
        self.snapshot
    }

    fn process_hand(&mut self, frame: &HandFrame, now: f64) {
        let raw = match classify(frame) {
            // flicker between shapes reads as no gesture
            GestureLabel::Unknown => GestureLabel::None,
            label => label,
        };
        let stable = self.debouncer.update(raw, now);
        let action = self.mode_filter.filter(stable, now);

        let tip = frame.index_tip();
        let pen = self.pen.update(tip.x, tip.y, action);
        let (pen_x, pen_y) = pen.position.unwrap_or((tip.x, tip.y));

        let pinch_fired = self.pinch.detect(Some(frame), now);
        let transition_fired = self.transition.detect(stable, now);
        let jump = match self.config.jump_source {
            JumpSource::Pinch => pinch_fired,
            JumpSource::Transition => transition_fired,
        };

        trace!("raw {} stable {} action {}", raw, stable, action.as_str());
        if action == WhiteboardAction::ClearCanvas {
            debug!("clear canvas action published");
        }

        let s = &mut self.snapshot;
        s.gesture = stable;
        s.gesture_time = now;
        s.hand = HandPosition { x: tip.x, y: tip.y, z: tip.z, visible: true };
        s.pen = PenPosition { x: pen_x, y: pen_y, pen_down: pen.pen_down };
        s.jump_trigger = jump;
        if jump {
            s.jump_count += 1;
            debug!("jump #{} via {:?}", s.jump_count, self.config.jump_source);
        }
        s.action = action;
    }

    fn process_absent(&mut self, now: f64) {
        self.debouncer.update(GestureLabel::None, now);
        self.pen.reset();
        self.pinch.detect(None, now);

        let s = &mut self.snapshot;
        s.hand.visible = false;
        s.pen.pen_down = false;
        s.jump_trigger = false;
        s.action = WhiteboardAction::None;
        if now - s.gesture_time > self.config.gesture_clear_timeout && !s.gesture.is_none() {
            debug!("hand lost, clearing gesture {}", s.gesture);
            s.gesture = GestureLabel::None;
        }
    }

    /// Drop all temporal state, as on construction.
    pub fn reset(&mut self) {
        self.debouncer.reset();
        self.mode_filter.reset();
        self.pen.reset();
        self.pinch = PinchDetector::new(&self.config.pinch);
        self.transition = TransitionDetector::fist_to_open_palm(self.config.transition_cooldown);
        self.snapshot = GestureSnapshot::default();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{synthesize, SyntheticPose};

    fn pipeline() -> GesturePipeline {
        GesturePipeline::new(PipelineConfig::default()).unwrap()
    }

    /// Feed `pose` at 20 Hz from `start` for `secs`; returns the last snapshot.
    fn hold(p: &mut GesturePipeline, pose: SyntheticPose, start: f64, secs: f64) -> GestureSnapshot {
        let hand = synthesize(pose, 0.5, 0.5).unwrap();
        let mut out = *p.snapshot();
        let steps = (secs / 0.05).round() as usize;
        for i in 0..=steps {
            out = p.process(Some(&hand), start + i as f64 * 0.05);
        }
        out
    }

    #[test]
    fn held_gesture_becomes_stable_and_draws() {
        let mut p = pipeline();
        let s = hold(&mut p, SyntheticPose::OneFinger, 1.0, 0.3);
        assert_eq!(s.gesture, GestureLabel::OneFingerUp);
        assert_eq!(s.action, WhiteboardAction::Draw);
        assert!(s.pen.pen_down);
        assert!(s.hand.visible);
        assert!((s.hand.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn pen_up_falls_back_to_raw_tip() {
        let mut p = pipeline();
        let hand = synthesize(SyntheticPose::Fist, 0.25, 0.75).unwrap();
        let s = p.process(Some(&hand), 1.0);
        assert!(!s.pen.pen_down);
        assert_eq!((s.pen.x, s.pen.y), (s.hand.x, s.hand.y));
    }

    #[test]
    fn pinch_fires_once_and_counts() {
        let mut p = pipeline();
        hold(&mut p, SyntheticPose::OpenPalm, 1.0, 0.2);
        let pinch = synthesize(SyntheticPose::Pinch, 0.5, 0.5).unwrap();
        let first = p.process(Some(&pinch), 2.0);
        assert!(first.jump_trigger);
        assert_eq!(first.jump_count, 1);
        let held = p.process(Some(&pinch), 2.05);
        assert!(!held.jump_trigger);
        assert_eq!(held.jump_count, 1);
    }

    #[test]
    fn transition_source_uses_stable_gestures() {
        let cfg = PipelineConfig { jump_source: JumpSource::Transition, ..PipelineConfig::default() };
        let mut p = GesturePipeline::new(cfg).unwrap();
        let s = hold(&mut p, SyntheticPose::Fist, 1.0, 0.3);
        assert_eq!(s.gesture, GestureLabel::Fist);
        assert_eq!(s.jump_count, 0);
        let s = hold(&mut p, SyntheticPose::OpenPalm, 1.5, 0.3);
        assert_eq!(s.gesture, GestureLabel::OpenPalm);
        assert_eq!(s.jump_count, 1);
    }

    #[test]
    fn absent_hand_clears_gesture_after_timeout() {
        let mut p = pipeline();
        hold(&mut p, SyntheticPose::TwoFingers, 1.0, 0.3);
        // last hand at 1.3
        let s = p.process(None, 1.8);
        assert!(!s.hand.visible);
        assert_eq!(s.gesture, GestureLabel::TwoFingersUp);
        assert_eq!(s.action, WhiteboardAction::None);
        let s = p.process(None, 2.4);
        assert_eq!(s.gesture, GestureLabel::None);
    }

    #[test]
    fn sequence_advances_every_cycle() {
        let mut p = pipeline();
        p.process(None, 0.0);
        p.process(None, 0.05);
        assert_eq!(p.process(None, 0.1).sequence, 3);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.gesture_clear_timeout = f64::NAN;
        assert!(GesturePipeline::new(cfg).is_err());
    }
}
