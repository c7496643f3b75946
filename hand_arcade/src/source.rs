//! Landmark sources.
//!
//! The inference thread pulls one [`HandFrame`] (or nothing) per cycle from
//! a [`LandmarkSource`].  A camera-backed detector would implement the same
//! trait; the runner ships [`SimLandmarkSource`], which poses a synthetic
//! hand at the mouse cursor according to [`SimInput`] events sent from the
//! window.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::{debug, warn};

use gesture_core::{synthesize, HandFrame, SyntheticPose};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

pub trait LandmarkSource: Send + 'static {
    /// Landmarks for the cycle at `now`, or `None` when no hand is seen.
    fn next_frame(&mut self, now: f64) -> Option<HandFrame>;

    /// True once the source will never produce another hand.
    fn is_closed(&self) -> bool { false }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Fingertip position, normalized to the window.
    Pointer { x: f32, y: f32 },
    Pose(SyntheticPose),
    /// Show or hide the hand, as if it left the camera's view.
    HandVisible(bool),
    Quit,
}

pub struct SimLandmarkSource {
    rx:      Receiver<SimInput>,
    pointer: (f32, f32),
    pose:    SyntheticPose,
    visible: bool,
    closed:  bool,
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimLandmarkSource {
            rx,
            pointer: (0.5, 0.5),
            pose:    SyntheticPose::OpenPalm,
            visible: true,
            closed:  false,
        }
    }

    /// A source plus the sender that drives it.
    pub fn channel() -> (Sender<SimInput>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, SimLandmarkSource::new(rx))
    }

    pub fn pose(&self) -> SyntheticPose { self.pose }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { x, y } => {
                self.pointer = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
            }
            SimInput::Pose(p) => {
                if p != self.pose {
                    debug!("sim pose {}", p.name());
                }
                self.pose = p;
            }
            SimInput::HandVisible(v) => {
                debug!("sim hand {}", if v { "shown" } else { "hidden" });
                self.visible = v;
            }
            SimInput::Quit => self.closed = true,
        }
    }

    fn drain(&mut self) {
        while !self.closed {
            match self.rx.try_recv() {
                Ok(input) => self.apply(input),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.closed = true,
            }
        }
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn next_frame(&mut self, _now: f64) -> Option<HandFrame> {
        self.drain();
        if self.closed || !self.visible {
            return None;
        }
        let (x, y) = self.pointer;
        match synthesize(self.pose, x, y) {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!("dropping synthetic hand: {}", e);
                None
            }
        }
    }

    fn is_closed(&self) -> bool { self.closed }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::{classify, GestureLabel};

    #[test]
    fn pointer_moves_the_index_tip() {
        let (tx, mut src) = SimLandmarkSource::channel();
        tx.send(SimInput::Pointer { x: 0.25, y: 0.75 }).unwrap();
        let hand = src.next_frame(0.0).unwrap();
        let tip = hand.index_tip();
        assert!((tip.x - 0.25).abs() < 1e-6);
        assert!((tip.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn pose_changes_the_classified_gesture() {
        let (tx, mut src) = SimLandmarkSource::channel();
        assert_eq!(classify(&src.next_frame(0.0).unwrap()), GestureLabel::OpenPalm);
        tx.send(SimInput::Pose(SyntheticPose::Fist)).unwrap();
        assert_eq!(classify(&src.next_frame(0.1).unwrap()), GestureLabel::Fist);
        assert_eq!(src.pose(), SyntheticPose::Fist);
    }

    #[test]
    fn hidden_hand_yields_nothing() {
        let (tx, mut src) = SimLandmarkSource::channel();
        tx.send(SimInput::HandVisible(false)).unwrap();
        assert!(src.next_frame(0.0).is_none());
        tx.send(SimInput::HandVisible(true)).unwrap();
        assert!(src.next_frame(0.1).is_some());
    }

    #[test]
    fn quit_or_disconnect_closes() {
        let (tx, mut src) = SimLandmarkSource::channel();
        tx.send(SimInput::Quit).unwrap();
        assert!(src.next_frame(0.0).is_none());
        assert!(src.is_closed());

        let (tx, mut src) = SimLandmarkSource::channel();
        drop(tx);
        assert!(src.next_frame(0.0).is_none());
        assert!(src.is_closed());
    }
}
