//! Hand landmarks as delivered by the external detector.
//!
//! A detected hand is 21 points in the detector's fixed ordering (wrist,
//! then four joints per digit from thumb to pinky).  `x` and `y` are
//! normalized to the frame (`0.0..=1.0`, `y` grows downward); `z` is a
//! relative depth.  Frames are ephemeral: the pipeline reads one per
//! inference cycle and never mutates it.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::geometry::distance3;

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One anatomical point of a tracked hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// 3-D Euclidean distance to `other`.
    pub fn distance(&self, other: &Landmark) -> f32 {
        distance3([self.x, self.y, self.z], [other.x, other.y, other.z])
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Landmark { x: self.x + dx, y: self.y + dy, z: self.z }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandPoint — named indices into a HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// Named landmark positions, in detector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandPoint {
    Wrist     = 0,
    ThumbCmc  = 1,
    ThumbMcp  = 2,
    ThumbIp   = 3,
    ThumbTip  = 4,
    IndexMcp  = 5,
    IndexPip  = 6,
    IndexDip  = 7,
    IndexTip  = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp   = 13,
    RingPip   = 14,
    RingDip   = 15,
    RingTip   = 16,
    PinkyMcp  = 17,
    PinkyPip  = 18,
    PinkyDip  = 19,
    PinkyTip  = 20,
}

impl HandPoint {
    pub fn index(self) -> usize { self as usize }
}

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// Exactly [`LANDMARK_COUNT`] finite landmarks for one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    /// Validate and wrap a full landmark array.
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(CoreError::NonFinite { index });
        }
        Ok(HandFrame { points })
    }

    /// Build from a detector-ordered slice; must hold exactly 21 entries.
    pub fn from_slice(points: &[Landmark]) -> Result<Self> {
        let array: [Landmark; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            CoreError::LandmarkCount { expected: LANDMARK_COUNT, got: points.len() }
        })?;
        Self::new(array)
    }

    /// Build from `(x, y, z)` tuples, the shape most detectors hand back.
    pub fn from_tuples(points: &[(f32, f32, f32)]) -> Result<Self> {
        let lms: Vec<Landmark> = points.iter()
            .map(|&(x, y, z)| Landmark::new(x, y, z))
            .collect();
        Self::from_slice(&lms)
    }

    pub fn get(&self, point: HandPoint) -> Landmark {
        self.points[point.index()]
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    /// Thumb-tip to index-tip distance in normalized 3-D units.
    pub fn pinch_distance(&self) -> f32 {
        self.get(HandPoint::ThumbTip).distance(&self.get(HandPoint::IndexTip))
    }

    /// The index fingertip, used as the pointer for every consumer.
    pub fn index_tip(&self) -> Landmark {
        self.get(HandPoint::IndexTip)
    }
}

impl Index<HandPoint> for HandFrame {
    type Output = Landmark;

    fn index(&self, point: HandPoint) -> &Landmark {
        &self.points[point.index()]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_rejects_wrong_count() {
        let pts = vec![Landmark::default(); 20];
        assert_eq!(
            HandFrame::from_slice(&pts),
            Err(CoreError::LandmarkCount { expected: 21, got: 20 }),
        );
    }

    #[test]
    fn new_rejects_nan() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[7].y = f32::NAN;
        assert_eq!(HandFrame::new(pts), Err(CoreError::NonFinite { index: 7 }));
    }

    #[test]
    fn named_access_matches_detector_order() {
        let tuples: Vec<(f32, f32, f32)> = (0..LANDMARK_COUNT)
            .map(|i| (i as f32 / 100.0, 0.5, 0.0))
            .collect();
        let hand = HandFrame::from_tuples(&tuples).unwrap();
        assert_eq!(hand[HandPoint::IndexTip].x, 0.08);
        assert_eq!(hand.get(HandPoint::PinkyTip).x, 0.20);
        assert_eq!(hand.index_tip(), hand[HandPoint::IndexTip]);
    }

    #[test]
    fn pinch_distance_is_three_dimensional() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[HandPoint::IndexTip.index()] = Landmark::new(0.0, 0.03, 0.04);
        let hand = HandFrame::new(pts).unwrap();
        assert!((hand.pinch_distance() - 0.05).abs() < 1e-6);
    }
}
