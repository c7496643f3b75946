//! Synthetic hands for simulation and tests.
//!
//! Each pose is laid out in a small local frame (roughly a hand 0.2 units
//! tall, fingers pointing toward `-y`) and then translated so the index
//! fingertip lands on the requested point.  The shapes clear the
//! classifier's margins comfortably so they classify the same anywhere on
//! screen.

use serde::{Deserialize, Serialize};

use crate::classifier::GestureLabel;
use crate::error::Result;
use crate::landmark::{HandFrame, HandPoint, Landmark, LANDMARK_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticPose {
    #[default]
    OneFinger,
    TwoFingers,
    ThreeFingers,
    Pinky,
    ThumbsUp,
    Fist,
    OpenPalm,
    /// Thumb tip touching the index tip.
    Pinch,
}

impl SyntheticPose {
    pub const ALL: [SyntheticPose; 8] = [
        SyntheticPose::OneFinger,
        SyntheticPose::TwoFingers,
        SyntheticPose::ThreeFingers,
        SyntheticPose::Pinky,
        SyntheticPose::ThumbsUp,
        SyntheticPose::Fist,
        SyntheticPose::OpenPalm,
        SyntheticPose::Pinch,
    ];

    /// What [`crate::classifier::classify`] reads from this pose.
    pub fn expected_label(self) -> GestureLabel {
        match self {
            SyntheticPose::OneFinger    => GestureLabel::OneFingerUp,
            SyntheticPose::TwoFingers   => GestureLabel::TwoFingersUp,
            SyntheticPose::ThreeFingers => GestureLabel::ThreeFingersUp,
            SyntheticPose::Pinky        => GestureLabel::PinkyFingerUp,
            SyntheticPose::ThumbsUp     => GestureLabel::ThumbsUp,
            SyntheticPose::Fist         => GestureLabel::Fist,
            SyntheticPose::OpenPalm     => GestureLabel::OpenPalm,
            SyntheticPose::Pinch        => GestureLabel::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SyntheticPose::OneFinger    => "one finger",
            SyntheticPose::TwoFingers   => "two fingers",
            SyntheticPose::ThreeFingers => "three fingers",
            SyntheticPose::Pinky        => "pinky",
            SyntheticPose::ThumbsUp     => "thumbs up",
            SyntheticPose::Fist         => "fist",
            SyntheticPose::OpenPalm     => "open palm",
            SyntheticPose::Pinch        => "pinch",
        }
    }

    /// Index, middle, ring, pinky extended?
    fn fingers(self) -> [bool; 4] {
        match self {
            SyntheticPose::OneFinger    => [true, false, false, false],
            SyntheticPose::TwoFingers   => [true, true, false, false],
            SyntheticPose::ThreeFingers => [true, true, true, false],
            SyntheticPose::Pinky        => [false, false, false, true],
            SyntheticPose::ThumbsUp | SyntheticPose::Fist => [false; 4],
            SyntheticPose::OpenPalm | SyntheticPose::Pinch => [true; 4],
        }
    }
}

// Local layout
const WRIST: (f32, f32) = (0.0, 0.20);
const MCP_Y: f32 = 0.10;
const FINGER_X: [f32; 4] = [-0.03, 0.0, 0.03, 0.06];
/// pip, dip, tip heights
const EXTENDED: [f32; 3] = [0.05, 0.02, -0.01];
const FOLDED: [f32; 3] = [0.06, 0.09, 0.10];
const PINCH_POINT: (f32, f32) = (-0.05, 0.04);

/// Build a hand in `pose` with its index fingertip at `(x, y)`.  Fails only
/// when the target point is not finite.
pub fn synthesize(pose: SyntheticPose, x: f32, y: f32) -> Result<HandFrame> {
    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    let mut put = |p: HandPoint, (lx, ly): (f32, f32)| {
        pts[p.index()] = Landmark::new(lx, ly, 0.0);
    };

    put(HandPoint::Wrist, WRIST);
    put(HandPoint::ThumbCmc, (-0.05, 0.17));
    put(HandPoint::ThumbMcp, (-0.07, 0.14));
    let (thumb_ip, thumb_tip) = match pose {
        SyntheticPose::ThumbsUp => ((-0.07, 0.03), (-0.07, -0.02)),
        SyntheticPose::OpenPalm => ((-0.09, 0.11), (-0.12, 0.08)),
        SyntheticPose::Pinch    => ((-0.08, 0.09), PINCH_POINT),
        _                       => ((-0.05, 0.11), (-0.03, 0.12)),
    };
    put(HandPoint::ThumbIp, thumb_ip);
    put(HandPoint::ThumbTip, thumb_tip);

    let joints = [
        [HandPoint::IndexMcp,  HandPoint::IndexPip,  HandPoint::IndexDip,  HandPoint::IndexTip],
        [HandPoint::MiddleMcp, HandPoint::MiddlePip, HandPoint::MiddleDip, HandPoint::MiddleTip],
        [HandPoint::RingMcp,   HandPoint::RingPip,   HandPoint::RingDip,   HandPoint::RingTip],
        [HandPoint::PinkyMcp,  HandPoint::PinkyPip,  HandPoint::PinkyDip,  HandPoint::PinkyTip],
    ];
    for ((chain, &fx), extended) in joints.iter().zip(&FINGER_X).zip(pose.fingers()) {
        let heights = if extended { EXTENDED } else { FOLDED };
        put(chain[0], (fx, MCP_Y));
        put(chain[1], (fx, heights[0]));
        put(chain[2], (fx, heights[1]));
        put(chain[3], (fx, heights[2]));
    }
    if pose == SyntheticPose::Pinch {
        put(HandPoint::IndexTip, PINCH_POINT);
    }

    let tip = pts[HandPoint::IndexTip.index()];
    let (dx, dy) = (x - tip.x, y - tip.y);
    for p in pts.iter_mut() {
        *p = p.translated(dx, dy);
    }
    HandFrame::new(pts)
}
