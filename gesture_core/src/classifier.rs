//! Single-frame gesture classification.
//!
//! A pure function of one [`HandFrame`]: no smoothing, no history.  Each
//! non-thumb finger is read as extended, folded, or neither by comparing the
//! tip to the PIP joint with a fixed margin, then an ordered rule list picks
//! the first matching label.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::landmark::{HandFrame, HandPoint, Landmark};

/// Tip must clear the PIP joint by this much (normalized units) to count as
/// extended or folded.
pub const FINGER_MARGIN: f32 = 0.02;

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel
// ════════════════════════════════════════════════════════════════════════════

/// Discrete gesture read from one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    /// No hand, or nothing stable yet.
    #[default]
    None,
    OneFingerUp,
    TwoFingersUp,
    ThreeFingersUp,
    PinkyFingerUp,
    ThumbsUp,
    Fist,
    OpenPalm,
    Unknown,
}

impl GestureLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureLabel::None           => "none",
            GestureLabel::OneFingerUp    => "one_finger_up",
            GestureLabel::TwoFingersUp   => "two_fingers_up",
            GestureLabel::ThreeFingersUp => "three_fingers_up",
            GestureLabel::PinkyFingerUp  => "pinky_finger_up",
            GestureLabel::ThumbsUp       => "thumbs_up",
            GestureLabel::Fist           => "fist",
            GestureLabel::OpenPalm       => "open_palm",
            GestureLabel::Unknown        => "unknown",
        }
    }

    /// Label for on-screen display.
    pub fn display_name(self) -> &'static str {
        match self {
            GestureLabel::None           => "No Gesture",
            GestureLabel::OneFingerUp    => "One Finger Up",
            GestureLabel::TwoFingersUp   => "Two Fingers Up",
            GestureLabel::ThreeFingersUp => "Three Fingers Up",
            GestureLabel::PinkyFingerUp  => "Pinky Finger Up",
            GestureLabel::ThumbsUp       => "Thumbs Up",
            GestureLabel::Fist           => "Fist",
            GestureLabel::OpenPalm       => "Open Palm",
            GestureLabel::Unknown        => "Unknown",
        }
    }

    pub fn is_none(self) -> bool { self == GestureLabel::None }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger reading
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Finger {
    Extended,
    Folded,
    /// Within the margin band: neither.
    Ambiguous,
}

fn read_finger(tip: Landmark, pip: Landmark) -> Finger {
    if tip.y < pip.y - FINGER_MARGIN {
        Finger::Extended
    } else if tip.y > pip.y + FINGER_MARGIN {
        Finger::Folded
    } else {
        Finger::Ambiguous
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one hand.  Rules are checked in order; thumbs-up precedes fist
/// because both share the all-folded finger pattern.
pub fn classify(hand: &HandFrame) -> GestureLabel {
    use Finger::{Extended as E, Folded as F};

    let index  = read_finger(hand[HandPoint::IndexTip],  hand[HandPoint::IndexPip]);
    let middle = read_finger(hand[HandPoint::MiddleTip], hand[HandPoint::MiddlePip]);
    let ring   = read_finger(hand[HandPoint::RingTip],   hand[HandPoint::RingPip]);
    let pinky  = read_finger(hand[HandPoint::PinkyTip],  hand[HandPoint::PinkyPip]);

    let thumb_tip = hand[HandPoint::ThumbTip];
    let thumb_up = thumb_tip.y < hand[HandPoint::IndexMcp].y
        && thumb_tip.y < hand[HandPoint::MiddleMcp].y;
    let thumb_extended = thumb_tip.y < hand[HandPoint::ThumbIp].y;

    match (index, middle, ring, pinky) {
        (E, F, F, F) => GestureLabel::OneFingerUp,
        (E, E, F, F) => GestureLabel::TwoFingersUp,
        (E, E, E, F) => GestureLabel::ThreeFingersUp,
        (F, F, F, E) => GestureLabel::PinkyFingerUp,
        (F, F, F, F) if thumb_up => GestureLabel::ThumbsUp,
        (F, F, F, F) => GestureLabel::Fist,
        (E, E, E, E) if thumb_extended => GestureLabel::OpenPalm,
        _ => GestureLabel::Unknown,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
