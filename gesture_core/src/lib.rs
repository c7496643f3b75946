//! # gesture_core
//!
//! Turns per-frame hand landmarks into stable, debounced control signals.
//!
//! ## Stages
//!
//! | Stage | Module | State | Output |
//! |---|---|---|---|
//! | Classify | [`classifier`] | none | raw [`GestureLabel`] |
//! | Debounce | [`debounce`] | candidate + dwell timer | stable label |
//! | Jump edge | [`trigger`] | edge + cooldown | one-shot `bool` |
//! | Whiteboard mode | [`mode_filter`] | per-action timers | [`WhiteboardAction`] |
//! | Presentation mode | [`presentation`] | last gesture + timer + paused | [`PresentationAction`] |
//! | Pen | [`pen`] | EMA + last point | smoothed `(x, y)` |
//!
//! [`GesturePipeline`] chains all of them; [`shared_gesture_state`] hands the
//! result from the single inference thread to any number of readers.
//!
//! ## Time
//!
//! Nothing here reads a clock.  Every stateful `update`/`detect`/`filter`
//! takes `now` in seconds; the caller gets it from a [`Clock`].
//!
//! ## Gestures
//!
//! | Label | Shape |
//! |---|---|
//! | `one_finger_up` | index only |
//! | `two_fingers_up` | index + middle |
//! | `three_fingers_up` | index + middle + ring |
//! | `pinky_finger_up` | pinky only |
//! | `thumbs_up` | all folded, thumb above index/middle MCP |
//! | `fist` | all folded |
//! | `open_palm` | all extended, thumb extended |

pub mod error;
pub mod geometry;
pub mod landmark;
pub mod classifier;
pub mod debounce;
pub mod trigger;
pub mod mode_filter;
pub mod presentation;
pub mod pen;
pub mod config;
pub mod pipeline;
pub mod shared;
pub mod clock;
pub mod synthetic;

pub use classifier::{classify, GestureLabel};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{JumpSource, PipelineConfig};
pub use debounce::{DebounceConfig, GestureDebouncer};
pub use error::{CoreError, Result};
pub use landmark::{HandFrame, HandPoint, Landmark, LANDMARK_COUNT};
pub use mode_filter::{ModeFilterConfig, ModeGestureFilter, WhiteboardAction};
pub use presentation::{PresentationAction, PresentationConfig, PresentationFilter};
pub use pen::{PenConfig, PenSample, PenStabilizer};
pub use pipeline::{GesturePipeline, GestureSnapshot, HandPosition, PenPosition};
pub use shared::{shared_gesture_state, GesturePublisher, GestureReader};
pub use synthetic::{synthesize, SyntheticPose};
pub use trigger::{EdgeTrigger, PinchConfig, PinchDetector, TransitionDetector};
