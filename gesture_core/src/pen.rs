//! Pen coordinate stabilization for whiteboard drawing.
//!
//! Per-axis exponential moving average, then a dead zone that swallows
//! tremor, then a velocity clamp that rejects detection jumps.  All
//! coordinates are normalized `0.0..=1.0`.

use serde::{Deserialize, Serialize};

use crate::geometry::{distance2, step_toward};
use crate::mode_filter::WhiteboardAction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    /// EMA weight of the newest sample; lower is smoother and laggier.
    pub alpha: f32,
    /// Movements shorter than this are reported as no movement.
    pub min_movement: f32,
    /// Longest step accepted per sample.
    pub max_velocity: f32,
}

impl Default for PenConfig {
    fn default() -> Self {
        PenConfig { alpha: 0.3, min_movement: 0.002, max_velocity: 0.15 }
    }
}

impl PenConfig {
    /// Tighter settings used by the live gesture pipeline.
    pub fn pipeline() -> Self {
        PenConfig { alpha: 0.3, min_movement: 0.005, max_velocity: 0.08 }
    }
}

/// One stabilizer output.  `position` is `None` whenever the pen is up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PenSample {
    pub position: Option<(f32, f32)>,
    pub pen_down: bool,
}

#[derive(Clone, Debug)]
pub struct PenStabilizer {
    config:   PenConfig,
    smoothed: Option<(f32, f32)>,
    last:     Option<(f32, f32)>,
    pen_down: bool,
}

impl PenStabilizer {
    pub fn new(config: PenConfig) -> Self {
        PenStabilizer { config, smoothed: None, last: None, pen_down: false }
    }

    pub fn update(&mut self, x: f32, y: f32, action: WhiteboardAction) -> PenSample {
        self.pen_down = action == WhiteboardAction::Draw;
        if !self.pen_down {
            self.reset();
            return PenSample::default();
        }

        let (Some(prev), Some(last)) = (self.smoothed, self.last) else {
            self.smoothed = Some((x, y));
            self.last = Some((x, y));
            return PenSample { position: Some((x, y)), pen_down: true };
        };

        let a = self.config.alpha;
        let mut smoothed = (a * x + (1.0 - a) * prev.0, a * y + (1.0 - a) * prev.1);
        self.smoothed = Some(smoothed);

        let movement = distance2(smoothed, last);
        if movement < self.config.min_movement {
            return PenSample { position: Some(last), pen_down: true };
        }
        if movement > self.config.max_velocity {
            smoothed = step_toward(last, smoothed, self.config.max_velocity);
            self.smoothed = Some(smoothed);
        }

        self.last = Some(smoothed);
        PenSample { position: Some(smoothed), pen_down: true }
    }

    /// Lift the pen and drop all smoothing history.
    pub fn reset(&mut self) {
        self.smoothed = None;
        self.last = None;
        self.pen_down = false;
    }

    pub fn last(&self) -> Option<(f32, f32)> { self.last }
    pub fn is_pen_down(&self) -> bool { self.pen_down }
}

impl Default for PenStabilizer {
    fn default() -> Self { PenStabilizer::new(PenConfig::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_raw() {
        let mut p = PenStabilizer::default();
        let s = p.update(0.4, 0.6, WhiteboardAction::Draw);
        assert_eq!(s, PenSample { position: Some((0.4, 0.6)), pen_down: true });
    }

    #[test]
    fn stationary_input_never_moves_last() {
        let mut p = PenStabilizer::default();
        p.update(0.5, 0.5, WhiteboardAction::Draw);
        for _ in 0..50 {
            let s = p.update(0.5, 0.5, WhiteboardAction::Draw);
            assert_eq!(s.position, Some((0.5, 0.5)));
            assert_eq!(p.last(), Some((0.5, 0.5)));
        }
    }

    #[test]
    fn tremor_inside_dead_zone_is_swallowed() {
        let mut p = PenStabilizer::default();
        p.update(0.5, 0.5, WhiteboardAction::Draw);
        // 0.3 * 0.005 = 0.0015 < 0.002
        let s = p.update(0.505, 0.5, WhiteboardAction::Draw);
        assert_eq!(s.position, Some((0.5, 0.5)));
    }

    #[test]
    fn jump_is_clamped_to_max_velocity() {
        let cfg = PenConfig { alpha: 1.0, ..PenConfig::default() };
        let mut p = PenStabilizer::new(cfg);
        p.update(0.1, 0.1, WhiteboardAction::Draw);
        let s = p.update(0.9, 0.9, WhiteboardAction::Draw);
        let pos = s.position.unwrap();
        let moved = distance2(pos, (0.1, 0.1));
        assert!(moved <= 0.15 + 1e-5, "moved {}", moved);
        assert!(moved > 0.14);
        assert_eq!(p.last(), Some(pos));
    }

    #[test]
    fn pen_up_clears_state() {
        let mut p = PenStabilizer::default();
        p.update(0.2, 0.2, WhiteboardAction::Draw);
        let s = p.update(0.2, 0.2, WhiteboardAction::Erase);
        assert_eq!(s, PenSample::default());
        assert_eq!(p.last(), None);
        // Next pen-down starts fresh from the raw point.
        let s = p.update(0.8, 0.8, WhiteboardAction::Draw);
        assert_eq!(s.position, Some((0.8, 0.8)));
    }
}
