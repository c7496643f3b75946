//! Gesture-driven slide presenter.
//!
//! Slides are numbered placeholders; the deck only tracks which one is
//! showing.  Navigation comes from a [`PresentationFilter`] fed with the
//! stable gesture each tick.  The slide number stays within
//! `1..=total_slides`.

use gesture_core::{GestureLabel, PresentationAction, PresentationConfig, PresentationFilter};
use tracing::debug;

use crate::canvas::{blend, colors, rgb, Canvas};
use crate::{Game, GameSnapshot};

pub const DEFAULT_SLIDES: u32 = 10;

const SLIDE_TINTS: [u32; 5] = [
    rgb(0x2E, 0x4A, 0x7D),
    rgb(0x3D, 0x6B, 0x4F),
    rgb(0x7A, 0x3E, 0x5C),
    rgb(0x6B, 0x5A, 0x2E),
    rgb(0x3A, 0x3A, 0x6E),
];

pub struct Presentation {
    filter:       PresentationFilter,
    current:      u32,
    total:        u32,
    last_action:  PresentationAction,
}

impl Presentation {
    pub fn new(total_slides: u32) -> Self {
        Presentation::with_config(total_slides, PresentationConfig::default())
    }

    /// A deck of at least one slide.
    pub fn with_config(total_slides: u32, config: PresentationConfig) -> Self {
        Presentation {
            filter:      PresentationFilter::new(config),
            current:     1,
            total:       total_slides.max(1),
            last_action: PresentationAction::None,
        }
    }

    /// 1-based.
    pub fn current_slide(&self) -> u32 { self.current }
    pub fn total_slides(&self) -> u32 { self.total }
    pub fn is_paused(&self) -> bool { !self.filter.is_active() }
    pub fn last_action(&self) -> PresentationAction { self.last_action }

    /// Apply one navigation action directly.
    pub fn apply(&mut self, action: PresentationAction) {
        let before = self.current;
        match action {
            PresentationAction::Next => self.current = (self.current + 1).min(self.total),
            PresentationAction::Prev => self.current = self.current.saturating_sub(1).max(1),
            PresentationAction::Toggle | PresentationAction::None => {}
        }
        if self.current != before {
            debug!("slide {} / {}", self.current, self.total);
        }
        if action != PresentationAction::None {
            self.last_action = action;
        }
    }

    fn draw(&self, frame: &mut Canvas) {
        let tint = SLIDE_TINTS[(self.current as usize - 1) % SLIDE_TINTS.len()];
        frame.clear(tint);

        let (w, h) = (frame.width() as i32, frame.height() as i32);
        frame.fill_rect(w / 10, h / 6, w * 8 / 10, h * 4 / 6, blend(tint, colors::WHITE, 0.15));
        frame.draw_text_centered(&format!("SLIDE {}", self.current), h / 2 - 10, 6, colors::WHITE);
        frame.draw_text_centered(&format!("{} / {}", self.current, self.total), h / 2 + 40, 2, colors::WHITE);

        let filled = (w as i64 * self.current as i64 / self.total as i64) as i32;
        frame.fill_rect(0, h - 8, w, 8, colors::HUD_BG);
        frame.fill_rect(0, h - 8, filled, 8, colors::CYAN);

        frame.draw_text(self.last_action.as_str(), 10, 10, 2, colors::YELLOW);
        if self.is_paused() {
            frame.overlay(colors::BLACK, 0.4);
            frame.draw_text_centered("PAUSED", h / 2 - 10, 6, colors::ORANGE);
        }
    }
}

impl Default for Presentation {
    fn default() -> Self { Presentation::new(DEFAULT_SLIDES) }
}

impl Game for Presentation {
    /// Stable gesture from the pipeline.
    type Input = GestureLabel;

    fn name(&self) -> &'static str { "Presentation" }

    fn reset(&mut self) {
        self.filter.reset();
        self.current = 1;
        self.last_action = PresentationAction::None;
    }

    fn update(&mut self, mut frame: Canvas, gesture: GestureLabel, now: f64) -> Canvas {
        if !frame.is_valid() {
            return frame;
        }
        let action = self.filter.filter(gesture, now);
        self.apply(action);
        self.draw(&mut frame);
        frame
    }

    /// `score` is the slide showing, `level` the deck size.
    fn state(&self) -> GameSnapshot {
        GameSnapshot { score: self.current, game_over: false, lives: None, level: Some(self.total) }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn step(p: &mut Presentation, g: GestureLabel, now: f64) {
        p.update(Canvas::new(320, 240), g, now);
    }

    #[test]
    fn one_finger_then_two_fingers_navigate() {
        let mut p = Presentation::new(5);
        step(&mut p, GestureLabel::OneFingerUp, 0.0);
        assert_eq!(p.current_slide(), 2);
        step(&mut p, GestureLabel::OneFingerUp, 0.5);
        assert_eq!(p.current_slide(), 2);
        step(&mut p, GestureLabel::TwoFingersUp, 1.5);
        assert_eq!(p.current_slide(), 1);
        assert_eq!(p.last_action(), PresentationAction::Prev);
    }

    #[test]
    fn slide_number_stays_in_range() {
        let mut p = Presentation::new(3);
        p.apply(PresentationAction::Prev);
        assert_eq!(p.current_slide(), 1);
        for _ in 0..5 {
            p.apply(PresentationAction::Next);
        }
        assert_eq!(p.current_slide(), 3);
        assert_eq!(Presentation::new(0).total_slides(), 1);
    }

    #[test]
    fn last_slide_holds_under_repeated_gestures() {
        let mut p = Presentation::new(2);
        let mut t = 0.0;
        for _ in 0..4 {
            step(&mut p, GestureLabel::OneFingerUp, t);
            step(&mut p, GestureLabel::None, t + 0.1);
            t += 1.5;
        }
        assert_eq!(p.current_slide(), 2);
        assert_eq!(p.state().score, 2);
        assert_eq!(p.state().level, Some(2));
    }

    #[test]
    fn paused_deck_ignores_navigation() {
        let mut p = Presentation::new(5);
        step(&mut p, GestureLabel::OpenPalm, 0.0);
        assert!(p.is_paused());
        step(&mut p, GestureLabel::OneFingerUp, 2.0);
        assert_eq!(p.current_slide(), 1);
        step(&mut p, GestureLabel::OpenPalm, 4.0);
        assert!(!p.is_paused());
        step(&mut p, GestureLabel::OneFingerUp, 6.0);
        assert_eq!(p.current_slide(), 2);
    }

    #[test]
    fn paused_frame_is_dimmed() {
        let mut p = Presentation::new(5);
        let running = p.update(Canvas::new(320, 240), GestureLabel::None, 0.0);
        let paused = p.update(Canvas::new(320, 240), GestureLabel::OpenPalm, 0.1);
        assert_ne!(running.get(2, 120), paused.get(2, 120));
    }

    #[test]
    fn reset_returns_to_first_running_slide() {
        let mut p = Presentation::new(5);
        step(&mut p, GestureLabel::OneFingerUp, 0.0);
        step(&mut p, GestureLabel::OpenPalm, 2.0);
        p.reset();
        assert_eq!(p.current_slide(), 1);
        assert!(!p.is_paused());
        assert_eq!(p.last_action(), PresentationAction::None);
    }

    #[test]
    fn invalid_canvas_is_ignored() {
        let mut p = Presentation::new(5);
        p.update(Canvas::default(), GestureLabel::OneFingerUp, 0.0);
        assert_eq!(p.current_slide(), 1);
    }
}
