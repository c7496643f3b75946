//! Gesture-driven whiteboard.
//!
//! Consumes the whiteboard action and stabilized pen from the gesture
//! pipeline and keeps a list of strokes in normalized coordinates, so the
//! drawing survives a window resize.  Erasing is a wide stroke painted in
//! the paper colour.

use gesture_core::{GestureSnapshot, WhiteboardAction};
use tracing::debug;

use crate::canvas::{colors, rgb, Canvas};
use crate::{Game, GameSnapshot};

pub const PALETTE: [u32; 8] = [
    rgb(0xFF, 0x00, 0x00),
    rgb(0x00, 0xFF, 0x00),
    rgb(0x00, 0x00, 0xFF),
    rgb(0xFF, 0xFF, 0x00),
    rgb(0xFF, 0x00, 0xFF),
    rgb(0x00, 0xFF, 0xFF),
    rgb(0xFF, 0xA5, 0x00),
    rgb(0x80, 0x00, 0x80),
];

const PAPER: u32 = rgb(0xF5, 0xF5, 0xF0);
const ERASER_WIDTH: i32 = 20;

// ════════════════════════════════════════════════════════════════════════════
// Stroke sizes
// ════════════════════════════════════════════════════════════════════════════

/// Pen width in pixels, restricted to a fixed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeSizes {
    current: i32,
}

impl StrokeSizes {
    pub const ALLOWED: [i32; 3] = [3, 8, 15];

    pub fn new() -> Self {
        StrokeSizes { current: Self::ALLOWED[0] }
    }

    pub fn current(&self) -> i32 { self.current }

    /// Returns false and keeps the current size for anything not allowed.
    pub fn set(&mut self, size: i32) -> bool {
        if !Self::ALLOWED.contains(&size) {
            return false;
        }
        self.current = size;
        true
    }

    /// Step to the next larger (`up`) or smaller size, stopping at the ends.
    pub fn step(&mut self, up: bool) -> i32 {
        let i = Self::ALLOWED.iter().position(|&s| s == self.current).unwrap_or(0);
        let j = if up { (i + 1).min(Self::ALLOWED.len() - 1) } else { i.saturating_sub(1) };
        self.current = Self::ALLOWED[j];
        self.current
    }

    pub fn reset(&mut self) {
        self.current = Self::ALLOWED[0];
    }
}

impl Default for StrokeSizes {
    fn default() -> Self { StrokeSizes::new() }
}

// ════════════════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════════════════

/// What the whiteboard needs from one gesture snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WhiteboardInput {
    pub action: WhiteboardAction,
    /// Stabilized pen, only while the pen is down.
    pub pen:    Option<(f32, f32)>,
    /// Raw fingertip, while a hand is visible.
    pub hand:   Option<(f32, f32)>,
}

impl WhiteboardInput {
    pub fn from_snapshot(s: &GestureSnapshot) -> Self {
        WhiteboardInput {
            action: s.action,
            pen:    s.pen.pen_down.then_some((s.pen.x, s.pen.y)),
            hand:   s.hand.visible.then_some((s.hand.x, s.hand.y)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Whiteboard
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color:  u32,
    pub width:  i32,
    pub erase:  bool,
    /// Normalized `[0, 1]` coordinates.
    pub points: Vec<(f32, f32)>,
}

pub struct Whiteboard {
    strokes:     Vec<Stroke>,
    /// The last stroke is still being extended.
    pen_active:  bool,
    color_index: usize,
    sizes:       StrokeSizes,
    last_action: WhiteboardAction,
    cursor:      Option<(f32, f32)>,
}

impl Whiteboard {
    pub fn new() -> Self {
        Whiteboard {
            strokes:     Vec::new(),
            pen_active:  false,
            color_index: 0,
            sizes:       StrokeSizes::new(),
            last_action: WhiteboardAction::None,
            cursor:      None,
        }
    }

    pub fn strokes(&self) -> &[Stroke] { &self.strokes }
    pub fn color(&self) -> u32 { PALETTE[self.color_index] }
    pub fn stroke_size(&self) -> i32 { self.sizes.current() }
    pub fn stroke_sizes_mut(&mut self) -> &mut StrokeSizes { &mut self.sizes }
    pub fn set_stroke_size(&mut self, size: i32) -> bool { self.sizes.set(size) }

    /// Remove the most recent stroke.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.pen_active = false;
        self.strokes.pop()
    }

    fn extend(&mut self, point: (f32, f32), erase: bool) {
        let (color, width) = if erase {
            (PAPER, ERASER_WIDTH)
        } else {
            (self.color(), self.sizes.current())
        };
        match self.strokes.last_mut() {
            Some(s) if self.pen_active && s.erase == erase => s.points.push(point),
            _ => {
                self.strokes.push(Stroke { color, width, erase, points: vec![point] });
                self.pen_active = true;
            }
        }
    }

    fn apply(&mut self, input: &WhiteboardInput) {
        self.cursor = input.hand;
        match input.action {
            WhiteboardAction::Draw => match input.pen {
                Some(p) => self.extend(p, false),
                None => self.pen_active = false,
            },
            WhiteboardAction::Erase => match input.hand {
                Some(p) => self.extend(p, true),
                None => self.pen_active = false,
            },
            WhiteboardAction::ColorChange => {
                self.pen_active = false;
                self.color_index = (self.color_index + 1) % PALETTE.len();
                debug!("whiteboard colour {:06X}", self.color() & 0xFF_FFFF);
            }
            WhiteboardAction::ClearCanvas => {
                self.pen_active = false;
                if !self.strokes.is_empty() {
                    debug!("whiteboard cleared {} strokes", self.strokes.len());
                }
                self.strokes.clear();
            }
            WhiteboardAction::None => self.pen_active = false,
        }
        self.last_action = input.action;
    }

    fn draw(&self, frame: &mut Canvas) {
        let (w, h) = (frame.width() as f32, frame.height() as f32);
        let to_px = |&(x, y): &(f32, f32)| ((x * w) as i32, (y * h) as i32);

        frame.clear(PAPER);
        for s in &self.strokes {
            let pts: Vec<(i32, i32)> = s.points.iter().map(to_px).collect();
            if let [(x, y)] = pts[..] {
                frame.fill_circle(x, y, s.width / 2, s.color);
            } else {
                frame.draw_polyline(&pts, s.width, s.color);
            }
        }

        if let Some(c) = self.cursor {
            let (x, y) = to_px(&c);
            match self.last_action {
                WhiteboardAction::Erase => frame.draw_circle(x, y, ERASER_WIDTH / 2, colors::GRAY),
                _ => frame.draw_circle(x, y, self.sizes.current() / 2 + 3, self.color()),
            }
        }

        frame.fill_rect(0, 0, frame.width() as i32, 34, colors::HUD_BG);
        frame.fill_rect(8, 7, 20, 20, self.color());
        frame.draw_text(&format!("SIZE: {}", self.sizes.current()), 40, 10, 3, colors::WHITE);
        frame.draw_text(self.last_action.as_str(), 180, 10, 3, colors::YELLOW);
    }
}

impl Default for Whiteboard {
    fn default() -> Self { Whiteboard::new() }
}

impl Game for Whiteboard {
    type Input = WhiteboardInput;

    fn name(&self) -> &'static str { "Whiteboard" }

    fn reset(&mut self) {
        *self = Whiteboard::new();
    }

    fn update(&mut self, mut frame: Canvas, input: WhiteboardInput, _now: f64) -> Canvas {
        if !frame.is_valid() {
            return frame;
        }
        self.apply(&input);
        self.draw(&mut frame);
        frame
    }

    /// `score` is the number of strokes on the board; a whiteboard never ends.
    fn state(&self) -> GameSnapshot {
        GameSnapshot { score: self.strokes.len() as u32, game_over: false, lives: None, level: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::{HandPosition, PenPosition};

    fn frame() -> Canvas { Canvas::new(200, 100) }

    fn draw_at(x: f32, y: f32) -> WhiteboardInput {
        WhiteboardInput { action: WhiteboardAction::Draw, pen: Some((x, y)), hand: Some((x, y)) }
    }

    fn action(a: WhiteboardAction) -> WhiteboardInput {
        WhiteboardInput { action: a, pen: None, hand: Some((0.5, 0.5)) }
    }

    fn feed(wb: &mut Whiteboard, inputs: &[WhiteboardInput]) -> Canvas {
        inputs.iter().fold(frame(), |f, i| wb.update(f, *i, 0.0))
    }

    #[test]
    fn stroke_sizes_accept_only_known_values() {
        let mut s = StrokeSizes::new();
        assert_eq!(s.current(), 3);
        assert!(s.set(8));
        assert!(!s.set(5));
        assert_eq!(s.current(), 8);
        assert_eq!(s.step(true), 15);
        assert_eq!(s.step(true), 15);
        s.reset();
        assert_eq!(s.current(), 3);
        assert_eq!(s.step(false), 3);
    }

    #[test]
    fn drawing_builds_one_stroke_until_pen_lifts() {
        let mut wb = Whiteboard::new();
        feed(&mut wb, &[
            draw_at(0.1, 0.1),
            draw_at(0.2, 0.1),
            action(WhiteboardAction::None),
            draw_at(0.5, 0.5),
        ]);
        assert_eq!(wb.strokes().len(), 2);
        assert_eq!(wb.strokes()[0].points, vec![(0.1, 0.1), (0.2, 0.1)]);
        assert_eq!(wb.strokes()[0].color, PALETTE[0]);
        assert_eq!(wb.state().score, 2);
    }

    #[test]
    fn drawn_pixels_land_on_the_canvas() {
        let mut wb = Whiteboard::new();
        let f = feed(&mut wb, &[draw_at(0.25, 0.5), draw_at(0.75, 0.5)]);
        assert_eq!(f.get(100, 50), Some(PALETTE[0]));
        assert_eq!(f.get(100, 90), Some(PAPER));
    }

    #[test]
    fn colour_change_cycles_and_wraps() {
        let mut wb = Whiteboard::new();
        let changes = vec![action(WhiteboardAction::ColorChange); PALETTE.len() + 1];
        feed(&mut wb, &changes);
        assert_eq!(wb.color(), PALETTE[1]);
        feed(&mut wb, &[draw_at(0.3, 0.3)]);
        assert_eq!(wb.strokes()[0].color, PALETTE[1]);
    }

    #[test]
    fn erase_follows_hand_with_fixed_width() {
        let mut wb = Whiteboard::new();
        wb.set_stroke_size(15);
        feed(&mut wb, &[
            draw_at(0.1, 0.1),
            WhiteboardInput { action: WhiteboardAction::Erase, pen: None, hand: Some((0.1, 0.1)) },
        ]);
        let eraser = &wb.strokes()[1];
        assert!(eraser.erase);
        assert_eq!(eraser.width, ERASER_WIDTH);
        assert_eq!(eraser.color, PAPER);
        assert_eq!(wb.strokes()[0].width, 15);
    }

    #[test]
    fn clear_and_undo() {
        let mut wb = Whiteboard::new();
        feed(&mut wb, &[draw_at(0.1, 0.1), action(WhiteboardAction::None), draw_at(0.2, 0.2)]);
        let last = wb.undo().unwrap();
        assert_eq!(last.points, vec![(0.2, 0.2)]);
        assert_eq!(wb.strokes().len(), 1);
        feed(&mut wb, &[action(WhiteboardAction::ClearCanvas)]);
        assert!(wb.strokes().is_empty());
        assert!(wb.undo().is_none());
    }

    #[test]
    fn input_from_snapshot() {
        let s = GestureSnapshot {
            action: WhiteboardAction::Draw,
            pen: PenPosition { x: 0.4, y: 0.6, pen_down: true },
            hand: HandPosition { x: 0.41, y: 0.61, z: 0.0, visible: true },
            ..Default::default()
        };
        let i = WhiteboardInput::from_snapshot(&s);
        assert_eq!(i.pen, Some((0.4, 0.6)));
        assert_eq!(i.hand, Some((0.41, 0.61)));

        let i = WhiteboardInput::from_snapshot(&GestureSnapshot::default());
        assert_eq!(i, WhiteboardInput::default());
    }

    #[test]
    fn invalid_canvas_is_ignored() {
        let mut wb = Whiteboard::new();
        wb.update(Canvas::default(), draw_at(0.1, 0.1), 0.0);
        assert!(wb.strokes().is_empty());
    }
}
