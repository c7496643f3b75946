//! Snake steered directly by the fingertip.
//!
//! The head is wherever the finger is (clamped to the frame).  The body is
//! the path the head has travelled, trimmed from the tail so its total
//! length never exceeds `allowed_length`.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::canvas::{colors, Canvas};
use crate::{draw_game_over, Game, GameSnapshot};

const INITIAL_LENGTH: f64 = 200.0;
const GROWTH_PER_FOOD: f64 = 40.0;
const FOOD_SIZE: i32 = 40;
const FOOD_MARGIN: i32 = 60;
/// Most recent points skipped by the self-collision test.
const NECK_POINTS: usize = 10;
const COLLISION_DIST: f64 = 10.0;
/// Head moves shorter than this are not recorded.
const MIN_STEP: f64 = 1.0;

pub struct SnakeGame {
    /// Oldest first; the head is the back.
    points:         VecDeque<(i32, i32)>,
    /// `lengths[i]` is the segment ending at `points[i + 1]`.
    lengths:        VecDeque<f64>,
    current_length: f64,
    allowed_length: f64,
    previous_head:  Option<(i32, i32)>,
    food:           Option<(i32, i32)>,
    score:          u32,
    game_over:      bool,
    rng:            StdRng,
}

impl SnakeGame {
    pub fn new() -> Self {
        SnakeGame::with_rng(StdRng::from_entropy())
    }

    /// Deterministic food placement.
    pub fn with_seed(seed: u64) -> Self {
        SnakeGame::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        SnakeGame {
            points:         VecDeque::new(),
            lengths:        VecDeque::new(),
            current_length: 0.0,
            allowed_length: INITIAL_LENGTH,
            previous_head:  None,
            food:           None,
            score:          0,
            game_over:      false,
            rng,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &(i32, i32)> { self.points.iter() }
    pub fn point_count(&self) -> usize { self.points.len() }
    pub fn current_length(&self) -> f64 { self.current_length }
    pub fn allowed_length(&self) -> f64 { self.allowed_length }
    pub fn food(&self) -> Option<(i32, i32)> { self.food }

    fn place_food(&mut self, w: i32, h: i32) {
        let x_max = (w - FOOD_MARGIN).max(FOOD_MARGIN + 1);
        let y_max = (h - FOOD_MARGIN).max(FOOD_MARGIN + 1);
        let food = (
            self.rng.gen_range(FOOD_MARGIN..x_max),
            self.rng.gen_range(FOOD_MARGIN..y_max),
        );
        debug!("snake food at {:?}", food);
        self.food = Some(food);
    }

    fn advance(&mut self, head: (i32, i32), w: i32, h: i32) {
        let head = (head.0.clamp(0, w - 1), head.1.clamp(0, h - 1));

        let Some(prev) = self.previous_head else {
            self.previous_head = Some(head);
            self.points = VecDeque::from([head]);
            self.lengths.clear();
            self.current_length = 0.0;
            return;
        };

        let segment = distance(prev, head);
        if segment <= MIN_STEP {
            return;
        }
        self.points.push_back(head);
        self.lengths.push_back(segment);
        self.current_length += segment;
        self.previous_head = Some(head);

        while self.current_length > self.allowed_length {
            let Some(oldest) = self.lengths.pop_front() else { break };
            self.current_length -= oldest;
            self.points.pop_front();
        }

        if self.points.len() > NECK_POINTS {
            let body = self.points.len() - NECK_POINTS;
            if self.points.iter().take(body).any(|&p| distance(p, head) < COLLISION_DIST) {
                debug!("snake bit itself at {:?}, score {}", head, self.score);
                self.game_over = true;
            }
        }

        if let Some(food) = self.food {
            if distance(head, food) < FOOD_SIZE as f64 {
                self.score += 1;
                self.allowed_length += GROWTH_PER_FOOD;
                self.place_food(w, h);
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    fn draw(&self, frame: &mut Canvas) {
        match self.points.len() {
            0 => {}
            1 => frame.fill_circle(self.points[0].0, self.points[0].1, 8, colors::GREEN),
            _ => {
                let pts: Vec<(i32, i32)> = self.points.iter().copied().collect();
                frame.draw_polyline(&pts, 10, colors::GREEN);
                if let Some(&(hx, hy)) = self.points.back() {
                    frame.fill_circle(hx, hy, 12, colors::RED);
                }
            }
        }
        if let Some((fx, fy)) = self.food {
            frame.fill_circle(fx, fy, FOOD_SIZE, colors::CYAN);
        }
        frame.fill_rect(10, 10, 220, 50, colors::BLACK);
        frame.draw_text(&format!("SCORE: {}", self.score), 20, 22, 4, colors::YELLOW);
    }
}

impl Default for SnakeGame {
    fn default() -> Self { SnakeGame::new() }
}

impl Game for SnakeGame {
    type Input = Option<(i32, i32)>;

    fn name(&self) -> &'static str { "Snake" }

    fn reset(&mut self) {
        self.points.clear();
        self.lengths.clear();
        self.current_length = 0.0;
        self.allowed_length = INITIAL_LENGTH;
        self.previous_head = None;
        self.food = None;
        self.score = 0;
        self.game_over = false;
    }

    fn update(&mut self, mut frame: Canvas, head: Option<(i32, i32)>, _now: f64) -> Canvas {
        if !frame.is_valid() {
            return frame;
        }
        let (w, h) = (frame.width() as i32, frame.height() as i32);
        if self.food.is_none() {
            self.place_food(w, h);
        }

        if !self.game_over {
            if let Some(head) = head {
                self.advance(head, w, h);
            }
        }

        self.draw(&mut frame);
        if self.game_over {
            draw_game_over(&mut frame, "RAISE HAND AND RESET");
        }
        frame
    }

    fn state(&self) -> GameSnapshot {
        GameSnapshot { score: self.score, game_over: self.game_over, lives: None, level: None }
    }
}

fn distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    gesture_core::geometry::pixel_distance(a, b)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
