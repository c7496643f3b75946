//! Dino-Run: jump over scrolling obstacles.
//!
//! Positions are bottom edges: `dino_y` and `Obstacle::y` are the row the
//! sprite stands on.  Score is time-based, 100 points per second.

use tracing::debug;

use crate::canvas::{colors, Canvas};
use crate::{draw_game_over, Game, GameSnapshot};

const DEFAULT_WIDTH: i32 = 640;
const DEFAULT_HEIGHT: i32 = 480;
const GROUND_FRACTION: f64 = 0.8;

const DINO_X: i32 = 100;
const DINO_WIDTH: i32 = 60;
const DINO_HEIGHT: i32 = 80;
const GRAVITY: f64 = 1.0;
const JUMP_STRENGTH: f64 = -20.0;

const OBSTACLE_WIDTH: i32 = 30;
const OBSTACLE_HEIGHT: i32 = 50;
const MIN_OBSTACLE_GAP: i32 = 380;
const BASE_SPEED: i32 = 4;
const MAX_SPEED: i32 = 8;
const POINTS_PER_SPEED_STEP: u32 = 250;
const POINTS_PER_SECOND: f64 = 100.0;
/// Hitbox shrink on every side.
const COLLISION_INSET: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Obstacle {
    fn hitbox(&self) -> Rect {
        Rect::from_bottom(self.x, self.y, self.w, self.h).inset(COLLISION_INSET)
    }
}

#[derive(Clone, Copy, Debug)]
struct Rect { x: i32, y: i32, w: i32, h: i32 }

impl Rect {
    fn from_bottom(x: i32, bottom: i32, w: i32, h: i32) -> Self {
        Rect { x, y: bottom - h, w, h }
    }

    fn inset(self, d: i32) -> Self {
        Rect { x: self.x + d, y: self.y + d, w: self.w - 2 * d, h: self.h - 2 * d }
    }

    fn overlaps(&self, o: &Rect) -> bool {
        self.x < o.x + o.w && self.x + self.w > o.x && self.y < o.y + o.h && self.y + self.h > o.y
    }
}

pub struct DinoRunGame {
    width:     i32,
    height:    i32,
    ground_y:  i32,

    dino_y:    i32,
    vel_y:     f64,
    on_ground: bool,

    obstacles: Vec<Obstacle>,
    speed:     i32,

    score:     f64,
    last_tick: Option<f64>,
    game_over: bool,
}

impl DinoRunGame {
    pub fn new() -> Self {
        let ground_y = ground_for(DEFAULT_HEIGHT);
        DinoRunGame {
            width:     DEFAULT_WIDTH,
            height:    DEFAULT_HEIGHT,
            ground_y,
            dino_y:    ground_y,
            vel_y:     0.0,
            on_ground: true,
            obstacles: Vec::new(),
            speed:     BASE_SPEED,
            score:     0.0,
            last_tick: None,
            game_over: false,
        }
    }

    pub fn dino_y(&self) -> i32 { self.dino_y }
    pub fn vel_y(&self) -> f64 { self.vel_y }
    pub fn on_ground(&self) -> bool { self.on_ground }
    pub fn ground_y(&self) -> i32 { self.ground_y }
    pub fn obstacles(&self) -> &[Obstacle] { &self.obstacles }
    pub fn speed(&self) -> i32 { self.speed }

    fn fit_to(&mut self, w: i32, h: i32) {
        if (w, h) == (self.width, self.height) {
            return;
        }
        self.width = w;
        self.height = h;
        self.ground_y = ground_for(h);
        if self.on_ground {
            self.dino_y = self.ground_y;
        }
    }

    fn step_physics(&mut self, jump: bool, now: f64) {
        self.speed = (BASE_SPEED + (self.score as u32 / POINTS_PER_SPEED_STEP) as i32).min(MAX_SPEED);

        if !self.on_ground {
            self.vel_y += GRAVITY;
        }
        if jump && self.on_ground {
            debug!("dino jump at score {}", self.score as u32);
            self.vel_y = JUMP_STRENGTH;
            self.on_ground = false;
        }
        self.dino_y += self.vel_y as i32;
        if self.dino_y >= self.ground_y {
            self.dino_y = self.ground_y;
            self.vel_y = 0.0;
            self.on_ground = true;
        }

        let room = self.obstacles.last().map_or(true, |o| self.width - o.x > MIN_OBSTACLE_GAP);
        if room {
            self.obstacles.push(Obstacle {
                x: self.width + 10,
                y: self.ground_y,
                w: OBSTACLE_WIDTH,
                h: OBSTACLE_HEIGHT,
            });
        }
        for o in &mut self.obstacles {
            o.x -= self.speed;
        }
        self.obstacles.retain(|o| o.x + o.w > 0);

        let dt = self.last_tick.map_or(0.0, |t| (now - t).max(0.0));
        self.last_tick = Some(now);
        self.score += dt * POINTS_PER_SECOND;
    }

    fn check_collisions(&mut self) {
        let dino = Rect::from_bottom(DINO_X, self.dino_y, DINO_WIDTH, DINO_HEIGHT).inset(COLLISION_INSET);
        if self.obstacles.iter().any(|o| dino.overlaps(&o.hitbox())) {
            debug!("dino hit an obstacle at score {}", self.score as u32);
            self.game_over = true;
        }
    }

    fn draw(&self, frame: &mut Canvas) {
        let floor = self.ground_y + 2;
        frame.draw_line(0, floor, self.width, floor, 2, colors::WHITE);

        let top = self.dino_y - DINO_HEIGHT;
        frame.fill_rect(DINO_X, top, DINO_WIDTH, DINO_HEIGHT, colors::GREEN);
        frame.draw_text("DINO", DINO_X + 8, top - 14, 2, colors::GREEN);

        for o in &self.obstacles {
            frame.fill_rect(o.x, o.y - o.h, o.w, o.h, colors::RED);
        }
        frame.draw_text(&format!("SCORE: {}", self.score as u32), 10, 40, 3, colors::WHITE);
    }
}

impl Default for DinoRunGame {
    fn default() -> Self { DinoRunGame::new() }
}

impl Game for DinoRunGame {
    type Input = bool;

    fn name(&self) -> &'static str { "Dino Run" }

    fn reset(&mut self) {
        let (w, h) = (self.width, self.height);
        *self = DinoRunGame::new();
        self.fit_to(w, h);
    }

    fn update(&mut self, mut frame: Canvas, jump: bool, now: f64) -> Canvas {
        if !frame.is_valid() {
            return frame;
        }
        self.fit_to(frame.width() as i32, frame.height() as i32);
        if !self.game_over {
            self.step_physics(jump, now);
            self.check_collisions();
        }
        self.draw(&mut frame);
        if self.game_over {
            draw_game_over(&mut frame, "PINCH AND RESET");
        }
        frame
    }

    fn state(&self) -> GameSnapshot {
        GameSnapshot { score: self.score as u32, game_over: self.game_over, lives: None, level: None }
    }
}

fn ground_for(height: i32) -> i32 {
    (height as f64 * GROUND_FRACTION) as i32
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Canvas { Canvas::new(640, 480) }

    #[test]
    fn jump_sets_impulse_on_the_same_tick() {
        let mut g = DinoRunGame::new();
        assert!(g.on_ground());
        g.update(frame(), true, 0.0);
        assert!(!g.on_ground());
        assert_eq!(g.vel_y(), JUMP_STRENGTH);
        assert_eq!(g.dino_y(), 384 - 20);
    }

    #[test]
    fn airborne_jump_is_ignored_and_dino_lands() {
        let mut g = DinoRunGame::new();
        let mut f = g.update(frame(), true, 0.0);
        f = g.update(f, true, 0.01);
        assert_eq!(g.vel_y(), JUMP_STRENGTH + GRAVITY);
        for i in 2..60 {
            f = g.update(f, false, i as f64 * 0.01);
        }
        assert!(g.on_ground());
        assert_eq!(g.dino_y(), g.ground_y());
        assert_eq!(g.vel_y(), 0.0);
    }

    #[test]
    fn score_accrues_with_time() {
        let mut g = DinoRunGame::new();
        let mut f = g.update(frame(), false, 10.0);
        assert_eq!(g.state().score, 0);
        f = g.update(f, false, 10.5);
        g.update(f, false, 11.0);
        assert_eq!(g.state().score, 100);
    }

    #[test]
    fn speed_scales_with_score_and_caps() {
        let mut g = DinoRunGame::new();
        g.score = 500.0;
        let f = g.update(frame(), false, 0.0);
        assert_eq!(g.speed(), 6);
        g.score = 10_000.0;
        g.update(f, false, 0.0);
        assert_eq!(g.speed(), MAX_SPEED);
    }

    #[test]
    fn obstacles_keep_their_gap_and_are_pruned() {
        let mut g = DinoRunGame::new();
        let mut f = g.update(frame(), false, 0.0);
        assert_eq!(g.obstacles().len(), 1);
        assert_eq!(g.obstacles()[0].x, 650 - 4);
        // Hold the dino far above the obstacle lane.
        for _ in 0..500 {
            g.dino_y = -1000;
            g.on_ground = false;
            g.vel_y = 0.0;
            f = g.update(f, false, 0.0);
        }
        let xs: Vec<i32> = g.obstacles().iter().map(|o| o.x).collect();
        assert!(xs.windows(2).all(|p| p[1] - p[0] > MIN_OBSTACLE_GAP - BASE_SPEED));
        assert!(g.obstacles().iter().all(|o| o.x + o.w > 0));
        assert!(!g.state().game_over);
    }

    #[test]
    fn collision_freezes_the_game() {
        let mut g = DinoRunGame::new();
        let f = g.update(frame(), false, 0.0);
        g.obstacles.push(Obstacle { x: DINO_X + 4 + 20, y: g.ground_y(), w: 30, h: 50 });
        let f = g.update(f, false, 1.0);
        assert!(g.state().game_over);
        let score = g.state().score;
        let obstacles = g.obstacles().to_vec();
        g.update(f, true, 5.0);
        assert_eq!(g.state().score, score);
        assert_eq!(g.obstacles(), &obstacles[..]);
        assert!(g.on_ground());
    }

    #[test]
    fn edge_touch_inside_inset_is_not_a_hit() {
        let mut g = DinoRunGame::new();
        let f = g.update(frame(), false, 0.0);
        // Raw boxes overlap by 15px; shrunken boxes do not.
        g.obstacles.push(Obstacle { x: DINO_X + DINO_WIDTH - 15 + 4, y: g.ground_y(), w: 30, h: 50 });
        g.update(f, false, 0.0);
        assert!(!g.state().game_over);
    }

    #[test]
    fn resize_moves_the_ground() {
        let mut g = DinoRunGame::new();
        g.update(Canvas::new(800, 600), false, 0.0);
        assert_eq!(g.ground_y(), 480);
        assert_eq!(g.dino_y(), 480);
        g.reset();
        assert_eq!(g.ground_y(), 480);
        assert!(g.obstacles().is_empty());
    }

    #[test]
    fn invalid_canvas_is_a_no_op() {
        let mut g = DinoRunGame::new();
        let out = g.update(Canvas::default(), true, 0.0);
        assert!(!out.is_valid());
        assert!(g.on_ground());
        assert!(g.obstacles().is_empty());
    }
}
