//! Fruit-Ninja: slice rising fruit with the fingertip.
//!
//! Fruit spawn just below the frame on a `now`-driven schedule and fly up
//! and sideways.  Fruit leaving through the top or the right edge costs a
//! life.  Fruit that leaves any other way is not checked for.
//!
//! Difficulty steps up at every multiple of 1000 points:
//!
//! | level | spawn rate (fruit/s) | vertical speed |
//! |---|---|---|
//! | 1 | 1.0 | 5 |
//! | 2 | 1.6 | 5 |
//! | 3 | 2.4 | 7 |
//! | n | 0.8·n | ⌊5n/2⌋ |

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::canvas::{colors, rgb, Canvas};
use crate::{draw_game_over, Game, GameSnapshot};

const BASE_LIVES: i32 = 15;
const BASE_SPEED: (i32, i32) = (0, 5);
const BASE_SPAWN_RATE: f64 = 1.0;
const FRUIT_SIZE: i32 = 30;
const FIRST_SPAWN_DELAY: f64 = 1.0;
const MIN_SPAWN_RATE: f64 = 0.1;
const SLASH_LENGTH: usize = 19;
const SLICE_POINTS: u32 = 100;
const POINTS_PER_LEVEL: u32 = 1000;
/// Fruit whose centre rises above this row has escaped.
const TOP_EXIT_Y: i32 = 20;
const LATERAL_CHOICES: [i32; 6] = [-3, -2, -1, 1, 2, 3];

// ════════════════════════════════════════════════════════════════════════════
// Fruit
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Fruit {
    pub position: (i32, i32),
    pub velocity: (i32, i32),
    pub color:    u32,
    pub size:     i32,
}

impl Fruit {
    fn step(&mut self) {
        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FruitNinjaGame
// ════════════════════════════════════════════════════════════════════════════

pub struct FruitNinjaGame {
    fruits:      Vec<Fruit>,
    score:       u32,
    lives:       i32,
    level:       u32,
    spawn_rate:  f64,
    speed:       (i32, i32),
    game_over:   bool,

    slash:       Vec<(i32, i32)>,
    slash_color: u32,

    /// Unset until the first tick after construction or reset.
    next_spawn:  Option<f64>,
    last_tick:   Option<f64>,
    fps:         f64,

    rng:         StdRng,
}

impl FruitNinjaGame {
    pub fn new() -> Self {
        FruitNinjaGame::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        FruitNinjaGame::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        FruitNinjaGame {
            fruits:      Vec::new(),
            score:       0,
            lives:       BASE_LIVES,
            level:       1,
            spawn_rate:  BASE_SPAWN_RATE,
            speed:       BASE_SPEED,
            game_over:   false,
            slash:       Vec::new(),
            slash_color: colors::GREEN,
            next_spawn:  None,
            last_tick:   None,
            fps:         0.0,
            rng,
        }
    }

    pub fn fruits(&self) -> &[Fruit] { &self.fruits }
    pub fn spawn_rate(&self) -> f64 { self.spawn_rate }
    pub fn level(&self) -> u32 { self.level }
    pub fn lives(&self) -> i32 { self.lives }
    pub fn next_spawn(&self) -> Option<f64> { self.next_spawn }
    pub fn slash(&self) -> &[(i32, i32)] { &self.slash }
    pub fn slash_color(&self) -> u32 { self.slash_color }

    // ── Spawning ──────────────────────────────────────────────────────────

    fn maybe_spawn(&mut self, w: i32, h: i32, now: f64) {
        if self.game_over {
            return;
        }
        let due = *self.next_spawn.get_or_insert(now + FIRST_SPAWN_DELAY);
        if now >= due {
            self.spawn_fruit(w, h);
            self.next_spawn = Some(now + 1.0 / self.spawn_rate.max(MIN_SPAWN_RATE));
        }
    }

    fn spawn_fruit(&mut self, w: i32, h: i32) {
        let x = self.rng.gen_range(50..=(w - 50).max(100));
        let y = h + FRUIT_SIZE;
        let vx = if self.speed.0 == 0 {
            LATERAL_CHOICES.choose(&mut self.rng).copied().unwrap_or(1)
        } else {
            self.speed.0
        };
        let color = rgb(
            self.rng.gen_range(50..=255),
            self.rng.gen_range(50..=255),
            self.rng.gen_range(50..=255),
        );
        self.fruits.push(Fruit {
            position: (x, y),
            velocity: (vx, -self.speed.1),
            color,
            size: FRUIT_SIZE,
        });
    }

    // ── Per-tick stages ───────────────────────────────────────────────────

    /// Move, draw, and drop escaped fruit.
    fn move_fruits(&mut self, frame: &mut Canvas, w: i32) {
        if self.game_over {
            for f in &self.fruits {
                frame.fill_circle(f.position.0, f.position.1, f.size, f.color);
            }
            return;
        }

        let mut escaped = 0;
        self.fruits.retain_mut(|f| {
            f.step();
            let (cx, cy) = f.position;
            frame.fill_circle(cx, cy, f.size, f.color);
            let gone = cy < TOP_EXIT_Y || cx > w + f.size;
            if gone { escaped += 1; }
            !gone
        });

        if escaped > 0 {
            self.lives -= escaped;
            debug!("{} fruit escaped, {} lives left", escaped, self.lives);
            if self.lives <= 0 {
                debug!("fruit ninja over at score {}", self.score);
                self.game_over = true;
                self.fruits.clear();
            }
        }
    }

    fn slash_and_slice(&mut self, tip: Option<(i32, i32)>) {
        match tip {
            Some(p) if !self.game_over => {
                self.slash.push(p);
                if self.slash.len() > SLASH_LENGTH {
                    let excess = self.slash.len() - SLASH_LENGTH;
                    self.slash.drain(..excess);
                }
            }
            _ => {
                if !self.slash.is_empty() {
                    self.slash.remove(0);
                }
            }
        }

        let Some(tip) = tip else { return };
        if self.game_over {
            return;
        }

        let mut i = 0;
        while i < self.fruits.len() {
            let f = &self.fruits[i];
            if gesture_core::geometry::pixel_distance(tip, f.position) < FRUIT_SIZE as f64 {
                let sliced = self.fruits.remove(i);
                self.score += SLICE_POINTS;
                self.slash_color = sliced.color;
                self.update_difficulty();
            } else {
                i += 1;
            }
        }
    }

    fn update_difficulty(&mut self) {
        if self.score == 0 || self.score % POINTS_PER_LEVEL != 0 {
            return;
        }
        self.level = self.score / POINTS_PER_LEVEL + 1;
        self.spawn_rate = self.level as f64 * 4.0 / 5.0;
        if self.speed.0 != 0 {
            self.speed.0 *= self.level as i32;
        }
        self.speed.1 = 5 * self.level as i32 / 2;
        debug!("fruit ninja level {} spawn rate {:.1}", self.level, self.spawn_rate);
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    fn draw_hud(&mut self, frame: &mut Canvas, now: f64) {
        let dt = self.last_tick.map_or(1.0, |t| (now - t).max(1e-3));
        self.fps = 1.0 / dt;
        self.last_tick = Some(now);

        frame.fill_rect(10, 10, 290, 90, colors::BLACK);
        frame.draw_text(&format!("SCORE: {}", self.score), 20, 20, 3, colors::YELLOW);
        frame.draw_text(&format!("LIVES: {}", self.lives), 20, 45, 3, colors::ORANGE);
        frame.draw_text(&format!("LEVEL: {}", self.level), 20, 70, 3, colors::GREEN);
        let w = frame.width() as i32;
        frame.draw_text(&format!("FPS: {:.1}", self.fps), w - 140, 20, 2, colors::WHITE);
    }
}

impl Default for FruitNinjaGame {
    fn default() -> Self { FruitNinjaGame::new() }
}

impl Game for FruitNinjaGame {
    type Input = Option<(i32, i32)>;

    fn name(&self) -> &'static str { "Fruit Ninja" }

    fn reset(&mut self) {
        self.fruits.clear();
        self.score = 0;
        self.lives = BASE_LIVES;
        self.level = 1;
        self.spawn_rate = BASE_SPAWN_RATE;
        self.speed = BASE_SPEED;
        self.game_over = false;
        self.slash.clear();
        self.slash_color = colors::GREEN;
        self.next_spawn = None;
        self.last_tick = None;
    }

    fn update(&mut self, mut frame: Canvas, tip: Option<(i32, i32)>, now: f64) -> Canvas {
        if !frame.is_valid() {
            return frame;
        }
        let (w, h) = (frame.width() as i32, frame.height() as i32);

        self.maybe_spawn(w, h, now);
        self.move_fruits(&mut frame, w);
        self.slash_and_slice(tip);
        frame.draw_polyline(&self.slash, 4, self.slash_color);
        self.draw_hud(&mut frame, now);
        if self.game_over {
            draw_game_over(&mut frame, "PRESS RESET TO PLAY AGAIN");
        }
        frame
    }

    fn state(&self) -> GameSnapshot {
        GameSnapshot {
            score:     self.score,
            game_over: self.game_over,
            lives:     Some(self.lives),
            level:     Some(self.level),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
