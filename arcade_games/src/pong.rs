//! Single-player Pong against a deliberately slow AI.
//!
//! The player paddle sits on the left and follows the hand; a ball that
//! gets past it ends the game.  The right wall behind the AI is a backstop:
//! the ball bounces back and nobody scores.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::canvas::{colors, Canvas};
use crate::{draw_game_over, Game, GameSnapshot};

const DEFAULT_WIDTH: i32 = 640;
const DEFAULT_HEIGHT: i32 = 480;

const PADDLE_WIDTH: i32 = 15;
const PADDLE_HEIGHT: i32 = 100;
const PADDLE_INSET: i32 = 30;

const BALL_SIZE: i32 = 12;
const SERVE_SPEED_X: f32 = 6.0;
const SERVE_SPEEDS_Y: [f32; 4] = [-4.0, -3.0, 3.0, 4.0];
const SPEEDUP: f32 = 0.5;
const HITS_PER_SPEEDUP: u32 = 3;
/// Vertical speed at the very edge of a paddle.
const ANGLE_SCALE: f32 = 10.0;

const AI_REACTION_DELAY: f64 = 0.05;
const AI_MAX_SPEED: i32 = 6;
const AI_DEAD_BAND: f32 = 10.0;

pub struct PongGame {
    width:     i32,
    height:    i32,

    player_y:  i32,
    ai_y:      i32,

    ball:      (f32, f32),
    velocity:  (f32, f32),

    score:     u32,
    game_over: bool,
    last_ai:   Option<f64>,
    rng:       StdRng,
}

impl PongGame {
    pub fn new() -> Self {
        PongGame::with_rng(StdRng::from_entropy())
    }

    /// Deterministic serve direction.
    pub fn with_seed(seed: u64) -> Self {
        PongGame::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut game = PongGame {
            width:     DEFAULT_WIDTH,
            height:    DEFAULT_HEIGHT,
            player_y:  0,
            ai_y:      0,
            ball:      (0.0, 0.0),
            velocity:  (0.0, 0.0),
            score:     0,
            game_over: false,
            last_ai:   None,
            rng,
        };
        game.serve();
        game
    }

    pub fn ball(&self) -> (f32, f32) { self.ball }
    pub fn velocity(&self) -> (f32, f32) { self.velocity }
    pub fn player_y(&self) -> i32 { self.player_y }
    pub fn ai_y(&self) -> i32 { self.ai_y }

    fn ai_x(&self) -> i32 { self.width - PADDLE_INSET - PADDLE_WIDTH }

    fn serve(&mut self) {
        let mid = self.height / 2 - PADDLE_HEIGHT / 2;
        self.player_y = mid;
        self.ai_y = mid;
        self.ball = ((self.width / 2) as f32, (self.height / 2) as f32);
        let vy = SERVE_SPEEDS_Y.choose(&mut self.rng).copied().unwrap_or(SERVE_SPEEDS_Y[3]);
        self.velocity = (SERVE_SPEED_X, vy);
    }

    fn fit_to(&mut self, w: i32, h: i32) {
        if (w, h) == (self.width, self.height) {
            return;
        }
        let rx = w as f32 / self.width as f32;
        let ry = h as f32 / self.height as f32;
        self.player_y = (self.player_y as f32 * ry) as i32;
        self.ai_y = (self.ai_y as f32 * ry) as i32;
        self.ball = (self.ball.0 * rx, self.ball.1 * ry);
        self.width = w;
        self.height = h;
    }

    fn max_paddle_y(&self) -> i32 {
        (self.height - PADDLE_HEIGHT).max(0)
    }

    // ── Per-tick stages ───────────────────────────────────────────────────

    /// Out-of-range or missing hand leaves the paddle where it is.
    fn move_player(&mut self, hand_y: Option<f32>) {
        let Some(y) = hand_y.filter(|y| (0.0..=1.0).contains(y)) else { return };
        let target = (y * self.height as f32) as i32 - PADDLE_HEIGHT / 2;
        self.player_y = target.clamp(0, self.max_paddle_y());
    }

    fn move_ai(&mut self, now: f64) {
        let last = *self.last_ai.get_or_insert(now);
        if now - last <= AI_REACTION_DELAY {
            return;
        }
        let centre = (self.ai_y + PADDLE_HEIGHT / 2) as f32;
        if self.ball.1 < centre - AI_DEAD_BAND {
            self.ai_y -= AI_MAX_SPEED;
        } else if self.ball.1 > centre + AI_DEAD_BAND {
            self.ai_y += AI_MAX_SPEED;
        }
        self.ai_y = self.ai_y.clamp(0, self.max_paddle_y());
        self.last_ai = Some(now);
    }

    fn move_ball(&mut self) {
        let half = (BALL_SIZE / 2) as f32;
        let pw = PADDLE_WIDTH as f32;
        let h = self.height as f32;

        self.ball.0 += self.velocity.0;
        self.ball.1 += self.velocity.1;
        let (bx, by) = self.ball;

        if by <= half || by >= h - half {
            self.velocity.1 = -self.velocity.1;
            self.ball.1 = by.clamp(half, (h - half).max(half));
        }

        let px = PADDLE_INSET as f32;
        if self.velocity.0 < 0.0 && bx - half <= px + pw && bx + half >= px {
            if let Some(hit) = hit_fraction(self.ball.1, self.player_y) {
                self.velocity.0 = self.velocity.0.abs();
                self.score += 1;
                if self.score % HITS_PER_SPEEDUP == 0 {
                    self.velocity.0 += SPEEDUP;
                    debug!("pong ball speed {:.1} at score {}", self.velocity.0, self.score);
                }
                self.velocity.1 = (hit - 0.5) * ANGLE_SCALE;
            }
        }

        let ax = self.ai_x() as f32;
        if self.velocity.0 > 0.0 && bx + half >= ax && bx - half <= ax + pw {
            if let Some(hit) = hit_fraction(self.ball.1, self.ai_y) {
                self.velocity.0 = -self.velocity.0.abs();
                self.velocity.1 = (hit - 0.5) * ANGLE_SCALE;
            }
        }

        if bx < 0.0 {
            debug!("pong ball missed, final score {}", self.score);
            self.game_over = true;
        } else if bx > self.width as f32 {
            self.ball.0 = (self.width - 5) as f32;
            self.velocity.0 = -self.velocity.0.abs();
        }
    }

    fn draw(&self, frame: &mut Canvas) {
        let cx = self.width / 2;
        for y in (0..self.height).step_by(20) {
            frame.draw_line(cx, y, cx, y + 10, 2, colors::GRAY);
        }
        frame.fill_rect(PADDLE_INSET, self.player_y, PADDLE_WIDTH, PADDLE_HEIGHT, colors::GREEN);
        frame.fill_rect(self.ai_x(), self.ai_y, PADDLE_WIDTH, PADDLE_HEIGHT, colors::RED);
        frame.fill_circle(self.ball.0 as i32, self.ball.1 as i32, BALL_SIZE / 2, colors::BLUE);
        frame.draw_text_centered(&format!("SCORE: {}", self.score), 30, 3, colors::WHITE);
    }
}

/// Where `ball_y` meets a paddle whose top is `paddle_y`, 0 at the top edge
/// and 1 at the bottom; `None` when it misses.
fn hit_fraction(ball_y: f32, paddle_y: i32) -> Option<f32> {
    let top = paddle_y as f32;
    let bottom = top + PADDLE_HEIGHT as f32;
    (top..=bottom).contains(&ball_y).then(|| (ball_y - top) / PADDLE_HEIGHT as f32)
}

impl Default for PongGame {
    fn default() -> Self { PongGame::new() }
}

impl Game for PongGame {
    type Input = Option<f32>;

    fn name(&self) -> &'static str { "Pong" }

    fn reset(&mut self) {
        self.score = 0;
        self.game_over = false;
        self.last_ai = None;
        self.serve();
    }

    fn update(&mut self, mut frame: Canvas, hand_y: Option<f32>, now: f64) -> Canvas {
        if !frame.is_valid() {
            return frame;
        }
        self.fit_to(frame.width() as i32, frame.height() as i32);
        if !self.game_over {
            self.move_player(hand_y);
            self.move_ai(now);
            self.move_ball();
        }
        self.draw(&mut frame);
        if self.game_over {
            draw_game_over(&mut frame, &format!("FINAL SCORE: {}", self.score));
        }
        frame
    }

    fn state(&self) -> GameSnapshot {
        GameSnapshot { score: self.score, game_over: self.game_over, lives: None, level: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Canvas { Canvas::new(640, 480) }

    fn place(g: &mut PongGame, ball: (f32, f32), velocity: (f32, f32)) {
        g.ball = ball;
        g.velocity = velocity;
    }

    #[test]
    fn serve_starts_centred() {
        let g = PongGame::with_seed(1);
        assert_eq!(g.ball(), (320.0, 240.0));
        assert_eq!(g.velocity().0, SERVE_SPEED_X);
        assert!(SERVE_SPEEDS_Y.contains(&g.velocity().1));
        assert_eq!(g.player_y(), 190);
        assert_eq!(g.ai_y(), 190);
    }

    #[test]
    fn ball_past_player_edge_ends_game() {
        let mut g = PongGame::with_seed(1);
        g.player_y = 0;
        place(&mut g, (3.0, 240.0), (-6.0, 0.0));
        let f = g.update(frame(), None, 0.0);
        assert!(g.state().game_over);

        let ball = g.ball();
        g.update(f, Some(0.9), 1.0);
        assert_eq!(g.ball(), ball);
        assert_eq!(g.player_y(), 0);
    }

    #[test]
    fn ai_hit_returns_ball_without_scoring() {
        let mut g = PongGame::with_seed(2);
        place(&mut g, (585.0, 240.0), (6.0, 0.0));
        g.update(frame(), None, 0.0);
        assert_eq!(g.velocity(), (-6.0, 0.0));
        assert_eq!(g.state().score, 0);
    }

    #[test]
    fn player_hits_score_and_speed_up_every_third() {
        let mut g = PongGame::with_seed(3);
        let mut f = frame();
        for hit in 1..=3u32 {
            place(&mut g, (50.0, 240.0), (-6.0, 0.0));
            f = g.update(f, Some(0.5), hit as f64 * 0.01);
            assert_eq!(g.state().score, hit);
        }
        assert_eq!(g.velocity(), (6.5, 0.0));
    }

    #[test]
    fn ball_leaving_paddle_is_not_hit_again() {
        let mut g = PongGame::with_seed(3);
        place(&mut g, (50.0, 240.0), (6.0, 0.0));
        g.update(frame(), Some(0.5), 0.0);
        assert_eq!(g.state().score, 0);
    }

    #[test]
    fn hit_angle_follows_contact_point() {
        let mut g = PongGame::with_seed(4);
        place(&mut g, (50.0, 200.0), (-6.0, 0.0));
        g.update(frame(), Some(0.5), 0.0);
        // Paddle spans 190..290; contact at 0.1 of its height.
        assert!((g.velocity().1 - (-4.0)).abs() < 1e-4);
    }

    #[test]
    fn right_wall_is_a_backstop() {
        let mut g = PongGame::with_seed(5);
        g.ai_y = 0;
        place(&mut g, (638.0, 400.0), (6.0, 0.0));
        g.update(frame(), None, 0.0);
        assert_eq!(g.ball().0, 635.0);
        assert!(g.velocity().0 < 0.0);
        assert_eq!(g.state().score, 0);
        assert!(!g.state().game_over);
    }

    #[test]
    fn out_of_range_hand_is_ignored() {
        let mut g = PongGame::with_seed(6);
        let mut f = g.update(frame(), Some(0.0), 0.0);
        assert_eq!(g.player_y(), 0);
        for y in [Some(1.5), Some(-0.1), Some(f32::NAN), None] {
            f = g.update(f, y, 0.0);
            assert_eq!(g.player_y(), 0);
        }
        g.update(f, Some(1.0), 0.0);
        assert_eq!(g.player_y(), 380);
    }

    #[test]
    fn ai_waits_for_its_reaction_delay() {
        let mut g = PongGame::with_seed(7);
        place(&mut g, (320.0, 50.0), (0.0, 0.0));
        let mut f = g.update(frame(), None, 10.0);
        assert_eq!(g.ai_y(), 190);
        f = g.update(f, None, 10.03);
        assert_eq!(g.ai_y(), 190);
        g.update(f, None, 10.06);
        assert_eq!(g.ai_y(), 184);
    }

    #[test]
    fn walls_bounce_vertically() {
        let mut g = PongGame::with_seed(8);
        place(&mut g, (320.0, 8.0), (1.0, -4.0));
        g.update(frame(), None, 0.0);
        assert_eq!(g.ball().1, 6.0);
        assert_eq!(g.velocity().1, 4.0);
    }

    #[test]
    fn resize_rescales_positions() {
        let mut g = PongGame::with_seed(9);
        place(&mut g, (320.0, 240.0), (0.0, 0.0));
        g.update(Canvas::new(1280, 960), None, 0.0);
        assert_eq!(g.ball(), (640.0, 480.0));
        assert_eq!(g.ai_y(), 380);
        assert_eq!(g.ai_x(), 1280 - 45);
    }

    #[test]
    fn reset_clears_game_over() {
        let mut g = PongGame::with_seed(10);
        place(&mut g, (1.0, 240.0), (-6.0, 0.0));
        g.player_y = 0;
        g.update(frame(), None, 0.0);
        assert!(g.state().game_over);
        g.reset();
        assert_eq!(g.state(), GameSnapshot::default());
        assert_eq!(g.ball(), (320.0, 240.0));
    }
}
