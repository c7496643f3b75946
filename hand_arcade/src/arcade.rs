//! Game registry.
//!
//! One instance of every game, each behind its own lock so a render and a
//! reset arriving together cannot interleave inside an engine.  The
//! registry also turns a [`GestureSnapshot`] into each game's control
//! signal.

use clap::ValueEnum;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use arcade_games::{
    Canvas, DinoRunGame, FruitNinjaGame, Game, GameSnapshot, PongGame, Presentation, SnakeGame,
    Whiteboard, WhiteboardInput,
};
use gesture_core::{GestureSnapshot, PresentationConfig};

// ════════════════════════════════════════════════════════════════════════════
// GameKind
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    #[default]
    Snake,
    FruitNinja,
    DinoRun,
    Pong,
    Whiteboard,
    Presentation,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::Snake,
        GameKind::FruitNinja,
        GameKind::DinoRun,
        GameKind::Pong,
        GameKind::Whiteboard,
        GameKind::Presentation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Snake      => "Snake",
            GameKind::FruitNinja => "Fruit Ninja",
            GameKind::DinoRun    => "Dino Run",
            GameKind::Pong       => "Pong",
            GameKind::Whiteboard => "Whiteboard",
            GameKind::Presentation => "Presentation",
        }
    }

    /// Zero-based slot, matching the F1–F6 / 1–6 keys.
    pub fn from_slot(slot: usize) -> Option<GameKind> {
        GameKind::ALL.get(slot).copied()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Control mapping
// ════════════════════════════════════════════════════════════════════════════

/// Index fingertip in pixels of a `width`×`height` frame.
pub fn fingertip_px(s: &GestureSnapshot, width: usize, height: usize) -> Option<(i32, i32)> {
    s.hand.visible.then(|| {
        ((s.hand.x * width as f32) as i32, (s.hand.y * height as f32) as i32)
    })
}

/// Normalized hand height for the Pong paddle.
pub fn paddle_y(s: &GestureSnapshot) -> Option<f32> {
    s.hand.visible.then_some(s.hand.y)
}

// ════════════════════════════════════════════════════════════════════════════
// Arcade
// ════════════════════════════════════════════════════════════════════════════

pub struct Arcade {
    snake:      Mutex<SnakeGame>,
    fruit:      Mutex<FruitNinjaGame>,
    dino:       Mutex<DinoRunGame>,
    pong:       Mutex<PongGame>,
    whiteboard: Mutex<Whiteboard>,
    slides:     Mutex<Presentation>,
    /// Jump count already handed to Dino-Run.
    jumps_seen: Mutex<u64>,
}

impl Arcade {
    /// `seed` makes every randomized game deterministic.
    pub fn new(seed: Option<u64>) -> Self {
        let (snake, fruit, pong) = match seed {
            Some(s) => (
                SnakeGame::with_seed(s),
                FruitNinjaGame::with_seed(s.wrapping_add(1)),
                PongGame::with_seed(s.wrapping_add(2)),
            ),
            None => (SnakeGame::new(), FruitNinjaGame::new(), PongGame::new()),
        };
        Arcade {
            snake:      Mutex::new(snake),
            fruit:      Mutex::new(fruit),
            dino:       Mutex::new(DinoRunGame::new()),
            pong:       Mutex::new(pong),
            whiteboard: Mutex::new(Whiteboard::new()),
            slides:     Mutex::new(Presentation::default()),
            jumps_seen: Mutex::new(0),
        }
    }

    /// Step `kind` once with the control signal derived from `s`.
    pub fn update(&self, kind: GameKind, frame: Canvas, s: &GestureSnapshot, now: f64) -> Canvas {
        let jump = {
            let mut seen = self.jumps_seen.lock();
            let fired = s.jump_count > *seen;
            *seen = s.jump_count;
            fired
        };
        let (w, h) = (frame.width(), frame.height());

        match kind {
            GameKind::Snake      => self.snake.lock().update(frame, fingertip_px(s, w, h), now),
            GameKind::FruitNinja => self.fruit.lock().update(frame, fingertip_px(s, w, h), now),
            GameKind::DinoRun    => self.dino.lock().update(frame, jump, now),
            GameKind::Pong       => self.pong.lock().update(frame, paddle_y(s), now),
            GameKind::Whiteboard => {
                self.whiteboard.lock().update(frame, WhiteboardInput::from_snapshot(s), now)
            }
            GameKind::Presentation => self.slides.lock().update(frame, s.gesture, now),
        }
    }

    pub fn reset(&self, kind: GameKind) {
        info!("reset {}", kind.name());
        match kind {
            GameKind::Snake      => self.snake.lock().reset(),
            GameKind::FruitNinja => self.fruit.lock().reset(),
            GameKind::DinoRun    => self.dino.lock().reset(),
            GameKind::Pong       => self.pong.lock().reset(),
            GameKind::Whiteboard => self.whiteboard.lock().reset(),
            GameKind::Presentation => self.slides.lock().reset(),
        }
    }

    pub fn state(&self, kind: GameKind) -> GameSnapshot {
        match kind {
            GameKind::Snake      => self.snake.lock().state(),
            GameKind::FruitNinja => self.fruit.lock().state(),
            GameKind::DinoRun    => self.dino.lock().state(),
            GameKind::Pong       => self.pong.lock().state(),
            GameKind::Whiteboard => self.whiteboard.lock().state(),
            GameKind::Presentation => self.slides.lock().state(),
        }
    }

    /// `{"score":…, "gameOver":…}` as a polling client would read it.
    pub fn state_json(&self, kind: GameKind) -> serde_json::Result<String> {
        serde_json::to_string(&self.state(kind))
    }

    /// Run `f` on the whiteboard under its lock.
    pub fn with_whiteboard<R>(&self, f: impl FnOnce(&mut Whiteboard) -> R) -> R {
        let mut wb = self.whiteboard.lock();
        let out = f(&mut wb);
        debug!("whiteboard: {} strokes, size {}", wb.strokes().len(), wb.stroke_size());
        out
    }

    /// Replace the deck with `total_slides` placeholder slides.
    pub fn set_presentation(&self, total_slides: u32, config: PresentationConfig) {
        let deck = Presentation::with_config(total_slides, config);
        info!("presentation deck of {} slides", deck.total_slides());
        *self.slides.lock() = deck;
    }

    /// Run `f` on the presentation under its lock.
    pub fn with_presentation<R>(&self, f: impl FnOnce(&mut Presentation) -> R) -> R {
        f(&mut self.slides.lock())
    }
}

impl Default for Arcade {
    fn default() -> Self { Arcade::new(None) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
