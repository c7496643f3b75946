//! Top-level application state and the render loop.
//!
//! `AppState` owns the game registry and a reader of the shared gesture
//! snapshot.  Each frame it steps the active game with the latest snapshot
//! and draws a status bar; `run` wires it to the window and the inference
//! thread.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use arcade_games::{colors, Canvas};
use gesture_core::{
    shared_gesture_state, Clock, GesturePipeline, GestureReader, GestureSnapshot, SystemClock,
};

use crate::arcade::{fingertip_px, Arcade, GameKind};
use crate::config::AppConfig;
use crate::inference::spawn_inference;
use crate::source::SimLandmarkSource;
use crate::visualizer::{UiEvent, Visualizer, KEY_LEGEND};

const STATUS_H: i32 = 44;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    arcade:    Arcade,
    active:    GameKind,
    reader:    GestureReader,
    width:     usize,
    height:    usize,
    /// Game-over flag of the active game at the previous frame.
    was_over:  bool,
    pub status: String,
}

impl AppState {
    pub fn new(config: &AppConfig, reader: GestureReader) -> Self {
        let arcade = Arcade::new(config.seed);
        arcade.set_presentation(config.slides, config.pipeline.presentation.clone());
        AppState {
            arcade,
            active:   config.game,
            reader,
            width:    config.width,
            height:   config.height,
            was_over: false,
            status:   format!("Ready: {}", config.game.name()),
        }
    }

    pub fn arcade(&self) -> &Arcade { &self.arcade }
    pub fn active(&self) -> GameKind { self.active }

    /// Returns false on quit.
    pub fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Quit => return false,
            UiEvent::SelectGame(kind) => {
                if kind != self.active {
                    info!("switching to {}", kind.name());
                    self.active = kind;
                    self.was_over = self.arcade.state(kind).game_over;
                }
                self.status = format!("Playing {}", kind.name());
            }
            UiEvent::Reset => {
                self.arcade.reset(self.active);
                self.was_over = false;
                self.status = format!("{} reset", self.active.name());
            }
            UiEvent::Undo => {
                if self.active == GameKind::Whiteboard {
                    let undone = self.arcade.with_whiteboard(|wb| wb.undo());
                    self.status = match undone {
                        Some(_) => "Undo".to_string(),
                        None => "Nothing to undo".to_string(),
                    };
                }
            }
            UiEvent::StrokeSize { larger } => {
                if self.active == GameKind::Whiteboard {
                    let size = self.arcade.with_whiteboard(|wb| wb.stroke_sizes_mut().step(larger));
                    self.status = format!("Stroke size {}", size);
                }
            }
        }
        true
    }

    /// Step the active game once and compose the window frame.
    pub fn frame(&mut self, now: f64) -> Canvas {
        let snap = self.reader.snapshot();
        let play_h = (self.height as i32 - STATUS_H).max(1) as usize;

        let mut play = self.arcade.update(
            self.active,
            Canvas::filled(self.width, play_h, colors::BG),
            &snap,
            now,
        );
        if self.active != GameKind::Whiteboard {
            if let Some((x, y)) = fingertip_px(&snap, play.width(), play.height()) {
                play.draw_circle(x, y, 6, colors::WHITE);
            }
        }

        let state = self.arcade.state(self.active);
        if state.game_over && !self.was_over {
            info!("{} over: {}", self.active.name(), self.arcade.state_json(self.active).unwrap_or_default());
            self.status = format!("{} over, press R", self.active.name());
        }
        self.was_over = state.game_over;

        let mut frame = Canvas::filled(self.width, self.height, colors::HUD_BG);
        blit(&mut frame, &play);
        self.draw_status(&mut frame, &snap, state.score);
        frame
    }

    fn draw_status(&self, frame: &mut Canvas, snap: &GestureSnapshot, score: u32) {
        let y = self.height as i32 - STATUS_H;
        frame.fill_rect(0, y, self.width as i32, STATUS_H, colors::HUD_BG);
        let hand = if snap.hand.visible { "" } else { "  NO HAND" };
        let line = format!(
            "{}  |  {}  |  SCORE {}{}  |  {}",
            self.active.name(), snap.gesture.display_name(), score, hand, self.status,
        );
        frame.draw_text(&line, 10, y + 8, 2, colors::WHITE);
        frame.draw_text(KEY_LEGEND, 10, y + 28, 2, colors::GRAY);
    }
}

/// Copy `src` into the top-left corner of `dst`.
fn blit(dst: &mut Canvas, src: &Canvas) {
    for y in 0..src.height() as i32 {
        for x in 0..src.width() as i32 {
            if let Some(c) = src.get(x, y) {
                dst.set_pixel(x, y, c);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window, start inference, and loop until quit.
pub fn run(config: AppConfig) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let pipeline = GesturePipeline::new(config.pipeline.clone())
        .context("building gesture pipeline")?;

    // ── Inference thread (sole publisher) ────────────────────────────────
    let (publisher, reader) = shared_gesture_state();
    let (sim_tx, source) = SimLandmarkSource::channel();
    let inference = spawn_inference(source, pipeline, publisher, Arc::clone(&clock), config.inference_hz);

    // ── Window and app state ─────────────────────────────────────────────
    let mut vis = Visualizer::new(config.width, config.height, sim_tx)?;
    let mut app = AppState::new(&config, reader);
    info!("starting with {} at {}x{}", config.game.name(), config.width, config.height);

    // ── Main loop ─────────────────────────────────────────────────────────
    'frames: while vis.is_open() {
        for event in vis.poll_input() {
            if !app.handle(event) {
                break 'frames;
            }
        }
        let frame = app.frame(clock.now());
        if let Err(e) = vis.present(&frame) {
            warn!("{:#}", e);
            break;
        }
    }

    for kind in GameKind::ALL {
        if let Ok(json) = app.arcade().state_json(kind) {
            info!("final {}: {}", kind.name(), json);
        }
    }
    drop(vis);
    let cycles = inference.stop();
    info!("shut down after {} inference cycles", cycles);
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::{GesturePublisher, HandPosition, PenPosition, WhiteboardAction};

    fn make_app(game: GameKind) -> (AppState, GesturePublisher) {
        let (publisher, reader) = shared_gesture_state();
        let cfg = AppConfig { width: 320, height: 240, game, seed: Some(5), ..Default::default() };
        (AppState::new(&cfg, reader), publisher)
    }

    fn drawing(x: f32, y: f32) -> GestureSnapshot {
        GestureSnapshot {
            action: WhiteboardAction::Draw,
            pen: PenPosition { x, y, pen_down: true },
            hand: HandPosition { x, y, z: 0.0, visible: true },
            ..Default::default()
        }
    }

    #[test]
    fn frame_has_window_size_and_status_bar() {
        let (mut app, _publisher) = make_app(GameKind::Snake);
        let f = app.frame(0.0);
        assert_eq!((f.width(), f.height()), (320, 240));
        assert_eq!(f.get(319, 239), Some(colors::HUD_BG));
    }

    #[test]
    fn select_game_switches_active() {
        let (mut app, _publisher) = make_app(GameKind::Snake);
        assert!(app.handle(UiEvent::SelectGame(GameKind::Pong)));
        assert_eq!(app.active(), GameKind::Pong);
        assert!(!app.handle(UiEvent::Quit));
    }

    #[test]
    fn whiteboard_undo_and_stroke_size() {
        let (mut app, publisher) = make_app(GameKind::Whiteboard);
        publisher.publish(drawing(0.5, 0.5));
        app.frame(0.0);
        assert_eq!(app.arcade().state(GameKind::Whiteboard).score, 1);

        app.handle(UiEvent::StrokeSize { larger: true });
        assert_eq!(app.arcade().with_whiteboard(|wb| wb.stroke_size()), 8);
        app.handle(UiEvent::Undo);
        assert_eq!(app.arcade().state(GameKind::Whiteboard).score, 0);
        assert_eq!(app.status, "Undo");
    }

    #[test]
    fn undo_outside_whiteboard_is_ignored() {
        let (mut app, publisher) = make_app(GameKind::Whiteboard);
        publisher.publish(drawing(0.5, 0.5));
        app.frame(0.0);
        app.handle(UiEvent::SelectGame(GameKind::Snake));
        app.handle(UiEvent::Undo);
        assert_eq!(app.arcade().state(GameKind::Whiteboard).score, 1);
    }

    #[test]
    fn game_over_is_reported_and_reset_clears_it() {
        let (mut app, _publisher) = make_app(GameKind::DinoRun);
        // Without a hand the dino never jumps and runs into the first obstacle.
        let mut t = 0.0;
        while !app.arcade().state(GameKind::DinoRun).game_over && t < 60.0 {
            app.frame(t);
            t += 0.02;
        }
        assert!(app.arcade().state(GameKind::DinoRun).game_over);
        assert_eq!(app.status, "Dino Run over, press R");
        app.handle(UiEvent::Reset);
        assert!(!app.arcade().state(GameKind::DinoRun).game_over);
        assert_eq!(app.status, "Dino Run reset");
    }

    #[test]
    fn slide_count_comes_from_config() {
        let (_publisher, reader) = shared_gesture_state();
        let cfg = AppConfig { slides: 4, game: GameKind::Presentation, ..Default::default() };
        let app = AppState::new(&cfg, reader);
        assert_eq!(app.arcade().with_presentation(|p| p.total_slides()), 4);
    }
}
