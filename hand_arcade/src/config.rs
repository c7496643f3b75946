//! Runner configuration: window, starting game, inference rate, seed, and
//! the gesture pipeline settings.  Loaded from JSON; every field optional.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use arcade_games::presentation::DEFAULT_SLIDES;
use gesture_core::PipelineConfig;

use crate::arcade::GameKind;

const MIN_WINDOW: usize = 160;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub width:        usize,
    pub height:       usize,
    pub game:         GameKind,
    /// Inference cycles per second.
    pub inference_hz: f64,
    /// Fixed seed for spawns, food and serves.
    pub seed:         Option<u64>,
    /// Placeholder slides in the presentation deck.
    pub slides:       u32,
    pub pipeline:     PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:        960,
            height:       720,
            game:         GameKind::Snake,
            inference_hz: 20.0,
            seed:         None,
            slides:       DEFAULT_SLIDES,
            pipeline:     PipelineConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: AppConfig = serde_json::from_str(text).context("parsing config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let cfg = AppConfig::from_json(&text)
                    .with_context(|| format!("loading {}", path.display()))?;
                info!("config loaded from {}", path.display());
                Ok(cfg)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{} not found, using defaults", path.display());
                Ok(AppConfig::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_WINDOW || self.height < MIN_WINDOW {
            bail!(
                "window must be at least {}x{}, got {}x{}",
                MIN_WINDOW, MIN_WINDOW, self.width, self.height
            );
        }
        if !(self.inference_hz.is_finite() && (1.0..=240.0).contains(&self.inference_hz)) {
            bail!("inference_hz must be within 1..=240, got {}", self.inference_hz);
        }
        if self.slides == 0 {
            bail!("slides must be at least 1");
        }
        self.pipeline.validate().context("invalid pipeline settings")?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::JumpSource;

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let cfg = AppConfig::from_json(
            r#"{"game":"pong","seed":7,"pipeline":{"jump_source":"transition"}}"#,
        ).unwrap();
        assert_eq!(cfg.game, GameKind::Pong);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.pipeline.jump_source, JumpSource::Transition);
        assert_eq!(cfg.width, 960);
        assert_eq!(cfg.inference_hz, 20.0);
        assert_eq!(cfg.pipeline.pinch.threshold, 0.05);
        assert_eq!(cfg.slides, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_json(r#"{"width":10}"#).is_err());
        assert!(AppConfig::from_json(r#"{"inference_hz":0}"#).is_err());
        assert!(AppConfig::from_json(r#"{"pipeline":{"transition_cooldown":-1}}"#).is_err());
        assert!(AppConfig::from_json(r#"{"game":"tetris"}"#).is_err());
        assert!(AppConfig::from_json(r#"{"slides":0}"#).is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("hand_arcade_no_such_config.json");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn round_trips_through_a_file() {
        let path = std::env::temp_dir().join(format!("hand_arcade_cfg_{}.json", std::process::id()));
        let cfg = AppConfig { game: GameKind::Whiteboard, seed: Some(3), ..Default::default() };
        fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }
}
