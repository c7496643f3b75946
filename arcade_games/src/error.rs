use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("pixel buffer holds {got} pixels, {width}x{height} needs {expected}")]
    CanvasSize { width: usize, height: usize, expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
