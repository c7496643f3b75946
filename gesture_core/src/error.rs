//! Errors raised at the construction boundaries of the pipeline.
//!
//! Per-frame operations never fail; only building a [`HandFrame`] from
//! external data or validating a configuration can.
//!
//! [`HandFrame`]: crate::landmark::HandFrame

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("expected {expected} landmarks, got {got}")]
    LandmarkCount { expected: usize, got: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
