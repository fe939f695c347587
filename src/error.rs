//! Error types for the simulation core
//!
//! Gameplay itself has no failure modes: game over is a normal terminal
//! state. The only errors are a full pool (which callers drop on the floor)
//! and bad tuning files.

use thiserror::Error;

/// Errors raised inside the simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Every slot in a fixed-capacity pool is in use
    #[error("pool exhausted: all {capacity} slots active")]
    PoolExhausted { capacity: usize },
}

/// Errors loading or validating a tuning file
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its legal range
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
