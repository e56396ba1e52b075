//! Error types for encore.
//!
//! Playback operations themselves never fail: invalid indices are ignored and
//! out-of-range values are clamped. Errors only come from the edges: loading
//! configuration, talking to an audio backend, or a stopped engine thread.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file or environment could not be read/parsed.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration parsed but holds values the player cannot use.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An audio backend rejected a request.
    #[error("audio backend error: {0}")]
    Backend(String),

    /// The engine thread has shut down and no longer accepts commands.
    #[error("playback engine is not running")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
