//! encore: the playback state machine and queue engine of a personal music player.
//!
//! The [`playback::PlaybackEngine`] owns a single [`playback::PlayerState`] and
//! every rule for changing it. [`playback::Player`] runs that engine on its own
//! thread, drives the one-second logical clock and publishes snapshots to
//! readers and subscribers.

pub mod config;
pub mod error;
pub mod library;
pub mod playback;

pub use error::{Error, Result};
pub use library::Track;
pub use playback::{
    AudioBackend, BackendEvent, PlaybackEngine, PlaybackStatus, Player, PlayerCmd, PlayerOptions,
    PlayerState, RepeatMode,
};
