//! Playback: the state machine, its clock and the thread that owns them.
//!
//! `PlaybackEngine` is the pure, synchronous core and can be driven directly.
//! `Player` runs an engine on a dedicated thread, serializing commands and
//! clock ticks, and publishes every resulting state to readers.

mod backend;
mod engine;
mod player;
mod thread;
mod ticker;
mod types;

pub use backend::{AudioBackend, BackendEvent, NullBackend, Origin, sync_backend};
pub use engine::{PlaybackEngine, RESTART_THRESHOLD_SECS};
pub use player::{Player, PlayerOptions};
pub use ticker::Ticker;
pub use types::{PlaybackStatus, PlayerCmd, PlayerState, RepeatMode, StateHandle};
