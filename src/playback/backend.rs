//! Outbound interface to a real audio backend.
//!
//! The engine never needs a backend: `NullBackend` keeps the logical clock as
//! the only source of time. A real backend receives the effects of each
//! transition through `sync_backend` and reports progress back as
//! `BackendEvent`s, which the engine treats exactly like clock ticks.

use tracing::trace;

use crate::error::Result;
use crate::library::Track;

use super::types::PlayerState;

/// Progress reported by a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// Elapsed whole seconds of the loaded track.
    Position(u32),
    /// The loaded track played to its end.
    TrackEnded,
}

pub trait AudioBackend {
    fn load(&mut self, track: &Track) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek_to(&mut self, secs: u32) -> Result<()>;
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Backend that does nothing: playback is purely the logical clock.
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn load(&mut self, track: &Track) -> Result<()> {
        trace!(id = %track.id, "null backend: load");
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn seek_to(&mut self, _secs: u32) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }
}

/// What produced a transition, which decides whether a position change must
/// be forwarded as a seek.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A user or remote command.
    Command,
    /// The clock: a tick or a backend progress event.
    Clock,
    /// The current track played out, on the clock or in the backend. The
    /// backend has stopped by then, so whatever track follows is reloaded.
    TrackEnd,
}

/// Mirror the difference between two snapshots onto `backend`.
///
/// A new current track is loaded (and started if playing); a play/pause flip
/// becomes `play`/`pause`; a position jump becomes `seek_to`, except for the
/// clock's own forward steps; a volume change becomes `set_volume`.
///
/// After `Origin::TrackEnd` the resulting track is always reloaded, even when
/// it is the same one at the same position (repeat one, or repeat all over a
/// single track).
pub fn sync_backend(
    backend: &mut dyn AudioBackend,
    before: &PlayerState,
    after: &PlayerState,
    origin: Origin,
) -> Result<()> {
    let track_changed = origin == Origin::TrackEnd
        || before.current_index != after.current_index
        || before.current_track().map(|t| &t.id) != after.current_track().map(|t| &t.id);

    if track_changed {
        if let Some(track) = after.current_track() {
            backend.load(track)?;
            if after.is_playing {
                backend.play()?;
            }
        } else if before.is_playing {
            backend.pause()?;
        }
    } else if before.is_playing != after.is_playing {
        if after.is_playing {
            backend.play()?;
        } else {
            backend.pause()?;
        }
    }

    let position_jump = match origin {
        Origin::Command => before.position_secs != after.position_secs,
        Origin::Clock => after.position_secs < before.position_secs,
        Origin::TrackEnd => false,
    };
    if !track_changed && position_jump && after.current_track().is_some() {
        backend.seek_to(after.position_secs)?;
    }

    if before.volume != after.volume {
        backend.set_volume(after.volume)?;
    }
    Ok(())
}
