//! Playback state and command types.
//!
//! `PlayerState` is the single aggregate the engine owns; everything the view
//! layer sees is a clone of it. `PlayerCmd` is the message form of every
//! engine operation, used by the engine thread and by remote controls.

use std::sync::{Arc, Mutex};

use crate::library::Track;

use super::backend::BackendEvent;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop after the last track of the queue.
    #[default]
    Off,
    /// Restart the current track when it ends.
    One,
    /// Wrap around to the start of the queue.
    All,
}

impl RepeatMode {
    /// Next mode in the `Off -> All -> One -> Off` cycle.
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::One => "one",
            Self::All => "all",
        }
    }
}

/// Coarse player status: the three states of the playback state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Empty,
    Paused,
    Playing,
}

/// Everything the player knows. Only the engine mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Playback order.
    pub queue: Vec<Track>,
    /// Index of the current track in `queue`, `None` when there is none.
    pub current_index: Option<usize>,
    pub is_playing: bool,
    /// Elapsed whole seconds of the current track, never above its duration.
    pub position_secs: u32,
    pub repeat_mode: RepeatMode,
    /// Stored for display only; the queue is never reordered by it.
    pub shuffle_enabled: bool,
    /// Output volume in `[0, 1]`.
    pub volume: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            current_index: None,
            is_playing: false,
            position_secs: 0,
            repeat_mode: RepeatMode::Off,
            shuffle_enabled: false,
            volume: 1.0,
        }
    }
}

impl PlayerState {
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.queue.get(i))
    }

    /// The current index using `-1` for "no current track".
    pub fn current_index_signed(&self) -> i64 {
        self.current_index.map_or(-1, |i| i as i64)
    }

    /// Duration of the current track, 0 without one.
    pub fn duration_secs(&self) -> u32 {
        self.current_track().map_or(0, |t| t.duration_secs)
    }

    /// Fraction of the current track already played, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let duration = self.duration_secs();
        if duration == 0 {
            return 0.0;
        }
        self.position_secs as f32 / duration as f32
    }

    /// Up to `n` tracks queued after the current one. Without a current track
    /// this is the head of the queue, which is what `next()` would start with.
    pub fn up_next(&self, n: usize) -> &[Track] {
        let start = self.current_index.map_or(0, |i| i + 1).min(self.queue.len());
        let end = start.saturating_add(n).min(self.queue.len());
        &self.queue[start..end]
    }

    pub fn status(&self) -> PlaybackStatus {
        match (self.current_track(), self.is_playing) {
            (None, _) => PlaybackStatus::Empty,
            (Some(_), false) => PlaybackStatus::Paused,
            (Some(_), true) => PlaybackStatus::Playing,
        }
    }

    /// Check every structural invariant of the state.
    pub fn is_consistent(&self) -> bool {
        let index_ok = match self.current_index {
            None => true,
            Some(i) => i < self.queue.len(),
        };
        let playing_ok = !self.is_playing || self.current_track().is_some();
        let volume_ok = (0.0..=1.0).contains(&self.volume);
        index_ok && playing_ok && volume_ok && self.position_secs <= self.duration_secs()
    }
}

/// Shared, always-consistent snapshot of the latest published state.
pub type StateHandle = Arc<Mutex<PlayerState>>;

/// Every engine operation in message form.
///
/// Remote controls (media keys, a lock-screen widget, a headset) map onto the
/// same variants: `Play`, `Pause`, `Stop`, `Next`, `Previous` and `Seek`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCmd {
    Play,
    Pause,
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    SkipTo(usize),
    SetQueue {
        tracks: Vec<Track>,
        start_index: usize,
    },
    /// Like `SetQueue`, but `play: false` lands the start track paused.
    LoadQueue {
        tracks: Vec<Track>,
        start_index: usize,
        play: bool,
    },
    AddToQueue(Track),
    RemoveFromQueue(usize),
    ClearQueue,
    ToggleShuffle,
    ToggleRepeat,
    SetRepeatMode(RepeatMode),
    /// Absolute position in seconds; clamped to the current track.
    Seek(i64),
    /// Relative position in seconds, resolved against the live position.
    SeekBy(i64),
    SetVolume(f32),
    PlaySong {
        track: Track,
        queue: Option<Vec<Track>>,
    },
    /// Progress reported by a real audio backend.
    Backend(BackendEvent),
}
