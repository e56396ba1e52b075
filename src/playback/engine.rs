//! The playback state machine.
//!
//! `PlaybackEngine` applies every operation synchronously to its owned
//! `PlayerState` and never fails: invalid indices are ignored and numeric
//! inputs are clamped. Time enters only through `tick()` (the logical clock)
//! or `apply_backend_event()` (a real decoder), and both share one
//! end-of-track policy.

use crate::library::Track;

use super::backend::BackendEvent;
use super::types::{PlayerCmd, PlayerState, RepeatMode};

/// `previous()` restarts the current track instead of going back once more
/// than this many seconds have played.
pub const RESTART_THRESHOLD_SECS: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct PlaybackEngine {
    state: PlayerState,
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty engine with the given modes, e.g. from configuration.
    pub fn with_modes(repeat_mode: RepeatMode, shuffle: bool, volume: f32) -> Self {
        let mut engine = Self::new();
        engine.state.repeat_mode = repeat_mode;
        engine.state.shuffle_enabled = shuffle;
        engine.set_volume(volume);
        engine
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Apply one command. Returns `false` when an index-validated operation
    /// was ignored; every other command reports `true`.
    pub fn apply(&mut self, cmd: PlayerCmd) -> bool {
        match cmd {
            PlayerCmd::Play => self.play(),
            PlayerCmd::Pause => self.pause(),
            PlayerCmd::TogglePlayPause => self.toggle_play_pause(),
            PlayerCmd::Stop => self.stop(),
            PlayerCmd::Next => self.next(),
            PlayerCmd::Previous => self.previous(),
            PlayerCmd::SkipTo(index) => return self.skip_to_track(index),
            PlayerCmd::SetQueue {
                tracks,
                start_index,
            } => return self.set_queue(tracks, start_index),
            PlayerCmd::LoadQueue {
                tracks,
                start_index,
                play,
            } => return self.load_queue(tracks, start_index, play),
            PlayerCmd::AddToQueue(track) => self.add_to_queue(track),
            PlayerCmd::RemoveFromQueue(index) => return self.remove_from_queue(index),
            PlayerCmd::ClearQueue => self.clear_queue(),
            PlayerCmd::ToggleShuffle => self.toggle_shuffle(),
            PlayerCmd::ToggleRepeat => self.toggle_repeat(),
            PlayerCmd::SetRepeatMode(mode) => self.set_repeat_mode(mode),
            PlayerCmd::Seek(secs) => self.seek(secs),
            PlayerCmd::SeekBy(delta) => self.seek_by(delta),
            PlayerCmd::SetVolume(v) => self.set_volume(v),
            PlayerCmd::PlaySong { track, queue } => return self.play_song(track, queue),
            PlayerCmd::Backend(event) => self.apply_backend_event(event),
        }
        true
    }

    // Playback controls

    pub fn play(&mut self) {
        if self.state.current_track().is_some() {
            self.state.is_playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn stop(&mut self) {
        self.state.is_playing = false;
        self.state.position_secs = 0;
    }

    // Track navigation

    /// Move to the following track, wrapping only under `RepeatMode::All`.
    /// At the end of the queue without repeat this leaves the state untouched.
    pub fn next(&mut self) {
        let len = self.state.queue.len();
        let next = self.state.current_index.map_or(0, |i| i + 1);
        if next < len {
            self.load(next);
            self.state.is_playing = true;
        } else if self.state.repeat_mode == RepeatMode::All && len > 0 {
            self.load(0);
            self.state.is_playing = true;
        }
    }

    pub fn previous(&mut self) {
        if self.state.position_secs > RESTART_THRESHOLD_SECS {
            self.state.position_secs = 0;
            return;
        }
        match self.state.current_index {
            Some(i) if i > 0 => {
                self.load(i - 1);
                self.state.is_playing = true;
            }
            _ => self.state.position_secs = 0,
        }
    }

    pub fn skip_to_track(&mut self, index: usize) -> bool {
        if index >= self.state.queue.len() {
            return false;
        }
        self.load(index);
        self.state.is_playing = true;
        true
    }

    // Queue management

    /// Replace the queue and start playing `tracks[start_index]`.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) -> bool {
        if start_index >= tracks.len() {
            return false;
        }
        self.state.queue = tracks;
        self.load(start_index);
        self.state.is_playing = true;
        true
    }

    /// `set_queue`, optionally leaving the start track paused. Either way the
    /// queue lands in one transition, so no transient playing state exists.
    pub fn load_queue(&mut self, tracks: Vec<Track>, start_index: usize, play: bool) -> bool {
        if !self.set_queue(tracks, start_index) {
            return false;
        }
        if !play {
            self.pause();
        }
        true
    }

    pub fn add_to_queue(&mut self, track: Track) {
        self.state.queue.push(track);
    }

    /// Remove one queue entry. Removing the current track moves to the entry
    /// that takes its place (or the new last one) without touching the
    /// play/pause flag; removing the only track empties the player.
    pub fn remove_from_queue(&mut self, index: usize) -> bool {
        if index >= self.state.queue.len() {
            return false;
        }
        self.state.queue.remove(index);

        match self.state.current_index {
            Some(cur) if index < cur => self.state.current_index = Some(cur - 1),
            Some(cur) if index == cur => {
                if self.state.queue.is_empty() {
                    self.clear_current();
                } else {
                    let replacement = cur.min(self.state.queue.len() - 1);
                    self.load(replacement);
                }
            }
            _ => {}
        }
        true
    }

    pub fn clear_queue(&mut self) {
        self.state.queue.clear();
        self.clear_current();
    }

    // Playback modes

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle_enabled = !self.state.shuffle_enabled;
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat_mode = self.state.repeat_mode.cycle();
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.state.repeat_mode = mode;
    }

    // Seeking and volume

    pub fn seek(&mut self, secs: i64) {
        let duration = self.state.duration_secs();
        self.state.position_secs = secs.clamp(0, i64::from(duration)) as u32;
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta: i64) {
        let target = i64::from(self.state.position_secs).saturating_add(delta);
        self.seek(target);
    }

    /// Clamp into `[0, 1]`. NaN carries no usable level and is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.state.volume = volume.clamp(0.0, 1.0);
    }

    // Song selection

    /// Play `track`. With a `queue`, the queue replaces the current one and
    /// playback starts at `track` (matched by id, first entry if absent);
    /// without, `track` becomes a queue of its own.
    pub fn play_song(&mut self, track: Track, queue: Option<Vec<Track>>) -> bool {
        match queue {
            Some(queue) => {
                let start = queue.iter().position(|t| t.id == track.id).unwrap_or(0);
                self.set_queue(queue, start)
            }
            None => self.set_queue(vec![track], 0),
        }
    }

    // Clock

    /// Whether the clock should be running: playing a loaded track that has
    /// not reached its end.
    pub fn is_ticking(&self) -> bool {
        self.state.is_playing && self.state.position_secs < self.state.duration_secs()
    }

    /// Whether the next `tick()` plays out the current track.
    pub fn tick_ends_track(&self) -> bool {
        self.is_ticking() && self.state.position_secs + 1 >= self.state.duration_secs()
    }

    /// Advance the logical clock by one second. Returns `false` (and changes
    /// nothing) when the clock is not running.
    pub fn tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }
        if self.state.position_secs + 1 < self.state.duration_secs() {
            self.state.position_secs += 1;
        } else {
            self.finish_track();
        }
        true
    }

    /// Consume progress from a real backend in place of `tick()`.
    pub fn apply_backend_event(&mut self, event: BackendEvent) {
        if self.state.current_track().is_none() {
            return;
        }
        match event {
            BackendEvent::Position(secs) => {
                self.state.position_secs = secs.min(self.state.duration_secs());
            }
            BackendEvent::TrackEnded => self.finish_track(),
        }
    }

    /// End-of-track policy, in priority order: repeat the track, wrap the
    /// queue, advance, or stop on the last track.
    fn finish_track(&mut self) {
        let Some(cur) = self.state.current_index else {
            return;
        };
        let last = self.state.queue.len().saturating_sub(1);

        if self.state.repeat_mode == RepeatMode::One {
            self.state.position_secs = 0;
        } else if self.state.repeat_mode == RepeatMode::All && cur == last {
            self.load(0);
        } else if cur < last {
            self.load(cur + 1);
        } else {
            self.state.is_playing = false;
            self.state.position_secs = 0;
        }
    }

    fn load(&mut self, index: usize) {
        self.state.current_index = Some(index);
        self.state.position_secs = 0;
    }

    fn clear_current(&mut self) {
        self.state.current_index = None;
        self.state.is_playing = false;
        self.state.position_secs = 0;
    }
}
