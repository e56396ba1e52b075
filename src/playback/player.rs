use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::PlaybackSettings;
use crate::error::{Error, Result};
use crate::library::Track;

use super::backend::{AudioBackend, BackendEvent, NullBackend};
use super::engine::PlaybackEngine;
use super::thread::{Msg, spawn_engine_thread};
use super::types::{PlayerCmd, PlayerState, RepeatMode, StateHandle};

/// How a `Player` starts out.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Period of the logical clock. `None` disables it, leaving the backend's
    /// `BackendEvent`s as the only source of time.
    pub tick: Option<Duration>,
    pub repeat_mode: RepeatMode,
    pub shuffle: bool,
    pub volume: f32,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            tick: Some(Duration::from_secs(1)),
            repeat_mode: RepeatMode::Off,
            shuffle: false,
            volume: 1.0,
        }
    }
}

impl From<&PlaybackSettings> for PlayerOptions {
    fn from(s: &PlaybackSettings) -> Self {
        Self {
            tick: Some(Duration::from_millis(s.tick_ms.max(1))),
            repeat_mode: s.repeat_mode.into(),
            shuffle: s.shuffle,
            volume: s.volume,
        }
    }
}

/// Handle to a running playback engine.
///
/// The engine lives on its own thread and is the only writer of the state.
/// Every method here just queues a command; `state()` and `subscribe()` only
/// ever see fully applied transitions.
pub struct Player {
    tx: Sender<Msg>,
    snapshot: StateHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    /// Start a player driven by the logical clock alone.
    pub fn new(options: PlayerOptions) -> Self {
        Self::with_backend(options, Box::new(NullBackend))
    }

    /// Start a player that mirrors every transition onto `backend`.
    pub fn with_backend(options: PlayerOptions, backend: Box<dyn AudioBackend + Send>) -> Self {
        let (tx, rx) = mpsc::channel::<Msg>();
        let engine = PlaybackEngine::with_modes(options.repeat_mode, options.shuffle, options.volume);
        let snapshot: StateHandle = Arc::new(Mutex::new(engine.state().clone()));

        let handle = spawn_engine_thread(engine, options.tick, backend, rx, snapshot.clone());

        Self {
            tx,
            snapshot,
            join: Mutex::new(Some(handle)),
        }
    }

    /// The latest published state.
    pub fn state(&self) -> PlayerState {
        match self.snapshot.lock() {
            Ok(s) => s.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Receive the current state immediately, then a fresh snapshot after
    /// every change. The stream ends when the player shuts down.
    pub fn subscribe(&self) -> Result<Receiver<PlayerState>> {
        let (tx, rx) = mpsc::channel();
        self.tx
            .send(Msg::Subscribe(tx))
            .map_err(|_| Error::Disconnected)?;
        Ok(rx)
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<()> {
        self.tx.send(Msg::Cmd(cmd)).map_err(|_| Error::Disconnected)
    }

    pub fn play(&self) -> Result<()> {
        self.send(PlayerCmd::Play)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(PlayerCmd::Pause)
    }

    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(PlayerCmd::TogglePlayPause)
    }

    pub fn stop(&self) -> Result<()> {
        self.send(PlayerCmd::Stop)
    }

    pub fn next(&self) -> Result<()> {
        self.send(PlayerCmd::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(PlayerCmd::Previous)
    }

    pub fn skip_to_track(&self, index: usize) -> Result<()> {
        self.send(PlayerCmd::SkipTo(index))
    }

    pub fn set_queue(&self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        self.send(PlayerCmd::SetQueue {
            tracks,
            start_index,
        })
    }

    pub fn load_queue(&self, tracks: Vec<Track>, start_index: usize, play: bool) -> Result<()> {
        self.send(PlayerCmd::LoadQueue {
            tracks,
            start_index,
            play,
        })
    }

    pub fn add_to_queue(&self, track: Track) -> Result<()> {
        self.send(PlayerCmd::AddToQueue(track))
    }

    pub fn remove_from_queue(&self, index: usize) -> Result<()> {
        self.send(PlayerCmd::RemoveFromQueue(index))
    }

    pub fn clear_queue(&self) -> Result<()> {
        self.send(PlayerCmd::ClearQueue)
    }

    pub fn toggle_shuffle(&self) -> Result<()> {
        self.send(PlayerCmd::ToggleShuffle)
    }

    pub fn toggle_repeat(&self) -> Result<()> {
        self.send(PlayerCmd::ToggleRepeat)
    }

    pub fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()> {
        self.send(PlayerCmd::SetRepeatMode(mode))
    }

    pub fn seek(&self, secs: i64) -> Result<()> {
        self.send(PlayerCmd::Seek(secs))
    }

    pub fn seek_by(&self, delta: i64) -> Result<()> {
        self.send(PlayerCmd::SeekBy(delta))
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.send(PlayerCmd::SetVolume(volume))
    }

    pub fn play_song(&self, track: Track, queue: Option<Vec<Track>>) -> Result<()> {
        self.send(PlayerCmd::PlaySong { track, queue })
    }

    /// Feed progress from a real audio backend into the engine.
    pub fn backend_event(&self, event: BackendEvent) -> Result<()> {
        self.send(PlayerCmd::Backend(event))
    }

    /// Stop the engine thread and wait for it. Safe to call more than once.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Msg::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}
