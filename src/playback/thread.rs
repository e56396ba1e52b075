//! The engine thread: sole owner of the engine and everything it drives.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::backend::{AudioBackend, BackendEvent, Origin, sync_backend};
use super::engine::PlaybackEngine;
use super::ticker::Ticker;
use super::types::{PlayerCmd, PlayerState, StateHandle};

/// Messages understood by the engine thread.
#[derive(Debug)]
pub(super) enum Msg {
    Cmd(PlayerCmd),
    Subscribe(Sender<PlayerState>),
    Quit,
}

/// What the clock cares about: whether it runs and for which track.
#[derive(Debug, PartialEq)]
struct ClockKey {
    playing: bool,
    index: Option<usize>,
    track_id: Option<String>,
    queue_empty: bool,
}

impl ClockKey {
    fn of(state: &PlayerState) -> Self {
        Self {
            playing: state.is_playing,
            index: state.current_index,
            track_id: state.current_track().map(|t| t.id.clone()),
            queue_empty: state.queue.is_empty(),
        }
    }
}

struct EngineLoop {
    engine: PlaybackEngine,
    ticker: Ticker,
    /// When false, time only advances through backend events.
    logical_clock: bool,
    backend: Box<dyn AudioBackend + Send>,
    snapshot: StateHandle,
    subscribers: Vec<Sender<PlayerState>>,
}

impl EngineLoop {
    /// Run one atomic step and publish its result.
    ///
    /// A track end reaches the backend even when the state comes out
    /// unchanged: repeating a track at position 0 still has to restart it.
    fn step(&mut self, origin: Origin, ticked: bool, apply: impl FnOnce(&mut PlaybackEngine)) {
        let before = self.engine.state().clone();
        apply(&mut self.engine);
        self.reschedule(&before, ticked);

        let after = self.engine.state().clone();
        let changed = before != after;
        if !changed && origin != Origin::TrackEnd {
            return;
        }

        if before.current_track().map(|t| &t.id) != after.current_track().map(|t| &t.id) {
            match after.current_track() {
                Some(t) => info!(id = %t.id, title = %t.title, "now playing"),
                None => info!("queue emptied"),
            }
        }
        debug!(
            index = after.current_index_signed(),
            playing = after.is_playing,
            position = after.position_secs,
            repeat = after.repeat_mode.label(),
            ?origin,
            "step"
        );

        if let Err(e) = sync_backend(self.backend.as_mut(), &before, &after, origin) {
            warn!(error = %e, "audio backend rejected transition");
        }
        if changed {
            self.publish(after);
        }
    }

    /// Cancel or rearm the clock after a step.
    ///
    /// A running clock keeps its deadline across steps that leave the clock
    /// key alone (volume, repeat mode, queue appends), so those never delay
    /// the next tick.
    fn reschedule(&mut self, before: &PlayerState, ticked: bool) {
        if !self.logical_clock || !self.engine.is_ticking() {
            self.ticker.cancel();
            return;
        }
        let key_changed = ClockKey::of(before) != ClockKey::of(self.engine.state());
        if ticked || key_changed || !self.ticker.is_armed() {
            self.ticker.arm(Instant::now());
        }
    }

    fn publish(&mut self, state: PlayerState) {
        match self.snapshot.lock() {
            Ok(mut s) => *s = state.clone(),
            Err(poisoned) => *poisoned.into_inner() = state.clone(),
        }
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
    }

    fn subscribe(&mut self, tx: Sender<PlayerState>) {
        if tx.send(self.engine.state().clone()).is_ok() {
            self.subscribers.push(tx);
        }
    }
}

pub(super) fn spawn_engine_thread(
    engine: PlaybackEngine,
    tick: Option<Duration>,
    backend: Box<dyn AudioBackend + Send>,
    rx: Receiver<Msg>,
    snapshot: StateHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut lp = EngineLoop {
            engine,
            ticker: Ticker::new(tick.unwrap_or(Duration::from_secs(1))),
            logical_clock: tick.is_some(),
            backend,
            snapshot,
            subscribers: Vec::new(),
        };

        let volume = lp.engine.state().volume;
        if let Err(e) = lp.backend.set_volume(volume) {
            warn!(error = %e, "audio backend rejected initial volume");
        }

        loop {
            // Idle (no pending tick): block until the next command.
            let received = match lp.ticker.remaining(Instant::now()) {
                Some(wait) => rx.recv_timeout(wait),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(Msg::Cmd(cmd)) => {
                    let origin = match cmd {
                        PlayerCmd::Backend(BackendEvent::TrackEnded)
                            if lp.engine.state().current_track().is_some() =>
                        {
                            Origin::TrackEnd
                        }
                        PlayerCmd::Backend(_) => Origin::Clock,
                        _ => Origin::Command,
                    };
                    lp.step(origin, false, |engine| {
                        if !engine.apply(cmd) {
                            debug!("command ignored");
                        }
                    });
                }
                Ok(Msg::Subscribe(tx)) => lp.subscribe(tx),
                Ok(Msg::Quit) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if lp.ticker.fire(Instant::now()) {
                        let origin = if lp.engine.tick_ends_track() {
                            Origin::TrackEnd
                        } else {
                            Origin::Clock
                        };
                        lp.step(origin, true, |engine| {
                            engine.tick();
                        });
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if lp.engine.state().is_playing {
            if let Err(e) = lp.backend.pause() {
                warn!(error = %e, "audio backend failed to pause on shutdown");
            }
        }
        debug!("engine thread stopped");
    })
}
