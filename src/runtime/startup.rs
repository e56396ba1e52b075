use tracing::warn;

use encore::config::Settings;
use encore::{Player, PlayerOptions, Result, Track};

pub fn player_options(settings: &Settings) -> PlayerOptions {
    PlayerOptions::from(&settings.playback)
}

/// Hand the scanned library to the player as its queue.
pub fn load_queue(player: &Player, tracks: Vec<Track>, start: usize, paused: bool) -> Result<()> {
    if tracks.is_empty() {
        warn!("no tracks found, starting with an empty queue");
        return Ok(());
    }

    let start = if start < tracks.len() {
        start
    } else {
        warn!(start, len = tracks.len(), "start index out of range, using 0");
        0
    };

    player.load_queue(tracks, start, !paused)
}
