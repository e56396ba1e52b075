use std::path::Path;

use lofty::prelude::*;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Build a `Track` for one audio file. Tags and duration come from `lofty`;
/// unreadable files still produce a track named after the file with a zero
/// duration.
fn read_track(path: &Path) -> Track {
    let id = path.to_string_lossy().into_owned();
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = UNKNOWN_ARTIST.to_string();
    let mut album = UNKNOWN_ALBUM.to_string();
    let mut duration_secs = 0u32;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration_secs =
                u32::try_from(tagged.properties().duration().as_secs()).unwrap_or(u32::MAX);

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = non_blank(tag.title()) {
                    title = v;
                }
                if let Some(v) = non_blank(tag.artist()) {
                    artist = v;
                }
                if let Some(v) = non_blank(tag.album()) {
                    album = v;
                }
            }
        }
        Err(e) => trace!(path = %path.display(), error = %e, "no readable tags"),
    }

    Track::new(id.clone(), title, artist, album, duration_secs).with_source(id)
}

/// Scan `dir` for audio files and return them as tracks sorted by their
/// display string, case-insensitively.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            tracks.push(read_track(path));
        }
    }

    tracks.sort_by_cached_key(|t| t.display().to_lowercase());
    debug!(dir = %dir.display(), count = tracks.len(), "library scan finished");
    tracks
}
