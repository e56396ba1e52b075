//! Line commands read from stdin.

use encore::{PlayerCmd, PlayerState, RepeatMode};
use encore::library::format_clock;

pub const HELP: &str = "\
commands:
  play | pause | toggle | stop
  next | prev | skip N | remove N | clear
  shuffle | repeat [off|one|all]
  seek N | seek +N | seek -N | vol F
  status | queue | help | quit";

const UP_NEXT_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Player(PlayerCmd),
    Status,
    Queue,
    Help,
    Quit,
}

fn arg<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{name}: missing argument"))?;
    value
        .parse()
        .map_err(|_| format!("{name}: invalid argument {value:?}"))
}

fn repeat_mode(value: &str) -> Result<RepeatMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "off" | "none" => Ok(RepeatMode::Off),
        "one" | "track" => Ok(RepeatMode::One),
        "all" | "queue" => Ok(RepeatMode::All),
        other => Err(format!("repeat: unknown mode {other:?}")),
    }
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest = words.next();

    let cmd = match head.to_ascii_lowercase().as_str() {
        "play" => Command::Player(PlayerCmd::Play),
        "pause" => Command::Player(PlayerCmd::Pause),
        "toggle" | "p" => Command::Player(PlayerCmd::TogglePlayPause),
        "stop" => Command::Player(PlayerCmd::Stop),
        "next" | "n" => Command::Player(PlayerCmd::Next),
        "prev" | "previous" => Command::Player(PlayerCmd::Previous),
        "skip" => Command::Player(PlayerCmd::SkipTo(arg("skip", rest)?)),
        "remove" | "rm" => Command::Player(PlayerCmd::RemoveFromQueue(arg("remove", rest)?)),
        "clear" => Command::Player(PlayerCmd::ClearQueue),
        "shuffle" => Command::Player(PlayerCmd::ToggleShuffle),
        "repeat" => match rest {
            None => Command::Player(PlayerCmd::ToggleRepeat),
            Some(mode) => Command::Player(PlayerCmd::SetRepeatMode(repeat_mode(mode)?)),
        },
        "seek" => match rest {
            Some(v) if v.starts_with('+') || v.starts_with('-') => {
                let delta = arg("seek", Some(v.trim_start_matches('+')))?;
                Command::Player(PlayerCmd::SeekBy(delta))
            }
            _ => Command::Player(PlayerCmd::Seek(arg("seek", rest)?)),
        },
        "vol" | "volume" => Command::Player(PlayerCmd::SetVolume(arg("vol", rest)?)),
        "status" | "s" => Command::Status,
        "queue" | "ls" => Command::Queue,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Some(cmd))
}

/// One-line summary of the player, e.g.
/// `playing  Artist - Title  1:02 / 3:45 (28%)  repeat:all shuffle vol:80%`.
pub fn now_playing_line(state: &PlayerState) -> String {
    let Some(track) = state.current_track() else {
        return format!("stopped  (queue: {} tracks)", state.queue.len());
    };

    let mut line = format!(
        "{}  {}  {} / {} ({:.0}%)  repeat:{}",
        if state.is_playing { "playing" } else { "paused " },
        track.display(),
        format_clock(state.position_secs),
        format_clock(state.duration_secs()),
        state.progress() * 100.0,
        state.repeat_mode.label(),
    );
    if state.shuffle_enabled {
        line.push_str(" shuffle");
    }
    line.push_str(&format!(" vol:{:.0}%", state.volume * 100.0));
    line
}

/// `now_playing_line` followed by the next few queued tracks.
pub fn status_report(state: &PlayerState) -> String {
    let mut report = now_playing_line(state);
    let upcoming = state.up_next(UP_NEXT_LEN);
    if !upcoming.is_empty() {
        report.push_str("\nup next:");
        for t in upcoming {
            report.push_str(&format!("\n  {}", t.display()));
        }
    }
    report
}

/// Numbered queue listing with the current entry marked.
pub fn queue_listing(state: &PlayerState) -> String {
    if state.queue.is_empty() {
        return "queue is empty".to_string();
    }
    state
        .queue
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if state.current_index == Some(i) { '>' } else { ' ' };
            format!(
                "{marker} {i:>3}  {}  [{}]",
                t.display(),
                format_clock(t.duration_secs)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
