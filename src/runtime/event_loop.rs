use std::io::{self, BufRead};
use std::thread;

use encore::{Player, PlayerState, RepeatMode};

use super::commands::{self, Command, HELP};

/// The parts of a snapshot worth announcing; position alone changes every
/// tick and is only shown on `status`.
#[derive(Debug, PartialEq)]
struct Announced {
    index: Option<usize>,
    track_id: Option<String>,
    playing: bool,
    repeat: RepeatMode,
    shuffle: bool,
    volume: f32,
    queue_len: usize,
}

impl Announced {
    fn of(state: &PlayerState) -> Self {
        Self {
            index: state.current_index,
            track_id: state.current_track().map(|t| t.id.clone()),
            playing: state.is_playing,
            repeat: state.repeat_mode,
            shuffle: state.shuffle_enabled,
            volume: state.volume,
            queue_len: state.queue.len(),
        }
    }
}

/// Read commands from stdin until `quit` or EOF, printing a summary line
/// whenever the player announces a change. Shuts the player down on return.
pub fn run(player: &Player) -> anyhow::Result<()> {
    let updates = player.subscribe()?;
    let printer = thread::spawn(move || {
        let mut last: Option<Announced> = None;
        for state in updates {
            let announced = Announced::of(&state);
            if last.as_ref() != Some(&announced) {
                println!("{}", commands::now_playing_line(&state));
                last = Some(announced);
            }
        }
    });

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Player(cmd))) => player.send(cmd)?,
            Ok(Some(Command::Status)) => println!("{}", commands::status_report(&player.state())),
            Ok(Some(Command::Queue)) => println!("{}", commands::queue_listing(&player.state())),
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Err(msg) => println!("{msg}\n{HELP}"),
        }
    }

    player.shutdown();
    let _ = printer.join();
    Ok(())
}
