use std::env;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use encore::Player;
use encore::config::LoggingSettings;
use encore::library::scan;

mod commands;
mod event_loop;
mod settings;
mod startup;


/// Play through a music directory on a logical clock, driven by line commands.
#[derive(Parser, Debug)]
#[command(name = "encore", version, about)]
pub struct Args {
    /// Directory to scan for audio files (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Queue index to start from
    #[arg(short, long, default_value_t = 0)]
    pub start: usize,

    /// Load the queue without starting playback
    #[arg(long)]
    pub paused: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub dump_config: bool,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let loaded = settings::load_settings();
    let filter = match &loaded {
        Ok(s) => s.logging.filter.clone(),
        Err(_) => LoggingSettings::default().filter,
    };
    init_tracing(&filter);
    let settings = settings::or_defaults(loaded);

    if args.dump_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let dir = match args.dir {
        Some(d) => d,
        None => env::current_dir()?,
    };

    let tracks = scan(&dir, &settings.library);
    info!(dir = %dir.display(), count = tracks.len(), "library loaded");

    let player = Player::new(startup::player_options(&settings));
    startup::load_queue(&player, tracks, args.start, args.paused)?;

    event_loop::run(&player)
}
