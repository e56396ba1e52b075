use tracing::warn;

use encore::Result;
use encore::config::Settings;

/// Load and validate settings from disk and the environment.
pub fn load_settings() -> Result<Settings> {
    let settings = Settings::load()?;
    settings.validate()?;
    Ok(settings)
}

/// Config is optional; failures should not prevent the player from starting.
pub fn or_defaults(loaded: Result<Settings>) -> Settings {
    match loaded {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "using default settings");
            Settings::default()
        }
    }
}
