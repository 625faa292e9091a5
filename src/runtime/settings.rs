use crate::config;

/// Load and validate settings. Runs before logging and the TUI are up, so
/// problems go to stderr.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("playdeck: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("playdeck: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
