//! File logging. The terminal belongs to the TUI, so log records go to a
//! file instead of stderr.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use crate::config::LoggingSettings;

/// `$XDG_STATE_HOME/playdeck/playdeck.log`, else under `~/.local/state`.
fn log_path_from(state_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    state_home
        .or_else(|| home.map(|h| h.join(".local").join("state")))
        .map(|d| d.join("playdeck").join("playdeck.log"))
}

pub fn default_log_path() -> Option<PathBuf> {
    log_path_from(
        env::var_os("XDG_STATE_HOME").map(PathBuf::from),
        env::var_os("HOME").map(PathBuf::from),
    )
}

/// Install the global logger. Returns the log file on success.
///
/// `RUST_LOG` takes precedence over `settings.level`.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(default_log_path)?;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("playdeck: cannot create {}: {e}; logging disabled", parent.display());
            return None;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("playdeck: cannot open {}: {e}; logging disabled", path.display());
            return None;
        }
    };

    let installed = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.level.as_str()),
    )
    .filter_module("zbus", log::LevelFilter::Warn)
    .format_timestamp_millis()
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();

    match installed {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("playdeck: logger already installed: {e}");
            None
        }
    }
}
