use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playdeck/config.toml` or `~/.config/playdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the tracks. The first CLI argument overrides it.
    pub music_dir: PathBuf,
    /// Title mapping file, relative to `music_dir` unless absolute.
    ///
    /// One `file name,title` record per line.
    pub titles_file: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("music"),
            titles_file: PathBuf::from("musicTitles.txt"),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: false,
            max_depth: None,
        }
    }
}

impl LibrarySettings {
    /// Where the title mapping is read from.
    pub fn titles_path(&self) -> PathBuf {
        self.music_dir.join(&self.titles_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the playback thread checks for end-of-track and stop
    /// requests (milliseconds). Also bounds how long `stop` can block.
    pub poll_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Artwork labels by playlist position. The entry at the selected index
    /// is shown in the status box; positions past the end show nothing.
    pub artwork: Vec<String>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ songs for the end of the year ~ ".to_string(),
            artwork: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/playdeck/playdeck.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
