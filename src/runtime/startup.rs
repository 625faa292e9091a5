use std::sync::Arc;
use std::time::Duration;

use crate::audio::RodioBackend;
use crate::catalog::TitleCatalog;
use crate::config;
use crate::controller::PlaybackController;
use crate::library::scan;
use crate::playlist::Playlist;

/// Build the controller from the music directory and title file.
///
/// Returns a message for the status line when the library could not be
/// loaded fully. Nothing here is fatal: the player starts with whatever it
/// found.
pub fn build_controller(settings: &config::Settings) -> (PlaybackController, Option<String>) {
    let lib = &settings.library;
    let titles_path = lib.titles_path();
    let catalog = TitleCatalog::load(&titles_path);

    let (tracks, mut message) = match scan(&lib.music_dir, lib) {
        Ok(tracks) => (tracks, None),
        Err(e) => {
            log::warn!("{e}");
            (Vec::new(), Some(format!("{e}.")))
        }
    };
    let playlist = Playlist::from_entries(tracks);
    log::info!(
        "playlist has {} track(s), catalog has {} title(s)",
        playlist.len(),
        catalog.len()
    );
    if message.is_none() && playlist.is_empty() {
        message = Some(format!("No tracks found in {}.", lib.music_dir.display()));
    }
    if message.is_none() && catalog.is_empty() {
        message = Some(format!(
            "No titles loaded from {}; showing file names.",
            titles_path.display()
        ));
    }

    let backend = Arc::new(RodioBackend::new(
        lib.music_dir.clone(),
        Duration::from_millis(settings.audio.poll_interval_ms),
    ));
    let controller = PlaybackController::new(catalog, playlist, backend);
    (controller, message)
}

/// Display titles in playlist order.
pub fn display_titles(controller: &PlaybackController) -> Vec<String> {
    let catalog = controller.catalog();
    controller
        .playlist()
        .iter()
        .map(|t| catalog.title_for(t).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings_for(dir: &std::path::Path) -> config::Settings {
        let mut s = config::Settings::default();
        s.library.music_dir = dir.to_path_buf();
        s
    }

    #[test]
    fn builds_playlist_with_mapped_titles() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("song1.mp3"), b"x").unwrap();
        fs::write(dir.path().join("song2.mp3"), b"x").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
        fs::write(dir.path().join("musicTitles.txt"), "song1.mp3,My Song\n").unwrap();

        let (controller, message) = build_controller(&settings_for(dir.path()));
        assert_eq!(message, None);
        assert_eq!(
            display_titles(&controller),
            vec!["My Song".to_string(), "song2.mp3".to_string()]
        );
        assert_eq!(controller.playlist().cursor(), Some(0));
    }

    #[test]
    fn missing_title_file_falls_back_to_file_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();

        let (controller, message) = build_controller(&settings_for(dir.path()));
        assert_eq!(display_titles(&controller), vec!["a.mp3".to_string()]);
        assert!(message.unwrap().starts_with("No titles loaded"));
    }

    #[test]
    fn missing_music_dir_starts_empty_with_message() {
        let dir = tempdir().unwrap();
        let (controller, message) = build_controller(&settings_for(&dir.path().join("music")));
        assert!(controller.playlist().is_empty());
        assert!(message.unwrap().starts_with("music directory not found"));
    }
}
