use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::LibraryError;

use super::model::TrackId;

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

/// List the playable tracks under `dir`, sorted case-insensitively.
///
/// Identifiers are paths relative to `dir`, so a flat directory yields bare
/// file names.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<TrackId>, LibraryError> {
    if !dir.is_dir() {
        return Err(LibraryError::MissingDirectory(dir.to_path_buf()));
    }

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

    let mut tracks: Vec<TrackId> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
        })
        .filter_map(|entry| {
            let rel = entry.path().strip_prefix(dir).ok()?;
            Some(TrackId::from(rel.to_string_lossy().replace('\\', "/")))
        })
        .collect();

    tracks.sort_by(|a, b| {
        a.as_str()
            .to_lowercase()
            .cmp(&b.as_str().to_lowercase())
    });
    log::info!("scanned {}: {} track(s)", dir.display(), tracks.len());
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(tracks: &[TrackId]) -> Vec<&str> {
        tracks.iter().map(TrackId::as_str).collect()
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings {
            extensions: vec!["mp3".into(), ".FLAC".into()],
            ..LibrarySettings::default()
        };
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_filters_non_audio_and_sorts_case_insensitive() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("musicTitles.txt"), b"b.MP3,Bee").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(names(&tracks), vec!["A.ogg", "b.MP3"]);
    }

    #[test]
    fn scan_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = scan(&missing, &LibrarySettings::default()).unwrap_err();
        assert!(matches!(err, LibraryError::MissingDirectory(p) if p == missing));
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings).unwrap();
        assert_eq!(names(&tracks), vec!["visible.mp3"]);
    }

    #[test]
    fn scan_is_flat_unless_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let flat = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(names(&flat), vec!["root.mp3"]);

        let settings = LibrarySettings {
            recursive: true,
            ..LibrarySettings::default()
        };
        let deep = scan(dir.path(), &settings).unwrap();
        assert_eq!(names(&deep), vec!["root.mp3", "sub/child.mp3"]);
    }

    #[test]
    fn scan_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(d1.join("one.mp3"), b"not real").unwrap();
        fs::write(d2.join("two.mp3"), b"not real").unwrap();

        // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
        let settings = LibrarySettings {
            recursive: true,
            max_depth: Some(2),
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings).unwrap();

        let names = names(&tracks);
        assert!(names.contains(&"root.mp3"));
        assert!(names.contains(&"d1/one.mp3"));
        assert!(!names.contains(&"d1/d2/two.mp3"));
    }
}
