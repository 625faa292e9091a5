use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::library::TrackId;

use super::model::TitleCatalog;

/// Split one `identifier,title` record at the first comma.
fn parse_record(line: &str) -> Option<(&str, &str)> {
    let (id, title) = line.split_once(',')?;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some((id, title.trim()))
}

impl TitleCatalog {
    /// Build a catalog from `identifier,title` lines.
    ///
    /// Lines that are not a record are skipped. A read error stops parsing
    /// and keeps what was read up to that point.
    pub fn parse<R: BufRead>(reader: R) -> Self {
        let mut catalog = Self::default();

        for (n, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    log::warn!("title mapping: read error at line {}: {e}", n + 1);
                    break;
                }
            };
            match parse_record(&line) {
                Some((id, title)) => catalog.insert(TrackId::from(id), title.to_string()),
                None if line.trim().is_empty() => {}
                None => log::debug!("title mapping: skipping line {}: {line:?}", n + 1),
            }
        }

        catalog.index();
        catalog
    }

    /// Load the catalog from `path`. A missing or unreadable file gives an
    /// empty catalog.
    pub fn load(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => {
                let catalog = Self::parse(BufReader::new(file));
                log::info!(
                    "loaded {} title(s) from {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                log::warn!("title mapping {} unavailable: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Replace every mapping with the contents of `path`.
    pub fn reload(&mut self, path: &Path) {
        *self = Self::load(path);
    }
}
