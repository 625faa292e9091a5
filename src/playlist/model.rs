use crate::library::TrackId;

/// The session's tracks in load order plus the selected position.
///
/// Membership is fixed once built. `cursor` is `Some(i)` with `i < len`
/// whenever the list is non-empty and `None` when it is empty.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<TrackId>,
    cursor: Option<usize>,
}

impl Playlist {
    /// Build from an already filtered listing. The first track starts selected.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = TrackId>,
    {
        let tracks: Vec<TrackId> = entries.into_iter().collect();
        let cursor = if tracks.is_empty() { None } else { Some(0) };
        Self { tracks, cursor }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.tracks.iter()
    }

    /// Position of `id` in load order.
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t == id)
    }

    /// The selected track, if any.
    pub fn current(&self) -> Option<&TrackId> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    /// Move the cursor to `index`. Out-of-range requests are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() || self.cursor == Some(index) {
            return false;
        }
        self.cursor = Some(index);
        true
    }

    /// Select the following track, wrapping to the first.
    pub fn next(&mut self) -> bool {
        match self.cursor {
            Some(i) => self.select((i + 1) % self.tracks.len()),
            None => false,
        }
    }

    /// Select the preceding track, wrapping to the last.
    pub fn previous(&mut self) -> bool {
        match self.cursor {
            Some(i) => {
                let len = self.tracks.len();
                self.select((i + len - 1) % len)
            }
            None => false,
        }
    }

    pub fn first(&mut self) -> bool {
        self.select(0)
    }

    pub fn last(&mut self) -> bool {
        match self.tracks.len() {
            0 => false,
            len => self.select(len - 1),
        }
    }
}
