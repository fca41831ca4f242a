//! Append-only playlist
//!
//! Tracks are addressed by index. The playlist only grows: catalog loads and
//! local inserts append, nothing reorders or removes.

use crate::types::Track;

/// Ordered working set of tracks for the session
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one track, returning its index
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Append tracks in order
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Track at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Index of the first track with the given locator
    pub fn position_of(&self, locator: &str) -> Option<usize> {
        self.tracks
            .iter()
            .position(|track| track.source_locator() == locator)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate in playlist order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// All tracks as a slice
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }
}
