//! Favorites set
//!
//! Membership is keyed by source locator, not by track identity. Entries keep
//! insertion order for display only.

use crate::types::Track;
use std::collections::HashSet;

/// Session-scoped set of favorite tracks
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    entries: Vec<Track>,
    locators: HashSet<String>,
}

impl Favorites {
    /// Create new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a locator is a favorite
    pub fn contains(&self, locator: &str) -> bool {
        self.locators.contains(locator)
    }

    /// Flip membership of `track`
    ///
    /// Returns `true` if the track is a favorite afterwards.
    pub fn toggle(&mut self, track: &Track) -> bool {
        let locator = track.source_locator();
        if self.locators.remove(locator) {
            self.entries.retain(|entry| entry.source_locator() != locator);
            false
        } else {
            self.locators.insert(locator.to_string());
            self.entries.push(track.clone());
            true
        }
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter()
    }

    /// All favorites as a slice
    pub fn as_slice(&self) -> &[Track] {
        &self.entries
    }
}
