//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Artist shown for tracks added from the user's machine
pub const LOCAL_ARTIST: &str = "Local File";

/// Album shown for tracks added from the user's machine
pub const LOCAL_ALBUM: &str = "Local";

/// One playable audio item
///
/// Immutable once constructed. The source locator is either a URL served by
/// the static host (`/music/song.mp3`) or a transient local reference such as
/// a `blob:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    display_name: String,
    source_locator: String,
    artist_name: String,
    album_name: String,
}

impl Track {
    /// Create a track from its display and source metadata
    pub fn new(
        display_name: impl Into<String>,
        source_locator: impl Into<String>,
        artist_name: impl Into<String>,
        album_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            source_locator: source_locator.into(),
            artist_name: artist_name.into(),
            album_name: album_name.into(),
        }
    }

    /// Create a track for a file picked by the user
    ///
    /// The display name is the file name without its final extension.
    pub fn from_local_file(file: &LocalFile) -> Self {
        Self::new(
            strip_extension(&file.name),
            file.locator.clone(),
            LOCAL_ARTIST,
            LOCAL_ALBUM,
        )
    }

    /// Title shown in the now-playing area and lists
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// URL or local reference handed to the audio output
    pub fn source_locator(&self) -> &str {
        &self.source_locator
    }

    /// Artist name
    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Album name
    pub fn album_name(&self) -> &str {
        &self.album_name
    }
}

/// A file chosen by the user, already turned into a playable reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// File name as reported by the picker (`song.mp3`)
    pub name: String,

    /// Transient reference the output can load (`blob:...`)
    pub locator: String,
}

impl LocalFile {
    /// Create a local file reference
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }
}

/// Skip direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the end of the playlist (+1)
    Next,

    /// Towards the start of the playlist (-1)
    Previous,
}

impl Direction {
    /// Index of the neighbour of `current` in a playlist of `len` tracks,
    /// wrapping around in both directions
    ///
    /// `len` must be non-zero.
    pub fn step(self, current: usize, len: usize) -> usize {
        match self {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        }
    }
}

/// Mutable cursor and playback status over the playlist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Index of the loaded track (meaningful only for a non-empty playlist)
    pub current_index: usize,

    /// Whether the output is playing
    pub is_playing: bool,

    /// Output volume in [0, 1]
    pub volume: f64,

    /// Playback position as a fraction of the duration, in [0, 1]
    pub progress_fraction: f64,
}

impl PlayerState {
    fn with_volume(volume: f64) -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            volume,
            progress_fraction: 0.0,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::with_volume(1.0)
    }
}

/// Configuration for the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f64,
}

impl PlayerConfig {
    pub(crate) fn initial_state(&self) -> PlayerState {
        let volume = if self.initial_volume.is_nan() {
            1.0
        } else {
            self.initial_volume.clamp(0.0, 1.0)
        };
        PlayerState::with_volume(volume)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
        }
    }
}

/// Remove the final extension from a file name
///
/// Strips a trailing `.ext` where `ext` is non-empty and contains neither `.`
/// nor `/`. Names without such a suffix are returned unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}
