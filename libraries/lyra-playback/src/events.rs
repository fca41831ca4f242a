//! Player Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - Track loads and play/pause changes
//! - Playlist and favorites changes (full snapshots)
//! - Progress and volume updates
//! - Audio output failures

use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Events emitted by the player controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A track became the current track
    TrackLoaded {
        /// Playlist index of the track
        index: usize,
        /// The loaded track
        track: Track,
    },

    /// Play/pause state changed
    PlaybackChanged {
        /// Whether the output is now playing
        is_playing: bool,
    },

    /// Favorite status of the current track (re)computed
    FavoriteIndicator {
        /// Whether the current track is a favorite
        is_favorite: bool,
    },

    /// Playlist contents changed
    PlaylistChanged {
        /// Every track, in playlist order
        tracks: Vec<Track>,
    },

    /// Favorites contents changed
    FavoritesChanged {
        /// Every favorite, in insertion order
        tracks: Vec<Track>,
    },

    /// Playback position moved
    ProgressChanged {
        /// Position as a fraction of the duration, in [0, 1]
        fraction: f64,
    },

    /// Output volume changed
    VolumeChanged {
        /// New volume in [0, 1]
        volume: f64,
    },

    /// The audio output rejected a command
    OutputError {
        /// Error message
        message: String,
    },
}

impl PlayerEvent {
    /// Short name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerEvent::TrackLoaded { .. } => "track_loaded",
            PlayerEvent::PlaybackChanged { .. } => "playback_changed",
            PlayerEvent::FavoriteIndicator { .. } => "favorite_indicator",
            PlayerEvent::PlaylistChanged { .. } => "playlist_changed",
            PlayerEvent::FavoritesChanged { .. } => "favorites_changed",
            PlayerEvent::ProgressChanged { .. } => "progress_changed",
            PlayerEvent::VolumeChanged { .. } => "volume_changed",
            PlayerEvent::OutputError { .. } => "output_error",
        }
    }
}
