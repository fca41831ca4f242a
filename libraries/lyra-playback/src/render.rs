//! Display model
//!
//! A pure projection of [`PlayerEvent`]s into what the player screen shows.
//! Hosts subscribe a `DisplayModel` to the controller and paint it however
//! they like (DOM, terminal, nothing at all in tests).
//!
//! Lists are rebuilt from the full snapshot carried by each event; an empty
//! list renders a single placeholder row.

use crate::events::PlayerEvent;
use crate::types::Track;
use serde::Serialize;

/// Text of the row shown for an empty list
pub const EMPTY_LIST_PLACEHOLDER: &str = "No songs added";

/// Binary play/pause indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayIndicator {
    /// Paused or stopped: the button offers "play"
    Play,
    /// Playing: the button offers "pause"
    Pause,
}

impl PlayIndicator {
    /// Glyph for the play/pause button
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIndicator::Play => "\u{25B6}",
            PlayIndicator::Pause => "\u{23F8}",
        }
    }
}

/// What a row does when clicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowAction {
    /// Placeholder row, not clickable
    None,
    /// Playlist row: select this index
    SelectIndex(usize),
    /// Favorites row: play this locator
    PlayFavorite(String),
}

/// One row of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub label: String,
    pub action: RowAction,
}

impl ListRow {
    fn placeholder() -> Self {
        Self {
            label: EMPTY_LIST_PLACEHOLDER.to_string(),
            action: RowAction::None,
        }
    }

    /// Check if this is the empty-list placeholder
    pub fn is_placeholder(&self) -> bool {
        self.action == RowAction::None
    }
}

/// Now-playing text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Everything the player screen displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub now_playing: NowPlaying,
    pub play_indicator: PlayIndicator,
    pub heart_liked: bool,
    /// Progress bar value, 0-100
    pub progress_percent: f64,
    pub volume: f64,
    pub playlist_rows: Vec<ListRow>,
    pub favorite_rows: Vec<ListRow>,
    pub playlist_visible: bool,
    pub favorites_visible: bool,
}

impl DisplayModel {
    /// Model of a freshly loaded page
    pub fn new() -> Self {
        Self {
            now_playing: NowPlaying::default(),
            play_indicator: PlayIndicator::Play,
            heart_liked: false,
            progress_percent: 0.0,
            volume: 1.0,
            playlist_rows: vec![ListRow::placeholder()],
            favorite_rows: vec![ListRow::placeholder()],
            playlist_visible: false,
            favorites_visible: false,
        }
    }

    /// Update the model from one controller event
    pub fn apply(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::TrackLoaded { track, .. } => {
                self.now_playing = NowPlaying {
                    title: track.display_name().to_string(),
                    artist: track.artist_name().to_string(),
                    album: track.album_name().to_string(),
                };
                self.progress_percent = 0.0;
            }
            PlayerEvent::PlaybackChanged { is_playing } => {
                self.play_indicator = if *is_playing {
                    PlayIndicator::Pause
                } else {
                    PlayIndicator::Play
                };
            }
            PlayerEvent::FavoriteIndicator { is_favorite } => {
                self.heart_liked = *is_favorite;
            }
            PlayerEvent::PlaylistChanged { tracks } => {
                self.playlist_rows = playlist_rows(tracks);
            }
            PlayerEvent::FavoritesChanged { tracks } => {
                self.favorite_rows = favorite_rows(tracks);
            }
            PlayerEvent::ProgressChanged { fraction } => {
                self.progress_percent = fraction * 100.0;
            }
            PlayerEvent::VolumeChanged { volume } => {
                self.volume = *volume;
            }
            PlayerEvent::OutputError { .. } => {}
        }
    }

    /// Show or hide the playlist panel
    pub fn toggle_playlist_panel(&mut self) {
        self.playlist_visible = !self.playlist_visible;
    }

    /// Show or hide the favorites panel
    pub fn toggle_favorites_panel(&mut self) {
        self.favorites_visible = !self.favorites_visible;
    }
}

impl Default for DisplayModel {
    fn default() -> Self {
        Self::new()
    }
}

fn playlist_rows(tracks: &[Track]) -> Vec<ListRow> {
    if tracks.is_empty() {
        return vec![ListRow::placeholder()];
    }

    tracks
        .iter()
        .enumerate()
        .map(|(index, track)| ListRow {
            label: track.display_name().to_string(),
            action: RowAction::SelectIndex(index),
        })
        .collect()
}

fn favorite_rows(tracks: &[Track]) -> Vec<ListRow> {
    if tracks.is_empty() {
        return vec![ListRow::placeholder()];
    }

    tracks
        .iter()
        .map(|track| ListRow {
            label: track.display_name().to_string(),
            action: RowAction::PlayFavorite(track.source_locator().to_string()),
        })
        .collect()
}
