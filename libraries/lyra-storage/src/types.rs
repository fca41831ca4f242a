//! Song types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the song catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    /// URL under the music mount (`/music/song.mp3`)
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a song
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub artist: String,
    pub file_url: String,
}

impl CreateSong {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            file_url: file_url.into(),
        }
    }
}
