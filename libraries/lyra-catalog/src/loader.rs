//! Catalog loading into the player.

use crate::client::HttpCatalog;
use crate::error::Result;
use crate::types::SongRecord;
use async_trait::async_trait;
use lyra_playback::{AudioOutput, PlayerController, Track};
use tracing::{error, info};

/// Album shown for catalog tracks
pub const DEFAULT_ALBUM: &str = "Album";

/// Anything that can list songs.
///
/// Futures are not `Send`: the player lives on a single event loop.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Fetch every song record.
    async fn list_songs(&self) -> Result<Vec<SongRecord>>;
}

#[async_trait(?Send)]
impl CatalogSource for HttpCatalog {
    async fn list_songs(&self) -> Result<Vec<SongRecord>> {
        self.fetch_songs().await
    }
}

/// Fetches the catalog once and hands it to a controller.
pub struct CatalogLoader<S> {
    source: S,
    album_placeholder: String,
}

impl<S: CatalogSource> CatalogLoader<S> {
    /// Create a loader over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            album_placeholder: DEFAULT_ALBUM.to_string(),
        }
    }

    /// Use a different album name for catalog tracks.
    pub fn with_album_placeholder(mut self, album: impl Into<String>) -> Self {
        self.album_placeholder = album.into();
        self
    }

    /// Fetch and map the catalog.
    ///
    /// Failures are logged here; callers only decide what to do next.
    pub async fn fetch(&self) -> Result<Vec<Track>> {
        match self.source.list_songs().await {
            Ok(records) => Ok(records
                .into_iter()
                .map(|record| record.into_track(&self.album_placeholder))
                .collect()),
            Err(e) => {
                error!(error = %e, "Error loading songs");
                Err(e)
            }
        }
    }

    /// Fetch the catalog and populate `controller`.
    ///
    /// On failure the playlist is left untouched.
    pub async fn load<O: AudioOutput>(&self, controller: &mut PlayerController<O>) -> Result<usize> {
        let tracks = self.fetch().await?;
        Ok(populate(controller, tracks))
    }
}

/// Append fetched tracks to the playlist.
///
/// If the playlist was empty, the first track is loaded (not played).
/// Returns the number of tracks added.
pub fn populate<O: AudioOutput>(controller: &mut PlayerController<O>, tracks: Vec<Track>) -> usize {
    let was_empty = controller.playlist().is_empty();
    let added = controller.extend_playlist(tracks);

    if was_empty && added > 0 {
        controller.load_track(0);
    }

    info!(added, total = controller.playlist().len(), "Catalog loaded");
    added
}
