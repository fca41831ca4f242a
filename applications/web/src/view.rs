//! DOM rendering of the display model

use lyra_playback::{
    render::{DisplayModel, ListRow, RowAction},
    PlayerEvent,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement, HtmlInputElement};

/// Attribute carrying a playlist row's index
pub const INDEX_ATTR: &str = "data-index";
/// Attribute carrying a favorites row's locator
pub const LOCATOR_ATTR: &str = "data-locator";

/// Handles to every element the player touches
pub struct PlayerView {
    document: Document,
    pub audio: HtmlAudioElement,
    pub play_pause: Element,
    pub progress: HtmlInputElement,
    pub volume: HtmlInputElement,
    pub playlist_items: Element,
    pub show_playlist: Element,
    pub playlist_container: HtmlElement,
    pub heart: Element,
    pub favorites_items: Element,
    pub favorites_btn: Element,
    pub favorites_container: HtmlElement,
    pub next: Element,
    pub prev: Element,
    pub song_title: Element,
    pub song_artist: Element,
    pub song_album: Element,
    pub insert_song: Element,
    pub file_input: HtmlInputElement,
}

impl PlayerView {
    /// Look up the player's elements by id
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            audio: by_id(document, "audio")?,
            play_pause: by_id(document, "play-pause")?,
            progress: by_id(document, "progress")?,
            volume: by_id(document, "volume")?,
            playlist_items: by_id(document, "playlist-items")?,
            show_playlist: by_id(document, "show-playlist")?,
            playlist_container: by_id(document, "playlist-container")?,
            heart: by_id(document, "add-to-playlist")?,
            favorites_items: by_id(document, "favorites-items")?,
            favorites_btn: by_id(document, "favorites-btn")?,
            favorites_container: by_id(document, "favorites-container")?,
            next: by_id(document, "next")?,
            prev: by_id(document, "prev")?,
            song_title: by_id(document, "song-title")?,
            song_artist: by_id(document, "song-artist")?,
            song_album: by_id(document, "song-album")?,
            insert_song: by_id(document, "insert-song")?,
            file_input: by_id(document, "file-input")?,
        })
    }

    /// Paint everything
    pub fn paint_all(&self, model: &DisplayModel) -> Result<(), JsValue> {
        self.paint_now_playing(model);
        self.paint_indicators(model);
        self.paint_progress(model);
        self.volume.set_value(&model.volume.to_string());
        self.paint_list(&self.playlist_items, &model.playlist_rows)?;
        self.paint_list(&self.favorites_items, &model.favorite_rows)?;
        self.paint_panels(model)
    }

    /// Paint the parts of the model `event` touched
    pub fn paint(&self, model: &DisplayModel, event: &PlayerEvent) -> Result<(), JsValue> {
        match event {
            PlayerEvent::TrackLoaded { .. } => {
                self.paint_now_playing(model);
                self.paint_progress(model);
            }
            PlayerEvent::PlaybackChanged { .. } | PlayerEvent::FavoriteIndicator { .. } => {
                self.paint_indicators(model);
            }
            PlayerEvent::PlaylistChanged { .. } => {
                self.paint_list(&self.playlist_items, &model.playlist_rows)?;
            }
            PlayerEvent::FavoritesChanged { .. } => {
                self.paint_list(&self.favorites_items, &model.favorite_rows)?;
            }
            PlayerEvent::ProgressChanged { .. } => self.paint_progress(model),
            PlayerEvent::VolumeChanged { volume } => {
                self.volume.set_value(&volume.to_string());
            }
            PlayerEvent::OutputError { .. } => {}
        }
        Ok(())
    }

    /// Show or hide the side panels
    pub fn paint_panels(&self, model: &DisplayModel) -> Result<(), JsValue> {
        self.playlist_container
            .style()
            .set_property("display", display_value(model.playlist_visible))?;
        self.favorites_container
            .style()
            .set_property("display", display_value(model.favorites_visible))
    }

    fn paint_now_playing(&self, model: &DisplayModel) {
        let now = &model.now_playing;
        self.song_title.set_text_content(Some(&now.title));
        self.song_artist.set_text_content(Some(&now.artist));
        self.song_album.set_text_content(Some(&now.album));
    }

    fn paint_indicators(&self, model: &DisplayModel) {
        self.play_pause
            .set_text_content(Some(model.play_indicator.glyph()));
        if let Err(e) = self
            .heart
            .class_list()
            .toggle_with_force("liked", model.heart_liked)
        {
            tracing::warn!(error = ?e, "Failed to update favorite indicator");
        }
    }

    fn paint_progress(&self, model: &DisplayModel) {
        self.progress
            .set_value_as_number(model.progress_percent);
    }

    /// Replace the children of `list` with one `<li>` per row
    fn paint_list(&self, list: &Element, rows: &[ListRow]) -> Result<(), JsValue> {
        list.set_inner_html("");

        for row in rows {
            let li = self.document.create_element("li")?;
            match &row.action {
                RowAction::None => li.set_text_content(Some(&row.label)),
                RowAction::SelectIndex(index) => {
                    let name = self.document.create_element("span")?;
                    name.set_class_name("song-name");
                    name.set_text_content(Some(&row.label));
                    name.set_attribute(INDEX_ATTR, &index.to_string())?;
                    li.append_child(&name)?;
                }
                RowAction::PlayFavorite(locator) => {
                    li.set_text_content(Some(&row.label));
                    li.set_attribute(LOCATOR_ATTR, locator)?;
                }
            }
            list.append_child(&li)?;
        }
        Ok(())
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has the wrong type", id)))
}

fn display_value(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}
