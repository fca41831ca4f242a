//! Wiring between the page, the controller and the catalog

use crate::audio::HtmlAudioOutput;
use crate::view::{PlayerView, INDEX_ATTR, LOCATOR_ATTR};
use lyra_catalog::{populate, CatalogLoader, HttpCatalog};
use lyra_playback::{render::DisplayModel, LocalFile, PlayerConfig, PlayerController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, Url};

type Player = PlayerController<HtmlAudioOutput>;

/// The mounted player
pub struct App {
    player: Rc<RefCell<Player>>,
    model: Rc<RefCell<DisplayModel>>,
    view: Rc<PlayerView>,
}

impl App {
    /// Bind the controller to the page and hook up every control
    pub fn mount(document: &web_sys::Document) -> Result<Self, JsValue> {
        let view = Rc::new(PlayerView::from_document(document)?);

        let config = PlayerConfig {
            initial_volume: parse_number(&view.volume.value()).unwrap_or(1.0),
        };
        let mut player = PlayerController::with_config(
            HtmlAudioOutput::new(view.audio.clone()),
            config,
        );

        let model = Rc::new(RefCell::new(DisplayModel::new()));
        model.borrow_mut().volume = player.state().volume;
        view.paint_all(&model.borrow())?;

        {
            let model = Rc::clone(&model);
            let view = Rc::clone(&view);
            player.subscribe(move |event| {
                let mut model = model.borrow_mut();
                model.apply(event);
                if let Err(e) = view.paint(&model, event) {
                    tracing::warn!(event = event.kind(), error = ?e, "Failed to paint");
                }
            });
        }

        let app = Self {
            player: Rc::new(RefCell::new(player)),
            model,
            view,
        };
        app.bind_controls()?;
        Ok(app)
    }

    /// Fetch the catalog from `origin` in the background
    pub fn load_catalog(&self, origin: &str) {
        let loader = match HttpCatalog::new(origin) {
            Ok(catalog) => CatalogLoader::new(catalog),
            Err(e) => {
                tracing::error!(origin, error = %e, "Cannot build catalog client");
                return;
            }
        };

        let player = Rc::clone(&self.player);
        wasm_bindgen_futures::spawn_local(async move {
            // The player is not borrowed across the fetch
            let Ok(tracks) = loader.fetch().await else {
                return;
            };
            with_player(&player, "catalog", |player| {
                populate(player, tracks);
            });
        });
    }

    fn bind_controls(&self) -> Result<(), JsValue> {
        let view = &self.view;

        self.on_player(&view.play_pause, "click", |player, _| {
            player.toggle_play_pause();
        })?;
        self.on_player(&view.next, "click", |player, _| player.next())?;
        self.on_player(&view.prev, "click", |player, _| player.previous())?;
        self.on_player(&view.heart, "click", |player, _| player.toggle_favorite())?;

        self.on_player(&view.audio, "timeupdate", |player, _| player.on_progress())?;
        self.on_player(&view.audio, "ended", |player, _| player.on_track_ended())?;

        let progress = view.progress.clone();
        self.on_player(&view.progress, "input", move |player, _| {
            if let Some(percent) = parse_number(&progress.value()) {
                player.seek(percent / 100.0);
            }
        })?;

        let volume = view.volume.clone();
        self.on_player(&view.volume, "input", move |player, _| {
            if let Some(level) = parse_number(&volume.value()) {
                player.set_volume(level);
            }
        })?;

        // Rows are rebuilt on every change; clicks are delegated to the lists
        self.on_player(&view.playlist_items, "click", |player, event| {
            if let Some(index) = target_attribute(event, INDEX_ATTR).and_then(|v| v.parse().ok()) {
                player.select_track(index);
            }
        })?;
        self.on_player(&view.favorites_items, "click", |player, event| {
            if let Some(locator) = target_attribute(event, LOCATOR_ATTR) {
                player.play_favorite(&locator);
            }
        })?;

        self.on_model(&view.show_playlist, DisplayModel::toggle_playlist_panel)?;
        self.on_model(&view.favorites_btn, DisplayModel::toggle_favorites_panel)?;

        let file_input = view.file_input.clone();
        listen(&view.insert_song, "click", move |_| file_input.click())?;

        let file_input = view.file_input.clone();
        self.on_player(&view.file_input, "change", move |player, _| {
            let Some(file) = file_input.files().and_then(|files| files.get(0)) else {
                return;
            };
            match Url::create_object_url_with_blob(&file) {
                Ok(url) => {
                    tracing::info!(name = %file.name(), "Inserting local file");
                    player.insert_local_file(LocalFile::new(file.name(), url));
                }
                Err(e) => tracing::warn!(error = ?e, "Cannot create object URL"),
            }
            // Allow picking the same file again
            file_input.set_value("");
        })?;

        Ok(())
    }

    /// Listen on `target` and run `f` against the controller
    fn on_player<F>(&self, target: &EventTarget, name: &'static str, mut f: F) -> Result<(), JsValue>
    where
        F: FnMut(&mut Player, &Event) + 'static,
    {
        let player = Rc::clone(&self.player);
        listen(target, name, move |event| {
            with_player(&player, name, |player| f(player, &event));
        })
    }

    /// Toggle a panel in the model and repaint the panels
    fn on_model(&self, target: &EventTarget, toggle: fn(&mut DisplayModel)) -> Result<(), JsValue> {
        let model = Rc::clone(&self.model);
        let view = Rc::clone(&self.view);
        listen(target, "click", move |_| {
            let mut model = model.borrow_mut();
            toggle(&mut *model);
            if let Err(e) = view.paint_panels(&model) {
                tracing::warn!(error = ?e, "Failed to toggle panel");
            }
        })
    }
}

/// Run `f` with the controller unless it is already in use
fn with_player(player: &RefCell<Player>, source: &str, f: impl FnOnce(&mut Player)) {
    match player.try_borrow_mut() {
        Ok(mut player) => f(&mut *player),
        Err(_) => tracing::warn!(source, "Player busy, dropping input"),
    }
}

/// Register a page-lifetime event listener
fn listen<F>(target: &EventTarget, name: &str, f: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(f);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Value of `attr` on the clicked element or its nearest ancestor carrying it
fn target_attribute(event: &Event, attr: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let row = target.closest(&format!("[{}]", attr)).ok()??;
    row.get_attribute(attr)
}

/// Parse an input's numeric value; NaN and garbage are `None`
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
