//! Lyra Web
//!
//! Browser front end for the Lyra player, built with `wasm-pack build
//! --target web`. The page (`static/index.html`) provides the elements; this
//! crate drives them:
//!
//! - [`audio::HtmlAudioOutput`] plays tracks through the page's `<audio>`
//! - [`view::PlayerView`] paints the `DisplayModel` into the DOM
//! - [`app::App`] routes DOM events to the `PlayerController` and loads the
//!   catalog from the serving origin

// `#[wasm_bindgen(start)]` emits a `#[no_mangle]` export
#![allow(unsafe_code)]

pub mod app;
pub mod audio;
pub mod logging;
pub mod view;

use wasm_bindgen::prelude::*;

/// Entry point, run once the module is instantiated
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Enable panic hooks for better error messages in console
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let app = app::App::mount(&document)?;
    app.load_catalog(&window.location().origin()?);

    tracing::info!("Lyra player mounted");
    Ok(())
}
