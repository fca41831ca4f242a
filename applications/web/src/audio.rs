//! `AudioOutput` over an `<audio>` element

use lyra_playback::{AudioOutput, PlaybackError};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// The page's `<audio>` element as the controller's output handle
pub struct HtmlAudioOutput {
    audio: HtmlAudioElement,
}

impl HtmlAudioOutput {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self { audio }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

impl AudioOutput for HtmlAudioOutput {
    fn set_source(&mut self, locator: &str) -> lyra_playback::Result<()> {
        if locator.is_empty() {
            return Err(PlaybackError::SourceRejected("empty locator".to_string()));
        }
        self.audio.set_src(locator);
        Ok(())
    }

    fn source(&self) -> Option<String> {
        let src = self.audio.src();
        (!src.is_empty()).then_some(src)
    }

    fn play(&mut self) -> lyra_playback::Result<()> {
        let promise = self
            .audio
            .play()
            .map_err(|e| PlaybackError::PlayRefused(format!("{:?}", e)))?;

        // Autoplay policy and decode failures reject the promise later
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                tracing::warn!(error = ?e, "Audio element refused to play");
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            tracing::warn!(error = ?e, "Failed to pause audio element");
        }
    }

    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.audio.duration();
        (!duration.is_nan()).then_some(duration)
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }
}
