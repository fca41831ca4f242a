//! Platform-agnostic audio output trait
//!
//! Abstracts the single audio element the controller drives (an
//! `HTMLAudioElement` in the browser, [`MemoryOutput`] in tests and headless
//! hosts).

use crate::error::{PlaybackError, Result};

/// The audio output handle
///
/// Times are in seconds. Implementors own decoding and buffering; the
/// controller only assigns sources and flips transport state.
pub trait AudioOutput {
    /// Assign a new source, stopping whatever was loaded
    ///
    /// # Returns
    /// * `Err(_)` - The output rejected the locator (unsupported format, bad URL)
    fn set_source(&mut self, locator: &str) -> Result<()>;

    /// Currently assigned source, if any
    fn source(&self) -> Option<String>;

    /// Start or resume playback of the assigned source
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Check if the output is paused (or has never played)
    fn is_paused(&self) -> bool;

    /// Current playback position
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Track duration
    ///
    /// `None` while metadata is pending. Implementors may also report
    /// non-finite values; callers must guard.
    fn duration(&self) -> Option<f64>;

    /// Set output volume in [0, 1]
    fn set_volume(&mut self, volume: f64);
}

/// In-memory audio output
///
/// Behaves like a media element without producing sound: assigning a source
/// pauses and rewinds it and clears the duration until
/// [`MemoryOutput::set_duration`] is called (metadata loaded).
#[derive(Debug, Clone)]
pub struct MemoryOutput {
    source: Option<String>,
    paused: bool,
    current_time: f64,
    duration: Option<f64>,
    volume: f64,
    rejected_suffix: Option<String>,
    refuse_play: bool,
}

impl MemoryOutput {
    /// Create an output with no source
    pub fn new() -> Self {
        Self {
            source: None,
            paused: true,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            rejected_suffix: None,
            refuse_play: false,
        }
    }

    /// Simulate metadata arriving for the current source
    pub fn set_duration(&mut self, duration: Option<f64>) {
        self.duration = duration;
    }

    /// Simulate time passing
    pub fn advance_time(&mut self, seconds: f64) {
        self.current_time += seconds;
        if let Some(duration) = self.duration {
            self.current_time = self.current_time.min(duration);
        }
    }

    /// Last volume applied
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Reject every source whose locator ends with `suffix`
    pub fn reject_sources_ending_with(&mut self, suffix: impl Into<String>) {
        self.rejected_suffix = Some(suffix.into());
    }

    /// Make `play` fail (autoplay blocked, device missing)
    pub fn refuse_play(&mut self, refuse: bool) {
        self.refuse_play = refuse;
    }
}

impl Default for MemoryOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for MemoryOutput {
    fn set_source(&mut self, locator: &str) -> Result<()> {
        if let Some(suffix) = &self.rejected_suffix {
            if locator.ends_with(suffix.as_str()) {
                return Err(PlaybackError::SourceRejected(locator.to_string()));
            }
        }

        self.source = Some(locator.to_string());
        self.paused = true;
        self.current_time = 0.0;
        self.duration = None;
        Ok(())
    }

    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(PlaybackError::PlayRefused("no source".to_string()));
        }
        if self.refuse_play {
            return Err(PlaybackError::PlayRefused("playback refused".to_string()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}
