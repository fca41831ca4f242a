//! Player/playlist controller

use crate::error::PlaybackError;
use crate::events::PlayerEvent;
use crate::favorites::Favorites;
use crate::output::AudioOutput;
use crate::playlist::Playlist;
use crate::types::{Direction, LocalFile, PlayerConfig, PlayerState, Track};
use tracing::{debug, info, trace, warn};

type Listener = Box<dyn FnMut(&PlayerEvent)>;

/// Central player/playlist controller
///
/// Owns everything the player needs for a session:
/// - The append-only playlist and the favorites set
/// - The player state (current index, playing flag, volume, progress)
/// - The audio output handle
/// - Subscribers notified of every state change
///
/// All operations are synchronous and total. Commands that cannot apply
/// (empty playlist, no source, unknown duration) do nothing and emit nothing.
/// Output failures are logged and surfaced as [`PlayerEvent::OutputError`].
pub struct PlayerController<O: AudioOutput> {
    output: O,
    playlist: Playlist,
    favorites: Favorites,
    state: PlayerState,
    /// The output accepted the current track as its source
    source_ready: bool,
    listeners: Vec<Listener>,
}

impl<O: AudioOutput> PlayerController<O> {
    /// Create a controller with default configuration
    pub fn new(output: O) -> Self {
        Self::with_config(output, PlayerConfig::default())
    }

    /// Create a controller driving `output`
    pub fn with_config(mut output: O, config: PlayerConfig) -> Self {
        let state = config.initial_state();
        output.set_volume(state.volume);

        Self {
            output,
            playlist: Playlist::new(),
            favorites: Favorites::new(),
            state,
            source_ready: false,
            listeners: Vec::new(),
        }
    }

    /// Register a subscriber for state-change notifications
    ///
    /// Subscribers are called synchronously, in registration order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PlayerEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // ===== Playlist =====

    /// Append tracks to the playlist
    ///
    /// Returns the number of tracks added. Does not load anything.
    pub fn extend_playlist(&mut self, tracks: Vec<Track>) -> usize {
        if tracks.is_empty() {
            return 0;
        }

        let added = tracks.len();
        self.playlist.extend(tracks);
        debug!(added, total = self.playlist.len(), "Playlist extended");
        self.emit_playlist_changed();
        added
    }

    /// Add a file picked by the user and start playing it
    ///
    /// The track lands at the end of the playlist and becomes current.
    pub fn insert_local_file(&mut self, file: LocalFile) {
        let track = Track::from_local_file(&file);
        info!(name = %track.display_name(), "Inserting local file");

        let index = self.playlist.push(track);
        self.emit_playlist_changed();

        self.load_track(index);
        self.start_playback();
    }

    // ===== Playback Control =====

    /// Make the track at `index` current without starting playback
    ///
    /// Returns `false` (and changes nothing) if there is no such track.
    pub fn load_track(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.get(index).cloned() else {
            debug!(index, len = self.playlist.len(), "Ignoring load of missing track");
            return false;
        };

        self.state.current_index = index;
        self.state.progress_fraction = 0.0;

        match self.output.set_source(track.source_locator()) {
            Ok(()) => self.source_ready = true,
            Err(e) => {
                // The output still holds the previous track; silence it
                self.output.pause();
                self.source_ready = false;
                self.report_output_error(&e);
            }
        }

        // A new source stops the element
        let was_playing = self.state.is_playing;
        self.state.is_playing = false;

        debug!(index, title = %track.display_name(), "Track loaded");
        self.emit(PlayerEvent::TrackLoaded { index, track });
        if was_playing {
            self.emit(PlayerEvent::PlaybackChanged { is_playing: false });
        }
        self.emit_favorite_indicator();
        true
    }

    /// Load the track at `index` and play it (playlist row click)
    pub fn select_track(&mut self, index: usize) {
        if self.load_track(index) {
            self.start_playback();
        }
    }

    /// Play a favorite (favorites row click)
    ///
    /// Favorites are a subset of the playlist, so this jumps to the matching
    /// playlist entry. Unknown locators are ignored.
    pub fn play_favorite(&mut self, locator: &str) {
        if !self.favorites.contains(locator) {
            debug!(locator, "Ignoring play of unknown favorite");
            return;
        }

        match self.playlist.position_of(locator) {
            Some(index) => self.select_track(index),
            None => warn!(locator, "Favorite is missing from the playlist"),
        }
    }

    /// Flip between playing and paused
    ///
    /// Does nothing until the output has accepted a source.
    pub fn toggle_play_pause(&mut self) {
        if !self.source_ready || self.output.source().is_none() {
            return;
        }

        if self.output.is_paused() {
            self.start_playback();
        } else {
            self.output.pause();
            self.state.is_playing = false;
            self.emit(PlayerEvent::PlaybackChanged { is_playing: false });
        }
    }

    /// Skip one track in `direction`, wrapping around, and play it
    pub fn advance(&mut self, direction: Direction) {
        if self.playlist.is_empty() {
            return;
        }

        let target = direction.step(self.state.current_index, self.playlist.len());
        self.load_track(target);
        self.start_playback();
    }

    /// Skip to the next track
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.advance(Direction::Next);
    }

    /// Skip to the previous track
    pub fn previous(&mut self) {
        self.advance(Direction::Previous);
    }

    /// The output finished the current track
    ///
    /// Identical to pressing next, including the wrap from last to first.
    pub fn on_track_ended(&mut self) {
        debug!(index = self.state.current_index, "Track ended");
        self.advance(Direction::Next);
    }

    // ===== Position =====

    /// Seek to `fraction` (0.0 - 1.0) of the duration
    ///
    /// Ignored while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let Some(duration) = self.known_duration() else {
            return;
        };

        let fraction = fraction.clamp(0.0, 1.0);
        self.output.set_current_time(fraction * duration);
        self.state.progress_fraction = fraction;
        self.emit(PlayerEvent::ProgressChanged { fraction });
    }

    /// The output reported a time update
    pub fn on_progress(&mut self) {
        let Some(duration) = self.known_duration() else {
            return;
        };

        let fraction = self.output.current_time() / duration;
        if fraction.is_nan() {
            return;
        }

        let fraction = fraction.clamp(0.0, 1.0);
        self.state.progress_fraction = fraction;
        self.emit(PlayerEvent::ProgressChanged { fraction });
    }

    // ===== Volume =====

    /// Set output volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }

        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        self.output.set_volume(volume);
        self.emit(PlayerEvent::VolumeChanged { volume });
    }

    // ===== Favorites =====

    /// Add the current track to favorites, or remove it if already there
    pub fn toggle_favorite(&mut self) {
        let Some(track) = self.current_track().cloned() else {
            return;
        };

        let is_favorite = self.favorites.toggle(&track);
        info!(
            title = %track.display_name(),
            is_favorite,
            total = self.favorites.len(),
            "Favorite toggled"
        );

        self.emit(PlayerEvent::FavoritesChanged {
            tracks: self.favorites.as_slice().to_vec(),
        });
        self.emit(PlayerEvent::FavoriteIndicator { is_favorite });
    }

    // ===== State Queries =====

    /// Current player state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The favorites set
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Track at the current index (`None` for an empty playlist)
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.state.current_index)
    }

    /// Check if the current track is a favorite
    pub fn is_current_favorite(&self) -> bool {
        self.current_track()
            .is_some_and(|track| self.favorites.contains(track.source_locator()))
    }

    /// The output handle
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable access to the output handle
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    // ===== Internal =====

    fn start_playback(&mut self) {
        if !self.source_ready {
            debug!(index = self.state.current_index, "No playable source, not starting");
            return;
        }

        match self.output.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.emit(PlayerEvent::PlaybackChanged { is_playing: true });
            }
            Err(e) => {
                self.state.is_playing = false;
                self.report_output_error(&e);
            }
        }
    }

    fn known_duration(&self) -> Option<f64> {
        if !self.source_ready {
            return None;
        }
        self.output
            .duration()
            .filter(|duration| duration.is_finite() && *duration > 0.0)
    }

    fn report_output_error(&mut self, error: &PlaybackError) {
        warn!(error = %error, "Audio output rejected command");
        self.emit(PlayerEvent::OutputError {
            message: error.to_string(),
        });
    }

    fn emit_playlist_changed(&mut self) {
        self.emit(PlayerEvent::PlaylistChanged {
            tracks: self.playlist.as_slice().to_vec(),
        });
    }

    fn emit_favorite_indicator(&mut self) {
        let is_favorite = self.is_current_favorite();
        self.emit(PlayerEvent::FavoriteIndicator { is_favorite });
    }

    fn emit(&mut self, event: PlayerEvent) {
        trace!(event = event.kind(), "Emitting player event");
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryOutput;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_test_track(name: &str) -> Track {
        Track::new(name, format!("/music/{name}.mp3"), "Test Artist", "Album")
    }

    fn create_test_player(count: usize) -> PlayerController<MemoryOutput> {
        let mut player = PlayerController::new(MemoryOutput::new());
        let tracks = (0..count)
            .map(|i| create_test_track(&format!("track{i}")))
            .collect();
        player.extend_playlist(tracks);
        player
    }

    fn record_events(player: &mut PlayerController<MemoryOutput>) -> Rc<RefCell<Vec<PlayerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        player.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn create_player_controller() {
        let player = PlayerController::new(MemoryOutput::new());
        assert!(player.playlist().is_empty());
        assert!(player.favorites().is_empty());
        assert!(!player.state().is_playing);
        assert!(player.current_track().is_none());
    }

    #[test]
    fn config_volume_reaches_output() {
        let player = PlayerController::with_config(
            MemoryOutput::new(),
            PlayerConfig {
                initial_volume: 0.25,
            },
        );
        assert_eq!(player.state().volume, 0.25);
        assert_eq!(player.output().volume(), 0.25);
    }

    #[test]
    fn load_track_does_not_autoplay() {
        let mut player = create_test_player(3);
        assert!(player.load_track(1));

        assert_eq!(player.state().current_index, 1);
        assert!(!player.state().is_playing);
        assert_eq!(player.output().source().as_deref(), Some("/music/track1.mp3"));
    }

    #[test]
    fn load_track_out_of_bounds_is_ignored() {
        let mut player = create_test_player(3);
        player.load_track(1);
        let events = record_events(&mut player);

        assert!(!player.load_track(3));
        assert_eq!(player.state().current_index, 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn load_track_while_playing_reports_stop() {
        let mut player = create_test_player(3);
        player.select_track(0);
        assert!(player.state().is_playing);

        let events = record_events(&mut player);
        player.load_track(2);

        assert!(!player.state().is_playing);
        assert!(events
            .borrow()
            .contains(&PlayerEvent::PlaybackChanged { is_playing: false }));
    }

    #[test]
    fn toggle_play_pause_without_source() {
        let mut player = create_test_player(3);
        let events = record_events(&mut player);

        player.toggle_play_pause();
        assert!(!player.state().is_playing);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn toggle_play_pause_flips() {
        let mut player = create_test_player(2);
        player.load_track(0);

        player.toggle_play_pause();
        assert!(player.state().is_playing);
        assert!(!player.output().is_paused());

        player.toggle_play_pause();
        assert!(!player.state().is_playing);
        assert!(player.output().is_paused());
    }

    #[test]
    fn advance_wraps_and_plays() {
        let mut player = create_test_player(3);
        player.load_track(2);

        player.next();
        assert_eq!(player.state().current_index, 0);
        assert!(player.state().is_playing);

        player.previous();
        assert_eq!(player.state().current_index, 2);
        assert!(player.state().is_playing);
    }

    #[test]
    fn seek_ignored_without_duration() {
        let mut player = create_test_player(1);
        player.load_track(0);
        player.output_mut().advance_time(5.0);

        player.seek(0.5);
        assert_eq!(player.output().current_time(), 5.0);
        assert_eq!(player.state().progress_fraction, 0.0);
    }

    #[test]
    fn seek_sets_position() {
        let mut player = create_test_player(1);
        player.load_track(0);
        player.output_mut().set_duration(Some(200.0));

        player.seek(0.25);
        assert_eq!(player.output().current_time(), 50.0);
        assert_eq!(player.state().progress_fraction, 0.25);

        player.seek(7.0);
        assert_eq!(player.output().current_time(), 200.0);
    }

    #[test]
    fn seek_ignores_streaming_duration() {
        let mut player = create_test_player(1);
        player.load_track(0);
        player.output_mut().set_duration(Some(f64::INFINITY));

        player.seek(0.5);
        assert_eq!(player.output().current_time(), 0.0);
    }

    #[test]
    fn progress_tracks_output_time() {
        let mut player = create_test_player(1);
        player.load_track(0);

        player.on_progress();
        assert_eq!(player.state().progress_fraction, 0.0);

        player.output_mut().set_duration(Some(120.0));
        player.output_mut().advance_time(30.0);
        player.on_progress();
        assert_eq!(player.state().progress_fraction, 0.25);
    }

    #[test]
    fn volume_is_clamped() {
        let mut player = create_test_player(0);
        player.set_volume(1.5);
        assert_eq!(player.state().volume, 1.0);
        assert_eq!(player.output().volume(), 1.0);

        player.set_volume(-0.2);
        assert_eq!(player.state().volume, 0.0);

        player.set_volume(f64::NAN);
        assert_eq!(player.state().volume, 0.0);
    }

    #[test]
    fn toggle_favorite_tracks_current() {
        let mut player = create_test_player(3);
        player.load_track(1);

        player.toggle_favorite();
        assert!(player.is_current_favorite());
        assert!(player.favorites().contains("/music/track1.mp3"));

        player.load_track(2);
        assert!(!player.is_current_favorite());

        player.load_track(1);
        assert!(player.is_current_favorite());
    }

    #[test]
    fn play_favorite_jumps_to_playlist_entry() {
        let mut player = create_test_player(4);
        player.load_track(3);
        player.toggle_favorite();
        player.load_track(0);

        player.play_favorite("/music/track3.mp3");
        assert_eq!(player.state().current_index, 3);
        assert!(player.state().is_playing);

        player.play_favorite("/music/track0.mp3");
        assert_eq!(player.state().current_index, 3);
    }

    #[test]
    fn rejected_source_does_not_stop_controller() {
        let mut player = PlayerController::new(MemoryOutput::new());
        player.output_mut().reject_sources_ending_with(".ape");
        player.extend_playlist(vec![
            Track::new("ok", "/music/ok.mp3", "a", "b"),
            Track::new("bad", "/music/bad.ape", "a", "b"),
        ]);
        player.load_track(0);
        let events = record_events(&mut player);

        player.next();
        assert_eq!(player.state().current_index, 1);
        assert!(events
            .borrow()
            .iter()
            .any(|event| matches!(event, PlayerEvent::OutputError { .. })));
    }

    #[test]
    fn skipping_onto_rejected_source_silences_previous_track() {
        let mut player = PlayerController::new(MemoryOutput::new());
        player.output_mut().reject_sources_ending_with(".ape");
        player.extend_playlist(vec![
            Track::new("ok", "/music/ok.mp3", "a", "b"),
            Track::new("bad", "/music/bad.ape", "a", "b"),
        ]);
        player.select_track(0);
        assert!(player.state().is_playing);

        player.next();
        assert_eq!(player.state().current_index, 1);
        assert!(!player.state().is_playing);
        assert!(player.output().is_paused());

        // The stale source must not resume under the new track's name
        player.toggle_play_pause();
        assert!(!player.state().is_playing);
        assert!(player.output().is_paused());

        player.output_mut().set_duration(Some(100.0));
        player.seek(0.5);
        assert_eq!(player.output().current_time(), 0.0);

        player.next();
        assert_eq!(player.state().current_index, 0);
        assert!(player.state().is_playing);
        assert_eq!(player.output().source().as_deref(), Some("/music/ok.mp3"));
    }

    #[test]
    fn refused_play_leaves_not_playing() {
        let mut player = create_test_player(2);
        player.output_mut().refuse_play(true);
        player.load_track(0);

        player.next();
        assert_eq!(player.state().current_index, 1);
        assert!(!player.state().is_playing);
    }

    #[test]
    fn extend_with_nothing_emits_nothing() {
        let mut player = create_test_player(0);
        let events = record_events(&mut player);

        assert_eq!(player.extend_playlist(Vec::new()), 0);
        assert!(events.borrow().is_empty());
    }
}
