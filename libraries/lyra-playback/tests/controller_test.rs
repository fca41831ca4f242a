//! Integration tests for the player controller
//!
//! Drives the controller through its public API with an in-memory output and
//! a recording subscriber.

use lyra_playback::render::{DisplayModel, PlayIndicator};
use lyra_playback::{
    AudioOutput, Direction, LocalFile, MemoryOutput, PlayerController, PlayerEvent, Track,
};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Helpers =====

fn catalog(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| {
            Track::new(
                format!("Song {i}"),
                format!("/music/song{i}.mp3"),
                format!("Artist {i}"),
                "Album",
            )
        })
        .collect()
}

fn player_with(count: usize) -> PlayerController<MemoryOutput> {
    let mut player = PlayerController::new(MemoryOutput::new());
    player.extend_playlist(catalog(count));
    if count > 0 {
        player.load_track(0);
    }
    player
}

fn recorder(player: &mut PlayerController<MemoryOutput>) -> Rc<RefCell<Vec<PlayerEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    player.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

// ===== Empty playlist =====

#[test]
fn empty_playlist_commands_are_no_ops() {
    let mut player = PlayerController::new(MemoryOutput::new());
    let events = recorder(&mut player);
    let before = *player.state();

    assert!(!player.load_track(0));
    player.toggle_play_pause();
    player.advance(Direction::Next);
    player.advance(Direction::Previous);
    player.toggle_favorite();
    player.on_track_ended();
    player.seek(0.5);
    player.on_progress();
    player.select_track(0);
    player.play_favorite("/music/song0.mp3");

    assert_eq!(*player.state(), before);
    assert!(player.playlist().is_empty());
    assert!(player.favorites().is_empty());
    assert!(player.output().source().is_none());
    assert!(events.borrow().is_empty());
}

// ===== Skipping =====

#[test]
fn track_ended_on_last_wraps_to_first_and_plays() {
    let mut player = player_with(4);
    player.load_track(3);

    player.on_track_ended();

    assert_eq!(player.state().current_index, 0);
    assert!(player.state().is_playing);
    assert_eq!(player.output().source().as_deref(), Some("/music/song0.mp3"));
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut player = player_with(4);

    player.previous();

    assert_eq!(player.state().current_index, 3);
    assert!(player.state().is_playing);
}

#[test]
fn single_track_playlist_skips_to_itself() {
    let mut player = player_with(1);

    player.next();
    assert_eq!(player.state().current_index, 0);
    player.previous();
    assert_eq!(player.state().current_index, 0);
    assert!(player.state().is_playing);
}

#[test]
fn skip_emits_load_then_play() {
    let mut player = player_with(3);
    let events = recorder(&mut player);

    player.next();

    let events = events.borrow();
    let kinds: Vec<&str> = events.iter().map(PlayerEvent::kind).collect();
    assert_eq!(
        kinds,
        vec!["track_loaded", "favorite_indicator", "playback_changed"]
    );
    assert_eq!(
        events[2],
        PlayerEvent::PlaybackChanged { is_playing: true }
    );
}

// ===== Local files =====

#[test]
fn insert_local_file_plays_new_last_track() {
    let mut player = player_with(3);

    player.insert_local_file(LocalFile::new("Demo.mp3", "blob:http://localhost/1"));

    let len = player.playlist().len();
    assert_eq!(len, 4);
    assert_eq!(player.state().current_index, len - 1);
    assert!(player.state().is_playing);

    let track = player.current_track().unwrap();
    assert_eq!(track.display_name(), "Demo");
    assert_eq!(track.artist_name(), "Local File");
    assert_eq!(track.album_name(), "Local");
    assert_eq!(player.output().source().as_deref(), Some("blob:http://localhost/1"));
}

#[test]
fn insert_local_file_into_empty_playlist() {
    let mut player = PlayerController::new(MemoryOutput::new());

    player.insert_local_file(LocalFile::new("only.flac", "blob:x"));

    assert_eq!(player.playlist().len(), 1);
    assert_eq!(player.state().current_index, 0);
    assert!(player.state().is_playing);
}

// ===== Favorites =====

#[test]
fn favorite_toggle_adds_and_removes_exactly_one() {
    let mut player = player_with(5);
    player.load_track(2);

    player.toggle_favorite();
    assert_eq!(player.favorites().len(), 1);
    assert_eq!(
        player.favorites().iter().next().unwrap().source_locator(),
        "/music/song2.mp3"
    );

    player.toggle_favorite();
    assert!(player.favorites().is_empty());
}

#[test]
fn favorites_survive_skipping() {
    let mut player = player_with(3);
    player.toggle_favorite();

    player.next();
    assert!(!player.is_current_favorite());
    player.next();
    player.next();
    assert!(player.is_current_favorite());
    assert_eq!(player.favorites().len(), 1);
}

// ===== Display =====

#[test]
fn display_model_tracks_full_session() {
    let mut player = PlayerController::new(MemoryOutput::new());
    let display = Rc::new(RefCell::new(DisplayModel::new()));
    let sink = Rc::clone(&display);
    player.subscribe(move |event| sink.borrow_mut().apply(event));

    player.extend_playlist(catalog(2));
    player.load_track(0);
    player.toggle_favorite();
    player.next();
    player.output_mut().set_duration(Some(100.0));
    player.seek(0.5);
    player.set_volume(0.3);

    let model = display.borrow();
    assert_eq!(model.now_playing.title, "Song 1");
    assert_eq!(model.play_indicator, PlayIndicator::Pause);
    assert!(!model.heart_liked);
    assert_eq!(model.playlist_rows.len(), 2);
    assert_eq!(model.favorite_rows.len(), 1);
    assert_eq!(model.favorite_rows[0].label, "Song 0");
    assert_eq!(model.progress_percent, 50.0);
    assert_eq!(model.volume, 0.3);
}
