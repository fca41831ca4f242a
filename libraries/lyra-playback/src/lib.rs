//! Lyra - Playback Management
//!
//! Platform-agnostic player and playlist controller for Lyra.
//!
//! This crate provides:
//! - An append-only playlist addressed by index
//! - A favorites set keyed by source locator
//! - Play/pause, wrap-around skipping, seeking, volume and progress tracking
//! - Local file insertion
//! - State-change notifications and a pure display model subscribed to them
//!
//! # Architecture
//!
//! `lyra-playback` knows nothing about browsers or HTTP:
//! - The audio element is reached through the [`AudioOutput`] trait
//! - Rendering is a subscriber of [`PlayerEvent`]s (see [`render::DisplayModel`])
//! - The catalog is fed in by `lyra-catalog`
//!
//! Every controller operation is total. Commands that make no sense in the
//! current state (empty playlist, no source loaded, unknown duration) are
//! no-ops rather than errors.
//!
//! # Example
//!
//! ```rust
//! use lyra_playback::{Direction, MemoryOutput, PlayerController, Track};
//!
//! let mut player = PlayerController::new(MemoryOutput::new());
//! player.extend_playlist(vec![
//!     Track::new("Intro", "/music/intro.mp3", "Band", "Album"),
//!     Track::new("Outro", "/music/outro.mp3", "Band", "Album"),
//! ]);
//!
//! player.load_track(0);
//! player.advance(Direction::Next);
//! assert_eq!(player.state().current_index, 1);
//! assert!(player.state().is_playing);
//!
//! player.toggle_favorite();
//! assert!(player.is_current_favorite());
//! ```

mod controller;
mod error;
mod events;
mod favorites;
mod output;
mod playlist;
pub mod render;
pub mod types;

// Public exports
pub use controller::PlayerController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use favorites::Favorites;
pub use output::{AudioOutput, MemoryOutput};
pub use playlist::Playlist;
pub use types::{Direction, LocalFile, PlayerConfig, PlayerState, Track};
