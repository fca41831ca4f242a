//! Lyra Catalog
//!
//! Loads the song catalog from the Lyra server and feeds it to the player.
//!
//! # Features
//!
//! - **HTTP source**: `GET /api/songs` through reqwest (native and wasm)
//! - **Tolerant mapping**: missing or odd fields become empty strings instead
//!   of failing the whole batch
//! - **Population**: appends to the controller's playlist and loads the first
//!   track without playing it
//!
//! # Example
//!
//! ```ignore
//! use lyra_catalog::{CatalogLoader, HttpCatalog};
//! use lyra_playback::{MemoryOutput, PlayerController};
//!
//! let mut player = PlayerController::new(MemoryOutput::new());
//! let loader = CatalogLoader::new(HttpCatalog::new("http://localhost:3000")?);
//!
//! // On failure the error is already logged and the playlist stays empty
//! let added = loader.load(&mut player).await.unwrap_or(0);
//! println!("Loaded {} songs", added);
//! ```

mod client;
mod error;
mod loader;
mod types;

// Re-export main types
pub use client::HttpCatalog;
pub use error::{CatalogError, Result};
pub use loader::{populate, CatalogLoader, CatalogSource, DEFAULT_ALBUM};
pub use types::{parse_records, SongRecord};
