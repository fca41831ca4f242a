//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Only the audio output can fail. The controller never returns these to its
/// callers; it logs them and emits [`crate::PlayerEvent::OutputError`].
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The output rejected a source assignment (unsupported format, bad URL)
    #[error("Source rejected: {0}")]
    SourceRejected(String),

    /// The output refused to start playback
    #[error("Playback refused: {0}")]
    PlayRefused(String),

    /// Any other audio output failure
    #[error("Audio output error: {0}")]
    Output(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
