//! Sound system error types.
//!
//! None of these errors reach the user: the alarm player logs them and
//! falls back to the system beep.

use thiserror::Error;

/// Errors that can occur while playing the alarm.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The alarm asset was not found.
    #[error("alarm sound not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode alarm sound: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream or sink.
    #[error("failed to open audio stream: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }
}
