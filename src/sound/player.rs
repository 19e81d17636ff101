//! rodio-backed alarm playback.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::AlarmSource;

/// Plays alarm files on the default output device.
///
/// Playback is detached: the sound keeps going after [`play`](Self::play)
/// returns and is never tracked. The output stream is not `Send` on every
/// platform, so the player stays on the thread that created it.
pub struct RodioSoundPlayer {
    // Dropping the stream silences every sink created from it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` when there is no output
    /// device.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Starts playing `source` and returns immediately.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the file cannot be opened
    /// - `DecodeError` if its format is not understood
    /// - `StreamError` if no sink can be attached to the output
    pub fn play(&self, source: &AlarmSource) -> Result<(), SoundError> {
        let path = source.path();
        debug!(source = source.name(), path = %path.display(), "Playing alarm");

        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink =
            Sink::try_new(&self.handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.append(decoder);
        sink.detach();

        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Opens the default output device, or returns `None` (with a warning) when
/// there is none.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, alarm will beep: {}", e);
            None
        }
    }
}
