//! Alarm playback for the Visual Timer.
//!
//! This module provides the completion alarm, including:
//!
//! - Lookup of the bundled alarm asset (or a user-supplied file)
//! - Non-blocking playback through rodio
//! - Graceful degradation to the platform alert beep
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   AlarmPlayer    │ ← Called once per completed countdown
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐  resolve  ┌──────────────────┐
//! │   SoundPlayer    │◀──────────│   AlarmLocator   │
//! │   (rodio)        │           │ (four_alarms.wav)│
//! └────────┬─────────┘           └──────────────────┘
//!          │ any failure
//!          ▼
//! ┌──────────────────┐
//! │     Beeper       │ ← NSBeep / terminal bell
//! └──────────────────┘
//! ```

mod beep;
mod error;
mod player;
mod source;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

pub use beep::{Beeper, MockBeeper, SystemBeeper};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{AlarmLocator, AlarmSource, ALARM_FILE_NAME};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &AlarmSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &AlarmSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self, source: &AlarmSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<AlarmSource>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<AlarmSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &AlarmSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }
}

// ============================================================================
// AlarmSettings
// ============================================================================

/// Alarm configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmSettings {
    /// Skip playback entirely
    pub muted: bool,
    /// Sound file to use instead of the bundled asset
    pub sound_path: Option<PathBuf>,
}

impl AlarmSettings {
    /// Returns settings with playback muted or not.
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Returns settings using `path` as the alarm sound.
    pub fn with_sound_path(mut self, path: Option<PathBuf>) -> Self {
        self.sound_path = path;
        self
    }
}

// ============================================================================
// AlarmPlayer
// ============================================================================

/// What a call to [`AlarmPlayer::play`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    /// The alarm sound started playing
    Played,
    /// The alarm could not be played; the system beep was emitted instead
    Beeped,
    /// Playback is muted
    Muted,
}

/// Plays the completion alarm, falling back to the system beep.
pub struct AlarmPlayer {
    player: Option<Box<dyn SoundPlayer>>,
    beeper: Box<dyn Beeper>,
    locator: AlarmLocator,
    muted: bool,
}

impl AlarmPlayer {
    /// Creates an alarm player from its parts.
    ///
    /// `player` is `None` when no audio output is available.
    pub fn new(
        player: Option<Box<dyn SoundPlayer>>,
        beeper: Box<dyn Beeper>,
        locator: AlarmLocator,
    ) -> Self {
        Self {
            player,
            beeper,
            locator,
            muted: false,
        }
    }

    /// Silences the alarm, including the fallback beep.
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Creates an alarm player on the default audio device.
    ///
    /// A muted configuration never opens the device.
    pub fn from_settings(settings: &AlarmSettings) -> Self {
        let player = if settings.muted {
            None
        } else {
            try_create_player().map(|player| Box::new(player) as Box<dyn SoundPlayer>)
        };
        let locator = AlarmLocator::new().with_override(settings.sound_path.clone());

        Self::new(player, Box::new(SystemBeeper), locator).with_muted(settings.muted)
    }

    /// Makes exactly one attempt to play the alarm.
    ///
    /// Never fails: every error is logged and answered with a beep.
    pub fn play(&self) -> AlarmOutcome {
        if self.muted {
            info!("Alarm muted");
            return AlarmOutcome::Muted;
        }

        let Some(player) = &self.player else {
            warn!("No audio output, beeping instead of the alarm");
            self.beeper.beep();
            return AlarmOutcome::Beeped;
        };

        match self.locator.resolve().and_then(|source| player.play(&source)) {
            Ok(()) => {
                info!("Alarm playing");
                AlarmOutcome::Played
            }
            Err(e) => {
                if e.is_file_error() {
                    warn!("Alarm sound unusable, beeping instead: {}", e);
                } else {
                    warn!("Alarm playback failed, beeping instead: {}", e);
                }
                self.beeper.beep();
                AlarmOutcome::Beeped
            }
        }
    }

    /// Returns true if an audio output is available.
    pub fn has_audio(&self) -> bool {
        self.player.is_some()
    }
}

impl std::fmt::Debug for AlarmPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmPlayer")
            .field("has_audio", &self.has_audio())
            .field("locator", &self.locator)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}
