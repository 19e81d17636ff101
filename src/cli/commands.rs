//! Command-line options for the Visual Timer.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::sound::AlarmSettings;
use crate::window::WindowConfig;

/// Smallest accepted `--size`.
pub const MIN_WINDOW_SIZE: u32 = 300;

/// Largest accepted `--size`.
pub const MAX_WINDOW_SIZE: u32 = 2000;

// ============================================================================
// CLI Structure
// ============================================================================

/// Visual Timer - a floating dial countdown timer
#[derive(Parser, Debug, Clone)]
#[command(
    name = "visual-timer",
    version,
    about = "A floating dial countdown timer",
    long_about = "A floating dial countdown timer.\n\
                  Drag around the dial to set up to 60 minutes; release to start.\n\
                  Tap the dial to pause or resume."
)]
pub struct Cli {
    /// Alarm sound to play instead of the bundled one
    #[arg(long, value_name = "PATH", value_parser = validate_alarm_path)]
    pub alarm: Option<PathBuf>,

    /// Disable the alarm sound
    #[arg(long)]
    pub mute: bool,

    /// Do not keep the window above other windows
    #[arg(long)]
    pub no_float: bool,

    /// Initial window side in points (300-2000)
    #[arg(
        long,
        value_name = "PX",
        default_value = "400",
        value_parser = clap::value_parser!(u32).range(MIN_WINDOW_SIZE as i64..=MAX_WINDOW_SIZE as i64)
    )]
    pub size: u32,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Window configuration for these options.
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::default()
            .with_size(self.size as f32)
            .with_floating(!self.no_float)
    }

    /// Alarm settings for these options.
    pub fn alarm_settings(&self) -> AlarmSettings {
        AlarmSettings::default()
            .with_muted(self.mute)
            .with_sound_path(self.alarm.clone())
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the alarm path.
///
/// Only rejects empty input; a missing file falls back to the beep at
/// alarm time.
fn validate_alarm_path(s: &str) -> Result<PathBuf, String> {
    if s.trim().is_empty() {
        return Err("alarm path cannot be empty".to_string());
    }
    Ok(PathBuf::from(s))
}

// ============================================================================
// Tests
// ============================================================================
