//! Visual Timer Library
//!
//! This library provides the core functionality for the Visual Timer, a
//! floating dial countdown timer. It includes:
//! - Dial geometry and the pure dial state machine
//! - A once-per-second tick driver on a tokio runtime
//! - The timer engine applying state machine effects
//! - Alarm playback with a system beep fallback
//! - Window behavior (floating, square, all Spaces on macOS)
//! - The egui presentation layer and CLI options

pub mod cli;
pub mod dial;
pub mod engine;
pub mod sound;
pub mod ticker;
pub mod types;
pub mod ui;
pub mod window;

// Re-export commonly used types for convenience
pub use types::{format_time, DialPhase, TimerSession, MAX_MINUTES, MAX_SECONDS};

pub use dial::{
    angle_from_point, angle_to_minutes, minutes_from_point, DialEvent, DialStateMachine, Effect,
    Point,
};

pub use engine::TimerEngine;
pub use ticker::{Tick, TickDriver, TickerError, TICK_PERIOD};

// Re-export sound types
pub use sound::{
    AlarmLocator, AlarmOutcome, AlarmPlayer, AlarmSettings, AlarmSource, Beeper, MockBeeper,
    MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SystemBeeper,
};

pub use ui::VisualTimerApp;
pub use window::{WindowConfig, WindowError, WindowGuard};
