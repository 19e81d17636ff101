//! Core data types for the Visual Timer.
//!
//! This module defines the data structures used for:
//! - The timer session (remaining time, running and dragging flags)
//! - The dial phase derived from the session
//! - Readout formatting

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Full turn of the dial in minutes.
pub const MAX_MINUTES: u32 = 60;

/// Full turn of the dial in seconds.
pub const MAX_SECONDS: u32 = MAX_MINUTES * 60;

// ============================================================================
// DialPhase
// ============================================================================

/// Represents the current phase of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialPhase {
    /// Nothing set, nothing running
    #[default]
    Idle,
    /// Duration set but the countdown is not running
    Armed,
    /// Counting down
    Running,
    /// A pointer gesture is setting the duration
    Dragging,
}

impl DialPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialPhase::Idle => "idle",
            DialPhase::Armed => "armed",
            DialPhase::Running => "running",
            DialPhase::Dragging => "dragging",
        }
    }
}

impl fmt::Display for DialPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerSession
// ============================================================================

/// The single mutable timer entity.
///
/// Mutation is crate-private: only the dial state machine drives it, which
/// keeps `is_running` and `is_dragging` mutually exclusive and guarantees a
/// session at zero is never running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSession {
    remaining_seconds: u32,
    is_running: bool,
    is_dragging: bool,
}

impl TimerSession {
    /// Creates an idle session with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds left on the countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns true while the countdown is ticking.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Returns true while a drag gesture is setting the duration.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Derives the dial phase from the session flags.
    pub fn phase(&self) -> DialPhase {
        if self.is_dragging {
            DialPhase::Dragging
        } else if self.is_running {
            DialPhase::Running
        } else if self.remaining_seconds > 0 {
            DialPhase::Armed
        } else {
            DialPhase::Idle
        }
    }

    /// Formats the remaining time as `MM:SS`.
    pub fn time_string(&self) -> String {
        format_time(self.remaining_seconds)
    }

    /// Share of the full dial covered by the remaining time, in `[0, 1]`.
    pub fn dial_fraction(&self) -> f32 {
        self.remaining_seconds as f32 / MAX_SECONDS as f32
    }

    /// Sets the duration in whole minutes, capped at a full dial.
    pub(crate) fn set_minutes(&mut self, minutes: u32) {
        self.remaining_seconds = minutes.min(MAX_MINUTES) * 60;
    }

    /// Enters the dragging state, cancelling any running countdown.
    pub(crate) fn begin_drag(&mut self) {
        self.is_running = false;
        self.is_dragging = true;
    }

    /// Leaves the dragging state.
    pub(crate) fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Starts the countdown. Has no effect at zero or while dragging.
    pub(crate) fn start(&mut self) {
        if self.remaining_seconds > 0 && !self.is_dragging {
            self.is_running = true;
        }
    }

    /// Stops the countdown, keeping the remaining time.
    pub(crate) fn stop(&mut self) {
        self.is_running = false;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if this tick reached zero.
    pub(crate) fn tick(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }
}

/// Formats seconds as a zero-padded `MM:SS` readout.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
