//! Window behavior for the Visual Timer.
//!
//! This module handles:
//! - The injected [`WindowConfig`] describing how the window behaves
//! - Native options for eframe built from that configuration
//! - [`WindowGuard`], which applies the configuration on the first frame and
//!   keeps the window square and floating afterwards
//!
//! The sizing rules are plain functions so they can be tested without a
//! window.

#[cfg(target_os = "macos")]
mod macos;

use eframe::egui::{self, Vec2, ViewportCommand, WindowLevel};
use thiserror::Error;
use tracing::{debug, warn};

/// Default window side in points.
pub const DEFAULT_SIZE: f32 = 400.0;

/// Upper bound for the initial window side.
pub const MAX_INITIAL_SIZE: f32 = 400.0;

/// Smallest window side.
pub const MIN_SIZE: f32 = 300.0;

/// Tolerance before a window counts as non-square.
const SQUARE_TOLERANCE: f32 = 1.0;

// ============================================================================
// WindowError
// ============================================================================

/// Errors from platform window tweaks. Never fatal.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The native window handle could not be obtained.
    #[error("window handle unavailable: {0}")]
    HandleUnavailable(String),

    /// The handle is not of the kind this platform expects.
    #[error("unsupported window handle")]
    UnsupportedHandle,

    /// AppKit calls must happen on the main thread.
    #[error("window configuration must run on the main thread")]
    NotMainThread,
}

// ============================================================================
// WindowConfig
// ============================================================================

/// How the timer window behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Requested size before the initial clamp
    pub default_size: Vec2,
    /// Upper bound for the initial side
    pub max_initial_size: f32,
    /// Smallest allowed side
    pub min_size: f32,
    /// Keep the window above other windows
    pub floating: bool,
    /// Show the window on every virtual desktop (macOS)
    pub all_spaces: bool,
    /// Force a square aspect ratio on resize
    pub square: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Visual Timer".to_string(),
            default_size: Vec2::splat(DEFAULT_SIZE),
            max_initial_size: MAX_INITIAL_SIZE,
            min_size: MIN_SIZE,
            floating: true,
            all_spaces: true,
            square: true,
        }
    }
}

impl WindowConfig {
    /// Sets the requested initial side; the initial clamp still applies.
    pub fn with_size(mut self, side: f32) -> Self {
        self.default_size = Vec2::splat(side);
        self.max_initial_size = self.max_initial_size.max(side);
        self
    }

    /// Enables or disables the floating window level.
    pub fn with_floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    /// Enables or disables visibility on all virtual desktops.
    pub fn with_all_spaces(mut self, all_spaces: bool) -> Self {
        self.all_spaces = all_spaces;
        self
    }

    /// Side of the window when it first opens.
    pub fn initial_side(&self) -> f32 {
        initial_side(self.default_size, self.max_initial_size).max(self.min_size)
    }

    /// Window level matching the `floating` flag.
    pub fn window_level(&self) -> WindowLevel {
        if self.floating {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        }
    }

    /// Builds the eframe native options for this configuration.
    pub fn native_options(&self) -> eframe::NativeOptions {
        let side = self.initial_side();
        let viewport = egui::ViewportBuilder::default()
            .with_title(self.title.clone())
            .with_inner_size([side, side])
            .with_min_inner_size([self.min_size, self.min_size])
            .with_resizable(true)
            .with_window_level(self.window_level())
            .with_title_shown(false)
            .with_titlebar_shown(false)
            .with_fullsize_content_view(true);

        eframe::NativeOptions {
            viewport,
            centered: true,
            ..Default::default()
        }
    }
}

/// Initial side: the smaller of the requested dimensions, capped at `max`.
pub fn initial_side(size: Vec2, max: f32) -> f32 {
    size.x.min(size.y).min(max)
}

/// Square size for a resize to `size`: the larger dimension wins.
pub fn square_size(size: Vec2) -> Vec2 {
    Vec2::splat(size.x.max(size.y))
}

/// Returns the size to force if `size` is not square.
pub fn square_correction(size: Vec2) -> Option<Vec2> {
    if (size.x - size.y).abs() > SQUARE_TOLERANCE {
        Some(square_size(size))
    } else {
        None
    }
}

// ============================================================================
// WindowGuard
// ============================================================================

/// Applies a [`WindowConfig`] to the running window.
#[derive(Debug)]
pub struct WindowGuard {
    config: WindowConfig,
    applied: bool,
    focused: Option<bool>,
}

impl WindowGuard {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            applied: false,
            focused: None,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Runs once per frame.
    pub fn update(&mut self, ctx: &egui::Context, frame: &eframe::Frame) {
        if !self.applied {
            self.applied = true;
            self.apply_platform(frame);
        }
        self.enforce(ctx);
    }

    /// Keeps the window square and re-pins the floating level on focus.
    fn enforce(&mut self, ctx: &egui::Context) {
        let (inner_rect, focused) = ctx.input(|i| (i.viewport().inner_rect, i.viewport().focused));

        if self.config.square {
            if let Some(size) = inner_rect.map(|rect| rect.size()).and_then(square_correction) {
                debug!(width = size.x, "Squaring window");
                ctx.send_viewport_cmd(ViewportCommand::InnerSize(size));
            }
        }

        // Re-pin the level whenever the window becomes active again
        if self.config.floating && focused == Some(true) && self.focused != Some(true) {
            ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        }
        self.focused = focused;
    }

    fn apply_platform(&self, frame: &eframe::Frame) {
        if let Err(e) = apply_platform(&self.config, frame) {
            warn!("Window configuration skipped: {}", e);
        }
    }
}

#[cfg(target_os = "macos")]
fn apply_platform(config: &WindowConfig, frame: &eframe::Frame) -> Result<(), WindowError> {
    if config.all_spaces {
        macos::join_all_spaces(frame)?;
    }
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn apply_platform(config: &WindowConfig, _frame: &eframe::Frame) -> Result<(), WindowError> {
    if config.all_spaces {
        debug!("All-spaces visibility is only supported on macOS");
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
