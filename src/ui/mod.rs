//! Presentation layer for the Visual Timer.
//!
//! This module provides:
//! - `geometry`: Dial layout math (sector, marks, labels, fonts)
//! - `dial_view`: Painting the dial and forwarding pointer gestures
//! - `app`: The eframe application wiring the engine and window together

pub mod app;
pub mod dial_view;
pub mod geometry;

pub use app::VisualTimerApp;
pub use dial_view::{DialView, IDLE_HINT};
