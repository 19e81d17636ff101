//! CLI module for the Visual Timer.
//!
//! - `commands`: Option definitions using clap derive

pub mod commands;

pub use commands::{Cli, MAX_WINDOW_SIZE, MIN_WINDOW_SIZE};
