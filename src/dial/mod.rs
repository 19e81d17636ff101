//! Dial logic for the Visual Timer.
//!
//! This module provides:
//! - `angle`: pointer position → clock angle → whole minutes
//! - `machine`: the dial state machine driven by drag, tap and tick events
//!
//! Both parts are pure and have no dependency on the windowing layer.

pub mod angle;
pub mod machine;

pub use angle::{angle_from_point, angle_to_minutes, minutes_from_point, Point};
pub use machine::{DialEvent, DialStateMachine, Effect};
