//! Dial geometry.
//!
//! Positions and sizes for everything drawn on the dial, derived from the
//! dial center and diameter. Angles are clock angles in degrees (0° at
//! 12 o'clock, clockwise). Platform-independent and fully testable.

use eframe::egui::{pos2, Pos2, Vec2};

use crate::types::MAX_SECONDS;

/// Share of the available square used by the dial.
pub const DIAL_FILL: f32 = 0.9;

/// Gap between the dial edge and the red sector, in points.
pub const SECTOR_INSET: f32 = 20.0;

/// Segments used for a full-circle sector.
const SECTOR_SEGMENTS: usize = 120;

/// Dial diameter for the given available area.
pub fn dial_diameter(available: Vec2) -> f32 {
    available.x.min(available.y) * DIAL_FILL
}

/// Sweep of the red sector for `remaining_seconds`, in degrees.
pub fn sweep_degrees(remaining_seconds: u32) -> f32 {
    360.0 * remaining_seconds.min(MAX_SECONDS) as f32 / MAX_SECONDS as f32
}

/// Point at `radius` from `center` in the direction of `clock_degrees`.
pub fn point_on_dial(center: Pos2, radius: f32, clock_degrees: f32) -> Pos2 {
    let theta = clock_degrees.to_radians();
    pos2(center.x + radius * theta.sin(), center.y - radius * theta.cos())
}

/// Arc points of a sector starting at 12 o'clock and sweeping clockwise.
///
/// Returns an empty list for a zero sweep. The points exclude the center;
/// callers fan triangles out from it.
pub fn sector_arc(center: Pos2, radius: f32, sweep: f32) -> Vec<Pos2> {
    let sweep = sweep.clamp(0.0, 360.0);
    if sweep <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let segments = ((SECTOR_SEGMENTS as f32 * sweep / 360.0).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| point_on_dial(center, radius, sweep * i as f32 / segments as f32))
        .collect()
}

/// One of the twelve marks around the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub from: Pos2,
    pub to: Pos2,
    pub width: f32,
}

/// The twelve marks, every third one emphasized.
pub fn tick_marks(center: Pos2, diameter: f32) -> Vec<TickMark> {
    let radius = diameter / 2.0;
    let mid = radius - diameter * 0.04;

    (0..12)
        .map(|i| {
            let major = i % 3 == 0;
            let length = if major { diameter * 0.06 } else { diameter * 0.035 };
            let angle = i as f32 * 30.0;
            TickMark {
                from: point_on_dial(center, mid + length / 2.0, angle),
                to: point_on_dial(center, mid - length / 2.0, angle),
                width: if major { 2.5 } else { 1.0 },
            }
        })
        .collect()
}

/// Minute labels at 12, 3, 6 and 9 o'clock.
pub fn minute_labels(center: Pos2, diameter: f32) -> [(Pos2, &'static str); 4] {
    let radius = diameter / 2.0 - diameter * 0.11;
    [
        (point_on_dial(center, radius, 0.0), "60"),
        (point_on_dial(center, radius, 90.0), "15"),
        (point_on_dial(center, radius, 180.0), "30"),
        (point_on_dial(center, radius, 270.0), "45"),
    ]
}

/// Font size for the minute labels.
pub fn label_font_size(diameter: f32) -> f32 {
    diameter * 0.06
}

/// Font size for the `MM:SS` readout.
pub fn readout_font_size(diameter: f32) -> f32 {
    diameter * 0.16
}

/// Font size for the idle hint.
pub fn hint_font_size(diameter: f32) -> f32 {
    diameter * 0.04
}

/// Returns true if `point` lies on the dial disc.
pub fn hits_dial(point: Pos2, center: Pos2, diameter: f32) -> bool {
    point.distance(center) <= diameter / 2.0
}
