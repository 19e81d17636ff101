//! The dial widget: painting and gesture forwarding.

use eframe::egui::{
    vec2, Align2, Color32, FontId, Id, Mesh, Painter, Pos2, Response, Sense, Shape, Stroke, Ui,
};

use super::geometry::{
    dial_diameter, hint_font_size, hits_dial, label_font_size, minute_labels, readout_font_size,
    sector_arc, sweep_degrees, tick_marks, SECTOR_INSET,
};
use crate::dial::{angle_from_point, DialEvent, Point};
use crate::engine::TimerEngine;
use crate::types::{DialPhase, TimerSession};

// ============================================================================
// Colors
// ============================================================================

const SECTOR_COLOR: Color32 = Color32::from_rgba_premultiplied(204, 47, 38, 204);
const FACE_COLOR: Color32 = Color32::from_rgba_premultiplied(7, 7, 7, 13);
const SHADOW_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 26);
const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(38, 38, 38, 77);
const MARK_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 102);
const LABEL_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 153);
const READOUT_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 217);
const HINT_COLOR: Color32 = Color32::GRAY;

/// Hint shown while nothing is set.
pub const IDLE_HINT: &str = "Drag to set";

/// Sector animation length while counting down, in seconds.
const RUNNING_ANIMATION: f32 = 1.0;

/// Sector animation length while setting, in seconds.
const SETTING_ANIMATION: f32 = 0.1;

// ============================================================================
// DialView
// ============================================================================

/// Draws the dial and turns pointer gestures into dial events.
#[derive(Debug)]
pub struct DialView {
    id: Id,
    dragging: bool,
}

impl Default for DialView {
    fn default() -> Self {
        Self::new()
    }
}

impl DialView {
    pub fn new() -> Self {
        Self {
            id: Id::new("visual_timer_dial"),
            dragging: false,
        }
    }

    /// Lays out the dial in the available space, forwards this frame's
    /// gestures to `engine` and paints the result.
    pub fn show(&mut self, ui: &mut Ui, engine: &mut TimerEngine) {
        let (center, diameter, events) = self.interact(ui);
        for event in events {
            engine.dispatch(event);
        }

        let session = engine.session();
        let animation = if session.is_running() {
            RUNNING_ANIMATION
        } else {
            SETTING_ANIMATION
        };
        let sweep = ui.ctx().animate_value_with_time(
            self.id,
            sweep_degrees(session.remaining_seconds()),
            animation,
        );

        paint_dial(ui.painter(), center, diameter, sweep, session);
    }

    /// Allocates the dial area and returns its center, diameter and the
    /// events produced by this frame's pointer input.
    fn interact(&mut self, ui: &mut Ui) -> (Pos2, f32, Vec<DialEvent>) {
        let available = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(available, Sense::click_and_drag());
        let center = rect.center();
        let diameter = dial_diameter(rect.size());

        let events = self.gestures(ui, &response, center, diameter);
        (center, diameter, events)
    }

    fn gestures(
        &mut self,
        ui: &Ui,
        response: &Response,
        center: Pos2,
        diameter: f32,
    ) -> Vec<DialEvent> {
        let mut events = Vec::new();

        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin());
            if origin.is_some_and(|p| hits_dial(p, center, diameter)) {
                self.dragging = true;
                events.push(DialEvent::DragStart);
            }
        }

        if self.dragging {
            if response.dragged() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    events.push(DialEvent::DragMove {
                        angle: clock_angle(pointer, center),
                    });
                }
            } else {
                self.dragging = false;
                events.push(DialEvent::DragEnd);
            }
        } else if response.clicked()
            && response
                .interact_pointer_pos()
                .is_some_and(|p| hits_dial(p, center, diameter))
        {
            events.push(DialEvent::Tap);
        }

        events
    }
}

fn clock_angle(pointer: Pos2, center: Pos2) -> f64 {
    angle_from_point(
        Point::new(f64::from(pointer.x), f64::from(pointer.y)),
        Point::new(f64::from(center.x), f64::from(center.y)),
    )
}

// ============================================================================
// Painting
// ============================================================================

fn paint_dial(painter: &Painter, center: Pos2, diameter: f32, sweep: f32, session: &TimerSession) {
    let radius = diameter / 2.0;

    painter.circle_filled(center + vec2(0.0, 4.0), radius, SHADOW_COLOR);
    painter.circle_filled(center, radius, Color32::WHITE);
    painter.circle_filled(center, radius, FACE_COLOR);
    painter.circle_stroke(center, radius, Stroke::new(2.0, BORDER_COLOR));

    let sector_radius = (diameter - SECTOR_INSET) / 2.0;
    painter.add(Shape::mesh(sector_mesh(center, sector_radius, sweep, SECTOR_COLOR)));

    for mark in tick_marks(center, diameter) {
        painter.line_segment([mark.from, mark.to], Stroke::new(mark.width, MARK_COLOR));
    }

    let label_font = FontId::proportional(label_font_size(diameter));
    for (pos, text) in minute_labels(center, diameter) {
        painter.text(pos, Align2::CENTER_CENTER, text, label_font.clone(), LABEL_COLOR);
    }

    let readout = readout_font_size(diameter);
    let show_hint = session.phase() == DialPhase::Idle;
    let readout_center = if show_hint {
        center - vec2(0.0, hint_font_size(diameter) / 2.0)
    } else {
        center
    };
    painter.text(
        readout_center,
        Align2::CENTER_CENTER,
        session.time_string(),
        FontId::monospace(readout),
        READOUT_COLOR,
    );

    if show_hint {
        painter.text(
            readout_center + vec2(0.0, readout / 2.0 + 2.0),
            Align2::CENTER_TOP,
            IDLE_HINT,
            FontId::proportional(hint_font_size(diameter)),
            HINT_COLOR,
        );
    }
}

/// Triangle fan covering the red sector.
fn sector_mesh(center: Pos2, radius: f32, sweep: f32, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    let arc = sector_arc(center, radius, sweep);
    if arc.is_empty() {
        return mesh;
    }

    mesh.colored_vertex(center, color);
    for point in &arc {
        mesh.colored_vertex(*point, color);
    }
    for i in 1..arc.len() as u32 {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}
