//! The eframe application.

use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;

use super::dial_view::DialView;
use crate::engine::TimerEngine;
use crate::sound::{AlarmPlayer, AlarmSettings};
use crate::window::{WindowConfig, WindowGuard};

/// Top-level application state owned by eframe.
#[derive(Debug)]
pub struct VisualTimerApp {
    engine: TimerEngine,
    dial: DialView,
    window: WindowGuard,
}

impl VisualTimerApp {
    /// Builds the app on the UI thread; ticks run on `runtime`.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Handle,
        window: WindowConfig,
        alarm: &AlarmSettings,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let ctx = cc.egui_ctx.clone();
        let engine = TimerEngine::new(runtime, AlarmPlayer::from_settings(alarm))
            .with_notifier(Arc::new(move || ctx.request_repaint()));

        Self::from_parts(engine, window)
    }

    /// Builds the app around an existing engine.
    pub fn from_parts(engine: TimerEngine, window: WindowConfig) -> Self {
        Self {
            engine,
            dial: DialView::new(),
            window: WindowGuard::new(window),
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }
}

impl eframe::App for VisualTimerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.window.update(ctx, frame);
        self.engine.pump();

        let panel = egui::Frame::none().fill(ctx.style().visuals.panel_fill);
        egui::CentralPanel::default().frame(panel).show(ctx, |ui| {
            self.dial.show(ui, &mut self.engine);
        });
    }
}
