use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::ambient::SceneRotation;
use crate::insight::ArboretumData;
use crate::layout::{LayoutCache, LayoutEngine};
use crate::navigation::ViewController;

use super::super::{ViewMode, ViewModel, ViewScratch};

impl ViewModel {
    pub(in crate::app) const DEFAULT_PITCH: f32 = 0.35;

    pub(in crate::app) fn new(
        data: Arc<ArboretumData>,
        engine: LayoutEngine,
        view_mode: ViewMode,
        source_label: String,
    ) -> Self {
        let dangling_count = data.dangling_references().len();
        Self {
            controller: ViewController::new(data),
            layout: LayoutCache::new(engine),
            view_mode,
            source_label,
            pan: Vec2::ZERO,
            zoom: 1.0,
            rotation: SceneRotation::default(),
            pitch: Self::DEFAULT_PITCH,
            particles: HashMap::new(),
            search: String::new(),
            pending_selection: None,
            drawn_thread_count: 0,
            dangling_count,
            view_scratch: ViewScratch::default(),
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, reload_requested: &mut bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("arboretum");
                    ui.separator();
                    let data = self.controller.data();
                    ui.label(format!("source: {}", self.source_label));
                    ui.label(format!("insights: {}", data.len()));
                    ui.label(format!("connections: {}", data.connection_count()));
                    if ui.button("Reload").clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.pan = Vec2::ZERO;
                        self.zoom = 1.0;
                        self.pitch = Self::DEFAULT_PITCH;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.visible_graph_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn visible_graph_text(&self) -> String {
        let visible = self.controller.visible().len();
        let total = self.controller.data().len();
        let mut text = format!(
            "visible {visible}/{total}  |  threads {}",
            self.drawn_thread_count
        );
        if self.dangling_count > 0 {
            text.push_str(&format!("  |  dangling {}", self.dangling_count));
        }
        text
    }
}
