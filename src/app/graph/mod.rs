use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, Ui, vec2};

use crate::layout::SceneSize;
use crate::shadow::displayed_color;
use crate::util::truncate_label;

use super::render_utils::{blend_color, draw_background, with_alpha};
use super::{ViewMode, ViewModel};

mod interaction;
mod planar;
mod volumetric;

const LABEL_CHARS: usize = 28;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.controller.shadow_mode());

        if self.controller.data().is_empty() {
            self.drawn_thread_count = 0;
            ui.label("The dataset contains no insights.");
            return;
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let (time, delta_seconds) = ui.input(|input| {
            (
                input.time as f32,
                input.stable_dt.clamp(1.0 / 240.0, 1.0 / 20.0),
            )
        });
        let scene = SceneSize::new(rect.width(), rect.height());
        let layout = self.layout.layout(self.controller.data(), scene);

        match self.view_mode {
            ViewMode::Planar => {
                self.project_planar(rect, &layout.planar, time);
                self.draw_planar_backdrop(&painter, rect, scene);
                if self.controller.show_connections() {
                    self.draw_planar_threads(&painter, rect, &layout.planar);
                } else {
                    self.drawn_thread_count = 0;
                }
            }
            ViewMode::Volumetric => {
                self.handle_graph_orbit(&response);
                self.rotation.advance(delta_seconds);
                let camera = self.orbit_camera(rect, &layout.volumetric);
                self.project_volumetric(&camera, &layout.volumetric, time);
                self.draw_volumetric_backdrop(&painter, &camera);
                if self.controller.show_connections() {
                    self.draw_volumetric_threads(
                        &painter,
                        &camera,
                        &layout.volumetric,
                        time,
                        delta_seconds,
                    );
                } else {
                    self.drawn_thread_count = 0;
                    self.particles.clear();
                }
            }
        }

        let candidates = self.visible_indices(rect);
        let hovered = Self::hovered_index(
            ui,
            &candidates,
            &self.view_scratch.screen_positions,
            &self.view_scratch.screen_radii,
        );
        let hovered_id = hovered.map(|index| self.controller.data().insights()[index].id.clone());
        self.controller.hover(hovered_id.as_deref());

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_click = response
            .clicked_by(egui::PointerButton::Primary)
            .then_some(hovered);

        self.draw_nodes(&painter, rect, time);

        if let Some(index) = hovered {
            self.draw_hover_summary(&painter, rect, index);
        }

        if let Some(clicked) = pending_click {
            self.apply_graph_click(clicked);
        }

        ui.ctx().request_repaint();
    }

    fn draw_nodes(&self, painter: &Painter, rect: Rect, time: f32) {
        let data = self.controller.data();
        let visible = self.controller.visible();
        let shadow_mode = self.controller.shadow_mode();
        let selected = self.controller.selected_index();
        let hovered = self.controller.hovered_index();
        let scratch = &self.view_scratch;
        let selected_color = Color32::from_rgb(245, 206, 93);

        for index in scratch.draw_order.iter().copied() {
            if !visible.contains(index) {
                continue;
            }
            let (Some(insight), Some(&position), Some(&radius)) = (
                data.insights().get(index),
                scratch.screen_positions.get(index),
                scratch.screen_radii.get(index),
            ) else {
                continue;
            };
            if !rect.expand(radius * 2.0).contains(position) {
                continue;
            }

            let is_selected = selected == Some(index);
            let is_hovered = hovered == Some(index);
            let base = displayed_color(insight, shadow_mode);
            let color = if is_hovered {
                blend_color(base, Color32::WHITE, 0.25)
            } else {
                base
            };

            if insight.bloom.glow > 0.0 {
                painter.circle_filled(
                    position,
                    radius * (1.0 + insight.bloom.glow * 0.8),
                    with_alpha(color, insight.bloom.glow * 0.22),
                );
            }
            painter.circle_filled(position, radius, color);

            let outline = if insight.is_foundational() {
                Stroke::new(1.8, Color32::from_rgba_unmultiplied(150, 110, 70, 220))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.circle_stroke(position, radius, outline);

            if is_selected {
                let ripple = (time * 2.0).sin() * 0.5 + 0.5;
                painter.circle_stroke(
                    position,
                    radius + 4.0 + ripple * 3.0,
                    Stroke::new(1.6, with_alpha(selected_color, 0.45 + ripple * 0.4)),
                );
            }

            if is_selected || is_hovered || radius > 15.0 || self.zoom > 1.35 {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    truncate_label(&insight.title, LABEL_CHARS),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }
    }

    fn draw_hover_summary(&self, painter: &Painter, rect: Rect, index: usize) {
        let Some(insight) = self.controller.data().insights().get(index) else {
            return;
        };
        let panel_text = format!(
            "{}  |  {}  |  {}  |  threads {}",
            truncate_label(&insight.title, 48),
            insight.branch,
            insight.temporal.year,
            insight.connections.len()
        );
        painter.text(
            rect.left_top() + vec2(10.0, 10.0),
            Align2::LEFT_TOP,
            panel_text,
            FontId::proportional(13.0),
            Color32::from_gray(240),
        );
    }
}
