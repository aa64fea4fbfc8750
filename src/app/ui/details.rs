use eframe::egui::{self, Color32, RichText, Ui};
use tracing::warn;

use crate::shadow::{displayed_color, displayed_text, shadow_details};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Insight");
        ui.add_space(6.0);

        let selection_changed = self.take_selection_event().is_some();

        let shadow_mode = self.controller.shadow_mode();
        let Some(insight) = self.controller.selected_insight() else {
            ui.label("Select an insight in the view or search for one.");
            return;
        };

        let color = displayed_color(insight, shadow_mode);
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), 6.0, color);
            ui.label(RichText::new(insight.title.as_str()).strong());
        });
        ui.small(insight.id.as_str());
        ui.add_space(6.0);

        ui.label(displayed_text(insight, shadow_mode));
        for (label, text) in shadow_details(insight, shadow_mode) {
            ui.label(RichText::new(format!("{label}: {text}")).italics());
        }

        ui.separator();
        let foundational = if insight.is_foundational() {
            " (foundational)"
        } else {
            ""
        };
        ui.label(format!("Branch: {}", insight.branch));
        ui.label(format!("Year: {}{foundational}", insight.temporal.year));
        ui.label(format!(
            "Tone: {}  |  intensity {:.2}  |  buoyancy {:+.2}",
            insight.emotion.tone.label(),
            insight.emotion.intensity,
            insight.emotion.buoyancy
        ));
        if !insight.tags.is_empty() {
            ui.label(format!("Tags: {}", insight.tags.join(", ")));
        }
        if !insight.updated_at.is_empty() {
            ui.small(format!("Updated {}", insight.updated_at));
        }

        ui.separator();
        ui.label(RichText::new("Connected insights").strong());

        let neighbors = self
            .controller
            .neighbors()
            .into_iter()
            .map(|neighbor| {
                let visible = self
                    .controller
                    .data()
                    .index_of(&neighbor.id)
                    .is_some_and(|index| self.controller.visible().contains(index));
                (neighbor.id.clone(), neighbor.title.clone(), visible)
            })
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            ui.label("No resolvable connections.");
            return;
        }

        let mut drill_target = None;
        let mut neighbor_scroll = egui::ScrollArea::vertical()
            .id_salt("neighbor_scroll")
            .max_height(320.0)
            .auto_shrink([false, true]);
        if selection_changed {
            neighbor_scroll = neighbor_scroll.vertical_scroll_offset(0.0);
        }
        neighbor_scroll.show(ui, |ui| {
            for (id, title, visible) in &neighbors {
                let label = if *visible {
                    RichText::new(title.as_str())
                } else {
                    RichText::new(format!("{title} (not yet revealed)"))
                        .color(Color32::from_gray(150))
                };
                if ui.link(label).on_hover_text(id.as_str()).clicked() {
                    drill_target = Some(id.clone());
                }
            }
        });

        if let Some(target) = drill_target {
            match self.controller.drill_into(&target) {
                Ok(event) => self.publish_selection(event),
                Err(error) => warn!("drill-down failed: {error}"),
            }
        }
    }
}
