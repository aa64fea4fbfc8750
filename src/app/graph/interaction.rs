use eframe::egui::{self, Pos2, Rect, Ui};
use tracing::{info, warn};

use crate::navigation::InsightSelected;

use super::super::ViewModel;
use super::super::render_utils::{circle_visible, screen_to_world};

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Primary drag orbits the volumetric scene.
    pub(in crate::app) fn handle_graph_orbit(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.rotation.nudge(delta.x * 0.01);
            self.pitch = (self.pitch + delta.y * 0.005).clamp(-0.2, 1.2);
        }
    }

    /// Indices of insights that are revealed and on screen.
    pub(in crate::app) fn visible_indices(&self, rect: Rect) -> Vec<usize> {
        let scratch = &self.view_scratch;
        self.controller
            .visible()
            .indices()
            .filter(|&index| {
                scratch.screen_positions.get(index).is_some_and(|position| {
                    circle_visible(rect, *position, scratch.screen_radii[index])
                })
            })
            .collect()
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        candidates: &[usize],
        positions: &[Pos2],
        radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        candidates
            .iter()
            .filter_map(|&index| {
                let distance = positions[index].distance(pointer);
                (distance <= radii[index]).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn select_insight(&mut self, id: &str) {
        match self.controller.select(id) {
            Ok(Some(event)) => self.publish_selection(event),
            Ok(None) => {}
            Err(error) => warn!("selection failed: {error}"),
        }
    }

    pub(in crate::app) fn publish_selection(&mut self, event: InsightSelected) {
        info!(insight = event.id.as_str(), "insight selected");
        self.pending_selection = Some(event);
    }

    pub(in crate::app) fn take_selection_event(&mut self) -> Option<InsightSelected> {
        self.pending_selection.take()
    }

    pub(in crate::app) fn apply_graph_click(&mut self, clicked: Option<usize>) {
        match clicked {
            Some(index) => {
                let id = self.controller.data().insights()[index].id.clone();
                self.select_insight(&id);
            }
            None => self.controller.clear_selection(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::ViewMode;
    use crate::layout::LayoutEngine;
    use crate::test_support::worked_example;

    fn view_model() -> ViewModel {
        ViewModel::new(
            Arc::new(worked_example()),
            LayoutEngine::seeded(1),
            ViewMode::Planar,
            "fixture".to_owned(),
        )
    }

    #[test]
    fn selection_events_are_consumed_once() {
        let mut model = view_model();
        assert_eq!(model.take_selection_event(), None);

        model.select_insight("I2");
        assert_eq!(
            model.take_selection_event(),
            Some(InsightSelected { id: "I2".to_owned() })
        );
        assert_eq!(model.take_selection_event(), None);

        model.select_insight("I2");
        assert_eq!(model.take_selection_event(), None);
    }

    #[test]
    fn clicking_empty_space_clears_without_an_event() {
        let mut model = view_model();
        model.apply_graph_click(Some(1));
        assert_eq!(model.controller.selected_index(), Some(1));
        assert!(model.take_selection_event().is_some());

        model.apply_graph_click(None);
        assert_eq!(model.controller.selected_index(), None);
        assert_eq!(model.take_selection_event(), None);
    }

    #[test]
    fn unknown_ids_publish_nothing() {
        let mut model = view_model();
        model.select_insight("missing");
        assert_eq!(model.controller.selected_index(), None);
        assert_eq!(model.take_selection_event(), None);
    }
}
