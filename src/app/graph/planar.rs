use eframe::egui::{Painter, Rect, Shape, Stroke, Vec2};

use crate::ambient::{growth_ring_years, pulse_scale};
use crate::layout::{PlanarPlacement, SceneSize, planar_ring_radii};
use crate::threads::planar_threads;

use super::super::ViewModel;
use super::super::render_utils::{bloom_radius, draw_rings, world_to_screen};

const MAX_GUIDE_RINGS: usize = 12;
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

impl ViewModel {
    /// Fills the screen-space scratch from the radial layout.
    pub(super) fn project_planar(&mut self, rect: Rect, placements: &[PlanarPlacement], time: f32) {
        let data = self.controller.data();
        let selected = self.controller.selected_index();
        let scratch = &mut self.view_scratch;

        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        scratch.depths.clear();
        for (index, (insight, placement)) in data.insights().iter().zip(placements).enumerate() {
            scratch
                .screen_positions
                .push(world_to_screen(rect, self.pan, self.zoom, placement.position));

            let mut radius = (bloom_radius(insight.bloom.size) * self.zoom.powf(0.4)).clamp(2.5, 46.0);
            if selected == Some(index) {
                radius *= pulse_scale(time);
            }
            scratch.screen_radii.push(radius);
            scratch.depths.push(0.0);
        }

        scratch.draw_order.clear();
        scratch.draw_order.extend(0..placements.len());
        if let Some(selected) = selected {
            scratch.draw_order.retain(|&index| index != selected);
            scratch.draw_order.push(selected);
        }
    }

    /// One guide circle per growth ring, spread over the canopy band.
    pub(super) fn draw_planar_backdrop(&self, painter: &Painter, rect: Rect, scene: SceneSize) {
        let data = self.controller.data();
        let (Some(base_year), Some(latest_year)) = (data.base_year(), data.latest_year()) else {
            return;
        };
        let rings = growth_ring_years(base_year, latest_year, data.ambient())
            .len()
            .clamp(1, MAX_GUIDE_RINGS);
        let center = world_to_screen(rect, self.pan, self.zoom, Vec2::ZERO);
        draw_rings(painter, center, &planar_ring_radii(scene, rings), self.zoom);
    }

    pub(super) fn draw_planar_threads(
        &mut self,
        painter: &Painter,
        rect: Rect,
        placements: &[PlanarPlacement],
    ) {
        let threads = planar_threads(
            self.controller.data(),
            placements,
            self.controller.visible(),
            self.controller.focus(),
        );

        let zoom_sqrt = self.zoom.sqrt();
        for thread in &threads {
            let from = world_to_screen(rect, self.pan, self.zoom, thread.from);
            let to = world_to_screen(rect, self.pan, self.zoom, thread.to);
            let stroke = Stroke::new(
                (thread.style.width * zoom_sqrt).clamp(0.4, 6.0),
                thread.style.stroke_color(),
            );
            if thread.style.dashed {
                painter.extend(Shape::dashed_line(&[from, to], stroke, DASH_LENGTH, GAP_LENGTH));
            } else {
                painter.line_segment([from, to], stroke);
            }
        }
        self.drawn_thread_count = threads.len();
    }
}
