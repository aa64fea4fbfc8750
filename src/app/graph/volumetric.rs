use std::collections::HashSet;
use std::f32::consts::TAU;

use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, vec2};

use crate::ambient::{float_offset, growth_ring_years, pulse_scale};
use crate::layout::{Point3, VolumetricPlacement, canopy_height, canopy_radius};
use crate::threads::{FlowParticle, ThreadKey, volumetric_threads};
use crate::util::stable_unit;

use super::super::ViewModel;
use super::super::render_utils::{bloom_radius, with_alpha};

const ARC_SEGMENTS: usize = 24;
const RING_SEGMENTS: usize = 48;
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;
const SCREEN_FILL: f32 = 0.45;

/// Orbit camera around the trunk for one frame.
pub(super) struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    focus_height: f32,
    distance: f32,
    focal: f32,
    origin: Pos2,
}

impl OrbitCamera {
    /// Screen position and perspective scale (1.0 at the focus distance).
    fn project(&self, point: Point3) -> (Pos2, f32, f32) {
        let y = point.y - self.focus_height;
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let x = point.x * yaw_cos + point.z * yaw_sin;
        let z = -point.x * yaw_sin + point.z * yaw_cos;

        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        let view_y = y * pitch_cos - z * pitch_sin;
        let view_z = y * pitch_sin + z * pitch_cos;

        let depth = (view_z + self.distance).max(0.1);
        let perspective = self.distance / depth;
        let scale = self.focal * perspective;
        (self.origin + vec2(x * scale, -view_y * scale), depth, perspective)
    }

    fn project_polyline(&self, points: impl IntoIterator<Item = Point3>) -> Vec<Pos2> {
        points
            .into_iter()
            .map(|point| self.project(point).0)
            .collect()
    }
}

fn bob_point(placement: &VolumetricPlacement, offset: f32) -> Point3 {
    placement.position + Point3::new(0.0, offset, 0.0)
}

impl ViewModel {
    pub(super) fn orbit_camera(&self, rect: Rect, placements: &[VolumetricPlacement]) -> OrbitCamera {
        let (low, high, reach) = placements.iter().fold(
            (0.0_f32, 0.0_f32, 1.0_f32),
            |(low, high, reach), placement| {
                (
                    low.min(placement.position.y),
                    high.max(placement.position.y),
                    reach.max(placement.position.horizontal_radius()),
                )
            },
        );
        let extent = reach.max((high - low) * 0.5) + 1.0;
        let distance = extent * 3.0;

        OrbitCamera {
            yaw: self.rotation.yaw(),
            pitch: self.pitch,
            focus_height: (low + high) * 0.5,
            distance,
            focal: rect.width().min(rect.height()) * SCREEN_FILL / extent * self.zoom,
            origin: rect.center() + self.pan,
        }
    }

    /// Fills the screen-space scratch from the tree layout, far insights first.
    pub(super) fn project_volumetric(
        &mut self,
        camera: &OrbitCamera,
        placements: &[VolumetricPlacement],
        time: f32,
    ) {
        let data = self.controller.data();
        let selected = self.controller.selected_index();
        let scratch = &mut self.view_scratch;

        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        scratch.depths.clear();
        for (index, (insight, placement)) in data.insights().iter().zip(placements).enumerate() {
            let offset = float_offset(&insight.id, insight.emotion.buoyancy, time);
            let (position, depth, perspective) = camera.project(bob_point(placement, offset));
            let mut radius =
                (bloom_radius(insight.bloom.size) * perspective * self.zoom.powf(0.4)).clamp(2.0, 52.0);
            if selected == Some(index) {
                radius *= pulse_scale(time);
            }
            scratch.screen_positions.push(position);
            scratch.screen_radii.push(radius);
            scratch.depths.push(depth);
        }

        scratch.draw_order.clear();
        scratch.draw_order.extend(0..placements.len());
        let depths = &scratch.depths;
        scratch
            .draw_order
            .sort_by(|a, b| depths[*b].total_cmp(&depths[*a]));
    }

    pub(super) fn draw_volumetric_backdrop(&self, painter: &Painter, camera: &OrbitCamera) {
        let data = self.controller.data();
        let (Some(base_year), Some(latest_year)) = (data.base_year(), data.latest_year()) else {
            return;
        };

        let trunk_top = canopy_height(latest_year as f32, base_year);
        let trunk = camera.project_polyline([Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, trunk_top, 0.0)]);
        painter.add(Shape::line(
            trunk,
            Stroke::new(3.0, Color32::from_rgba_unmultiplied(120, 92, 64, 200)),
        ));

        let ring_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 90));
        for year in growth_ring_years(base_year, latest_year, data.ambient()) {
            let height = canopy_height(year, base_year);
            let radius = canopy_radius(year, base_year);
            let ring = camera.project_polyline((0..RING_SEGMENTS).map(|step| {
                let angle = step as f32 / RING_SEGMENTS as f32 * TAU;
                Point3::new(angle.cos() * radius, height, angle.sin() * radius)
            }));
            painter.add(Shape::closed_line(ring, ring_stroke));
        }
    }

    pub(super) fn draw_volumetric_threads(
        &mut self,
        painter: &Painter,
        camera: &OrbitCamera,
        placements: &[VolumetricPlacement],
        time: f32,
        delta_seconds: f32,
    ) {
        let data = self.controller.data();
        let threads = volumetric_threads(
            data,
            placements,
            self.controller.visible(),
            self.controller.focus(),
        );
        let flow = data.ambient().particle_flow;
        let bob = |index: usize| {
            data.insights()
                .get(index)
                .map(|insight| float_offset(&insight.id, insight.emotion.buoyancy, time))
                .unwrap_or(0.0)
        };

        let mut live = HashSet::with_capacity(threads.len());
        for thread in &threads {
            let source_bob = bob(thread.edge.key.source);
            let target_bob = bob(thread.edge.target);
            let lifted = |t: f32, point: Point3| {
                point + Point3::new(0.0, source_bob + (target_bob - source_bob) * t, 0.0)
            };

            let points = camera.project_polyline(
                thread
                    .arc
                    .sample(ARC_SEGMENTS)
                    .into_iter()
                    .enumerate()
                    .map(|(step, point)| lifted(step as f32 / ARC_SEGMENTS as f32, point)),
            );
            let stroke = Stroke::new(
                (thread.style.width * self.zoom.sqrt()).clamp(0.4, 6.0),
                thread.style.stroke_color(),
            );
            if thread.style.dashed {
                painter.extend(Shape::dashed_line(&points, stroke, DASH_LENGTH, GAP_LENGTH));
            } else {
                painter.add(Shape::line(points, stroke));
            }

            let key = thread.edge.key;
            let particle = self
                .particles
                .entry(key)
                .or_insert_with(|| FlowParticle::new(particle_phase(key)));
            particle.advance(delta_seconds, thread.edge.strength, flow.speed);
            let progress = particle.progress();
            let (position, _, perspective) =
                camera.project(lifted(progress, thread.arc.point_at(progress)));
            painter.circle_filled(
                position,
                (flow.size * perspective).clamp(1.0, 8.0),
                with_alpha(thread.style.color, 0.85),
            );
            live.insert(key);
        }

        self.particles.retain(|key, _| live.contains(key));
        self.drawn_thread_count = threads.len();
    }
}

fn particle_phase(key: ThreadKey) -> f32 {
    stable_unit(&format!("{}:{}", key.source, key.connection))
}
