use std::f32::consts::TAU;

use rand::Rng;

use crate::insight::Insight;

use super::{JITTER_RADIANS, PlacementBand, Point3};

const CANOPY_BASE_HEIGHT: f32 = 1.5;
const HEIGHT_PER_DECADE: f32 = 4.0;
const CANOPY_BASE_RADIUS: f32 = 2.0;
const RADIUS_PER_DECADE: f32 = 3.0;
const BUOYANCY_LIFT: f32 = 2.0;
pub(super) const ROOT_RADIUS_RANGE: (f32, f32) = (0.5, 1.5);
pub(super) const ROOT_DEPTH_RANGE: (f32, f32) = (0.5, 2.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumetricPlacement {
    pub band: PlacementBand,
    /// Exact branch table angle for canopy insights; the even root-disk slot
    /// for foundational ones.
    pub base_angle: f32,
    pub angle: f32,
    pub radius: f32,
    /// y is up.
    pub position: Point3,
}

impl VolumetricPlacement {
    pub fn jitter(&self) -> f32 {
        self.angle - self.base_angle
    }
}

/// Years since `base_year`, in decades.
fn decade_offset(year: i32, base_year: i32) -> f32 {
    (year - base_year) as f32 / 10.0
}

/// Trunk height for `year` before the buoyancy lift.
pub fn canopy_height(year: f32, base_year: i32) -> f32 {
    CANOPY_BASE_HEIGHT + (year - base_year as f32) / 10.0 * HEIGHT_PER_DECADE
}

pub fn canopy_radius(year: f32, base_year: i32) -> f32 {
    CANOPY_BASE_RADIUS + (year - base_year as f32) / 10.0 * RADIUS_PER_DECADE
}

pub fn volumetric_layout(insights: &[Insight], rng: &mut impl Rng) -> Vec<VolumetricPlacement> {
    let base_year = insights
        .iter()
        .map(|insight| insight.temporal.year)
        .min()
        .unwrap_or_default();
    let root_total = insights
        .iter()
        .filter(|insight| insight.is_foundational())
        .count()
        .max(1);

    let mut root_index = 0usize;
    insights
        .iter()
        .map(|insight| {
            if insight.is_foundational() {
                let base_angle = root_index as f32 / root_total as f32 * TAU;
                root_index += 1;
                let radius = rng.gen_range(ROOT_RADIUS_RANGE.0..=ROOT_RADIUS_RANGE.1);
                let depth = rng.gen_range(ROOT_DEPTH_RANGE.0..=ROOT_DEPTH_RANGE.1);
                return VolumetricPlacement {
                    band: PlacementBand::Root,
                    base_angle,
                    angle: base_angle,
                    radius,
                    position: Point3::new(
                        base_angle.cos() * radius,
                        -depth,
                        base_angle.sin() * radius,
                    ),
                };
            }

            let base_angle = insight.branch.angle();
            let angle = base_angle + rng.gen_range(-JITTER_RADIANS..=JITTER_RADIANS);
            let offset = decade_offset(insight.temporal.year, base_year);
            let lift = (insight.emotion.buoyancy * 0.5).sin() * BUOYANCY_LIFT;
            let height = CANOPY_BASE_HEIGHT + offset * HEIGHT_PER_DECADE + lift;
            let radius = CANOPY_BASE_RADIUS + offset * RADIUS_PER_DECADE;

            VolumetricPlacement {
                band: PlacementBand::Canopy,
                base_angle,
                angle,
                radius,
                position: Point3::new(angle.cos() * radius, height, angle.sin() * radius),
            }
        })
        .collect()
}
