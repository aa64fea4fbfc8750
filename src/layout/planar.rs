use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::insight::{Insight, ThematicBranch};

use super::{JITTER_RADIANS, PlacementBand, SceneSize};

/// Branch arm length as a fraction of the smaller scene extent.
const BRANCH_LENGTH_FRACTION: f32 = 0.42;
/// Innermost canopy radius as a fraction of the branch length.
const CANOPY_INNER_FRACTION: f32 = 0.35;
/// Root band radii as fractions of the smaller scene extent.
pub(super) const ROOT_RADIUS_MIN_FRACTION: f32 = 0.05;
pub(super) const ROOT_RADIUS_MAX_FRACTION: f32 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarPlacement {
    pub band: PlacementBand,
    /// Exact table angle of the insight's branch.
    pub base_angle: f32,
    /// `base_angle` plus the per-layout jitter.
    pub angle: f32,
    pub radius: f32,
    /// World position relative to the diagram center, y pointing down.
    pub position: Vec2,
}

impl PlanarPlacement {
    pub fn jitter(&self) -> f32 {
        self.angle - self.base_angle
    }
}

pub fn planar_layout(
    insights: &[Insight],
    scene: SceneSize,
    rng: &mut impl Rng,
) -> Vec<PlanarPlacement> {
    let min_extent = scene.min_extent();
    let branch_length = min_extent * BRANCH_LENGTH_FRACTION;

    let mut peer_totals: HashMap<ThematicBranch, usize> = HashMap::new();
    for insight in insights.iter().filter(|insight| !insight.is_foundational()) {
        *peer_totals.entry(insight.branch).or_default() += 1;
    }

    let mut peer_seen: HashMap<ThematicBranch, usize> = HashMap::new();
    insights
        .iter()
        .map(|insight| {
            let base_angle = insight.branch.angle();
            let angle = base_angle + rng.gen_range(-JITTER_RADIANS..=JITTER_RADIANS);

            let (band, radius) = if insight.is_foundational() {
                let radius = min_extent
                    * rng.gen_range(ROOT_RADIUS_MIN_FRACTION..=ROOT_RADIUS_MAX_FRACTION);
                (PlacementBand::Root, radius)
            } else {
                let seen = peer_seen.entry(insight.branch).or_default();
                let index = *seen;
                *seen += 1;
                let total = peer_totals.get(&insight.branch).copied().unwrap_or(1).max(1);
                let step = (index + 1) as f32 / total as f32;
                let radius =
                    branch_length * (CANOPY_INNER_FRACTION + (1.0 - CANOPY_INNER_FRACTION) * step);
                (PlacementBand::Canopy, radius)
            };

            PlanarPlacement {
                band,
                base_angle,
                angle,
                radius,
                position: vec2(angle.cos(), angle.sin()) * radius,
            }
        })
        .collect()
}

/// Radii of the concentric guide rings drawn behind the radial diagram.
pub fn planar_ring_radii(scene: SceneSize, ring_count: usize) -> Vec<f32> {
    let branch_length = scene.min_extent() * BRANCH_LENGTH_FRACTION;
    let inner = branch_length * CANOPY_INNER_FRACTION;
    if ring_count == 0 {
        return Vec::new();
    }

    (0..ring_count)
        .map(|ring| {
            let step = (ring + 1) as f32 / ring_count as f32;
            inner + (branch_length - inner) * step
        })
        .collect()
}
