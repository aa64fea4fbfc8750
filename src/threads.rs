//! Memory threads: the drawable form of connections.
//!
//! Resolution is shared by both renderers. Every outgoing connection of a
//! visible insight either resolves to a visible target or is dropped with a
//! reason; renderers draw the resolved ones and ignore the rest.

use eframe::egui::{Color32, Vec2};

use crate::insight::{ArboretumData, ConnectionType};
use crate::layout::{PlanarPlacement, Point3, VolumetricPlacement};
use crate::reveal::VisibleSet;

pub const BASE_OPACITY: f32 = 0.6;
pub const BASE_WIDTH: f32 = 0.6;
pub const WIDTH_PER_STRENGTH: f32 = 2.0;
pub const EMPHASIS_OPACITY: f32 = 0.35;
pub const EMPHASIS_WIDTH: f32 = 1.5;
/// Arc control point rise as a fraction of endpoint distance.
pub const ARC_LIFT: f32 = 0.3;

/// Identifies one declared connection: the source insight and the position of
/// the connection in its list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThreadKey {
    pub source: usize,
    pub connection: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedEdge {
    pub key: ThreadKey,
    pub target: usize,
    pub kind: ConnectionType,
    pub strength: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// No insight with the target id exists in the dataset.
    UnknownTarget,
    /// The target exists but the reveal filter currently hides it.
    TargetHidden,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DroppedEdge {
    pub key: ThreadKey,
    pub target_id: String,
    pub reason: DropReason,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeResolution {
    Resolved(ResolvedEdge),
    Dropped(DroppedEdge),
}

impl EdgeResolution {
    pub fn resolved(&self) -> Option<&ResolvedEdge> {
        match self {
            Self::Resolved(edge) => Some(edge),
            Self::Dropped(_) => None,
        }
    }
}

pub fn resolve_edges(data: &ArboretumData, visible: &VisibleSet) -> Vec<EdgeResolution> {
    let mut resolutions = Vec::new();
    for source in visible.indices() {
        let Some(insight) = data.insights().get(source) else {
            continue;
        };

        for (connection_index, connection) in insight.connections.iter().enumerate() {
            let key = ThreadKey {
                source,
                connection: connection_index,
            };
            let resolution = match data.index_of(&connection.target_id) {
                Some(target) if visible.contains(target) => {
                    EdgeResolution::Resolved(ResolvedEdge {
                        key,
                        target,
                        kind: connection.kind,
                        strength: connection.strength,
                    })
                }
                Some(_) => EdgeResolution::Dropped(DroppedEdge {
                    key,
                    target_id: connection.target_id.clone(),
                    reason: DropReason::TargetHidden,
                }),
                None => EdgeResolution::Dropped(DroppedEdge {
                    key,
                    target_id: connection.target_id.clone(),
                    reason: DropReason::UnknownTarget,
                }),
            };
            resolutions.push(resolution);
        }
    }
    resolutions
}

/// Insights that elevate every thread touching them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThreadFocus {
    pub hovered: Option<usize>,
    pub selected: Option<usize>,
}

impl ThreadFocus {
    pub fn touches(&self, edge: &ResolvedEdge) -> bool {
        [self.hovered, self.selected]
            .into_iter()
            .flatten()
            .any(|index| index == edge.key.source || index == edge.target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreadStyle {
    pub color: Color32,
    pub opacity: f32,
    pub width: f32,
    pub dashed: bool,
}

impl ThreadStyle {
    /// Type color with the style opacity folded into alpha.
    pub fn stroke_color(&self) -> Color32 {
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), alpha)
    }
}

pub fn thread_style(kind: ConnectionType, strength: f32, emphasized: bool) -> ThreadStyle {
    let strength = strength.clamp(0.0, 1.0);
    let mut opacity = BASE_OPACITY * strength;
    let mut width = BASE_WIDTH + WIDTH_PER_STRENGTH * strength;
    if emphasized {
        opacity = (opacity + EMPHASIS_OPACITY).min(1.0);
        width += EMPHASIS_WIDTH;
    }

    ThreadStyle {
        color: kind.color(),
        opacity,
        width,
        dashed: kind.is_dashed(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarThread {
    pub edge: ResolvedEdge,
    pub from: Vec2,
    pub to: Vec2,
    pub style: ThreadStyle,
    pub emphasized: bool,
}

pub fn planar_threads(
    data: &ArboretumData,
    placements: &[PlanarPlacement],
    visible: &VisibleSet,
    focus: ThreadFocus,
) -> Vec<PlanarThread> {
    resolve_edges(data, visible)
        .iter()
        .filter_map(EdgeResolution::resolved)
        .filter_map(|edge| {
            let from = placements.get(edge.key.source)?.position;
            let to = placements.get(edge.target)?.position;
            let emphasized = focus.touches(edge);
            Some(PlanarThread {
                edge: *edge,
                from,
                to,
                style: thread_style(edge.kind, edge.strength, emphasized),
                emphasized,
            })
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticArc {
    pub start: Point3,
    pub control: Point3,
    pub end: Point3,
}

impl QuadraticArc {
    pub fn between(start: Point3, end: Point3) -> Self {
        let lift = start.distance(end) * ARC_LIFT;
        let midpoint = start.lerp(end, 0.5);
        Self {
            start,
            control: midpoint + Point3::new(0.0, lift, 0.0),
            end,
        }
    }

    pub fn point_at(&self, t: f32) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let inverse = 1.0 - t;
        self.start * (inverse * inverse) + self.control * (2.0 * inverse * t) + self.end * (t * t)
    }

    /// `segments + 1` evenly spaced points from start to end.
    pub fn sample(&self, segments: usize) -> Vec<Point3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|step| self.point_at(step as f32 / segments as f32))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumetricThread {
    pub edge: ResolvedEdge,
    pub arc: QuadraticArc,
    pub style: ThreadStyle,
    pub emphasized: bool,
}

pub fn volumetric_threads(
    data: &ArboretumData,
    placements: &[VolumetricPlacement],
    visible: &VisibleSet,
    focus: ThreadFocus,
) -> Vec<VolumetricThread> {
    resolve_edges(data, visible)
        .iter()
        .filter_map(EdgeResolution::resolved)
        .filter_map(|edge| {
            let start = placements.get(edge.key.source)?.position;
            let end = placements.get(edge.target)?.position;
            let emphasized = focus.touches(edge);
            Some(VolumetricThread {
                edge: *edge,
                arc: QuadraticArc::between(start, end),
                style: thread_style(edge.kind, edge.strength, emphasized),
                emphasized,
            })
        })
        .collect()
}

/// Particle travelling along a volumetric thread, looping from 0 to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowParticle {
    progress: f32,
}

impl FlowParticle {
    pub fn new(progress: f32) -> Self {
        Self {
            progress: progress.rem_euclid(1.0),
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Advances by `strength * speed` loops per second.
    pub fn advance(&mut self, delta_seconds: f32, strength: f32, speed: f32) {
        let step = delta_seconds.max(0.0) * strength.clamp(0.0, 1.0) * speed.max(0.0);
        self.progress = (self.progress + step).rem_euclid(1.0);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::layout::{SceneSize, planar_layout, volumetric_layout};
    use crate::test_support::{worked_example, worked_example_with_dangling};

    #[test]
    fn worked_example_edge_appears_with_full_reveal() {
        let data = worked_example();
        let placements =
            planar_layout(data.insights(), SceneSize::new(800.0, 800.0), &mut StdRng::seed_from_u64(1));

        let spring = VisibleSet::compute(&data, 0.35);
        assert!(planar_threads(&data, &placements, &spring, ThreadFocus::default()).is_empty());
        let resolutions = resolve_edges(&data, &spring);
        assert_eq!(resolutions.len(), 1);
        assert!(matches!(
            &resolutions[0],
            EdgeResolution::Dropped(DroppedEdge { reason: DropReason::TargetHidden, target_id, .. })
                if target_id == "I3"
        ));

        let summer = VisibleSet::compute(&data, 0.75);
        let threads = planar_threads(&data, &placements, &summer, ThreadFocus::default());
        assert_eq!(threads.len(), 1);
        let thread = &threads[0];
        assert_eq!(thread.edge.kind, ConnectionType::Contrasts);
        assert_eq!(thread.from, placements[1].position);
        assert_eq!(thread.to, placements[2].position);
        assert!((thread.style.opacity - 0.8 * BASE_OPACITY).abs() < 1e-6);
        assert!(!thread.style.dashed);
    }

    #[test]
    fn dangling_targets_draw_nothing() {
        let data = worked_example_with_dangling();
        let visible = VisibleSet::all(data.len());
        let placements = volumetric_layout(data.insights(), &mut StdRng::seed_from_u64(2));

        let resolutions = resolve_edges(&data, &visible);
        let unknown = resolutions
            .iter()
            .filter(|resolution| {
                matches!(
                    resolution,
                    EdgeResolution::Dropped(DroppedEdge { reason: DropReason::UnknownTarget, .. })
                )
            })
            .count();
        assert_eq!(unknown, 1);

        let threads = volumetric_threads(&data, &placements, &visible, ThreadFocus::default());
        assert!(threads.iter().all(|thread| thread.edge.key.source != 0));
    }

    #[test]
    fn hidden_sources_are_not_traversed() {
        let data = worked_example();
        let winter = VisibleSet::compute(&data, 0.0);
        assert!(resolve_edges(&data, &winter).is_empty());
    }

    #[test]
    fn focus_adds_emphasis_on_top_of_strength() {
        let plain = thread_style(ConnectionType::Echoes, 0.5, false);
        let focused = thread_style(ConnectionType::Echoes, 0.5, true);
        assert!(plain.dashed);
        assert!((plain.opacity - 0.3).abs() < 1e-6);
        assert!((focused.opacity - (0.3 + EMPHASIS_OPACITY)).abs() < 1e-6);
        assert!((focused.width - plain.width - EMPHASIS_WIDTH).abs() < 1e-6);
        assert!(thread_style(ConnectionType::Heals, 1.0, true).opacity <= 1.0);

        let edge = ResolvedEdge {
            key: ThreadKey {
                source: 1,
                connection: 0,
            },
            target: 2,
            kind: ConnectionType::Heals,
            strength: 1.0,
        };
        assert!(ThreadFocus { hovered: Some(2), selected: None }.touches(&edge));
        assert!(ThreadFocus { hovered: None, selected: Some(1) }.touches(&edge));
        assert!(!ThreadFocus { hovered: Some(0), selected: Some(3) }.touches(&edge));
    }

    #[test]
    fn arc_control_point_rises_with_distance() {
        let arc = QuadraticArc::between(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 3.0));
        assert_eq!(arc.control, Point3::new(2.0, 1.5, 1.5));
        assert_eq!(arc.point_at(0.0), arc.start);
        assert_eq!(arc.point_at(1.0), arc.end);
        let apex = arc.point_at(0.5);
        assert!((apex.y - 0.75).abs() < 1e-6);
        assert_eq!(arc.sample(8).len(), 9);
    }

    #[test]
    fn particles_loop_at_strength_scaled_rate() {
        let mut particle = FlowParticle::default();
        particle.advance(1.0, 0.5, 0.5);
        assert!((particle.progress() - 0.25).abs() < 1e-6);
        particle.advance(4.0, 0.5, 0.5);
        assert!((particle.progress() - 0.25).abs() < 1e-5);
        particle.advance(1.0, 0.0, 0.5);
        assert!((particle.progress() - 0.25).abs() < 1e-5);
        assert!((FlowParticle::new(1.75).progress() - 0.75).abs() < 1e-6);
    }
}
