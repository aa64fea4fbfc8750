//! Coordinate assignment for insights.
//!
//! Both algorithms are pure functions of the insight list, the scene size, and
//! a random source used for the organic angular scatter. Everything the
//! renderers need (branch angle, jitter, band, position) is kept on the
//! placement so callers can reason about it without re-running the layout.

mod cache;
mod planar;
mod volumetric;

use std::ops::{Add, Mul, Sub};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::insight::ArboretumData;

pub use cache::{LayoutCache, SceneLayout};
pub use planar::{PlanarPlacement, planar_layout, planar_ring_radii};
pub use volumetric::{VolumetricPlacement, canopy_height, canopy_radius, volumetric_layout};

/// Maximum angular perturbation applied per insight per layout pass.
pub const JITTER_RADIANS: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementBand {
    /// Foundational insights: near the origin (planar) or below it (volumetric).
    Root,
    Canopy,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSize {
    pub width: f32,
    pub height: f32,
}

impl SceneSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn min_extent(self) -> f32 {
        self.width.min(self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Distance from the vertical axis.
    pub fn horizontal_radius(self) -> f32 {
        self.x.hypot(self.z)
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Owns the random source for layout scatter. A seeded engine reproduces the
/// same placements for the same dataset and scene.
pub struct LayoutEngine {
    rng: StdRng,
}

impl LayoutEngine {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn planar(&mut self, data: &ArboretumData, scene: SceneSize) -> Vec<PlanarPlacement> {
        planar_layout(data.insights(), scene, &mut self.rng)
    }

    pub fn volumetric(&mut self, data: &ArboretumData) -> Vec<VolumetricPlacement> {
        volumetric_layout(data.insights(), &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_math() {
        let a = Point3::new(1.0, 2.0, 2.0);
        assert_eq!(a.length(), 3.0);
        assert_eq!(a.lerp(Point3::ZERO, 0.5), Point3::new(0.5, 1.0, 1.0));
        assert_eq!(Point3::new(3.0, 9.0, 4.0).horizontal_radius(), 5.0);
    }

    #[test]
    fn scene_size_is_never_degenerate() {
        let scene = SceneSize::new(0.0, -5.0);
        assert_eq!(scene.min_extent(), 1.0);
    }
}
