//! Per-frame motion layered on top of placed insights. None of these touch the
//! layout; they only offset or scale what is already placed.

use std::f32::consts::TAU;

use crate::insight::AmbientConfig;
use crate::util::stable_unit;

pub const ROTATION_SPEED: f32 = 0.05;
const BOB_FREQUENCY: f32 = 1.2;
const BOB_AMPLITUDE: f32 = 0.15;
const PULSE_FREQUENCY: f32 = 3.0;
const PULSE_AMPLITUDE: f32 = 0.08;
const MAX_GROWTH_RINGS: usize = 64;

/// Vertical float offset for an insight; amplitude follows `|buoyancy|`.
pub fn float_offset(id: &str, buoyancy: f32, time: f32) -> f32 {
    let phase = stable_unit(id) * TAU;
    (time * BOB_FREQUENCY + phase).sin() * BOB_AMPLITUDE * buoyancy.abs()
}

pub fn pulse_scale(time: f32) -> f32 {
    1.0 + PULSE_AMPLITUDE * (time * PULSE_FREQUENCY).sin()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneRotation {
    yaw: f32,
}

impl SceneRotation {
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn advance(&mut self, delta_seconds: f32) {
        self.yaw = (self.yaw + delta_seconds.max(0.0) * ROTATION_SPEED).rem_euclid(TAU);
    }

    pub fn nudge(&mut self, radians: f32) {
        self.yaw = (self.yaw + radians).rem_euclid(TAU);
    }
}

/// Years at which growth rings are drawn, from `base_year` through
/// `latest_year`, spaced by `1 / growth_rings_per_year`.
pub fn growth_ring_years(base_year: i32, latest_year: i32, config: &AmbientConfig) -> Vec<f32> {
    if latest_year < base_year || config.growth_rings_per_year <= 0.0 {
        return Vec::new();
    }

    let spacing = 1.0 / config.growth_rings_per_year;
    let span = (latest_year - base_year) as f32;
    // Clamp before the cast; huge densities overflow usize.
    let count = (span / spacing).floor().min((MAX_GROWTH_RINGS - 1) as f32) as usize + 1;
    // Thin out dense configurations so the rings still cover the whole span.
    let spacing = if count == MAX_GROWTH_RINGS && span > 0.0 {
        span / (MAX_GROWTH_RINGS - 1) as f32
    } else {
        spacing
    };

    (0..count)
        .map(|ring| base_year as f32 + ring as f32 * spacing)
        .collect()
}
