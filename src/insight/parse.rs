use serde::Deserialize;
use tracing::warn;

use crate::util::parse_hex_color;

use super::error::DataError;
use super::model::{
    AmbientConfig, ArboretumData, Bloom, Connection, ConnectionType, Emotion, EmotionalTone,
    Insight, ParticleFlow, ShadowSelf, Temporal, ThematicBranch,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawArboretum {
    #[serde(default)]
    pub(super) insights: Vec<RawInsight>,
    #[serde(default)]
    pub(super) ambient: Option<RawAmbient>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawInsight {
    pub(super) id: String,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) content: String,
    pub(super) branch: String,
    pub(super) temporal: RawTemporal,
    pub(super) emotion: RawEmotion,
    #[serde(default)]
    pub(super) shadow_self: Option<RawShadowSelf>,
    pub(super) bloom: RawBloom,
    #[serde(default)]
    pub(super) tags: Vec<String>,
    #[serde(default)]
    pub(super) connections: Vec<RawConnection>,
    #[serde(default)]
    pub(super) updated_at: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawTemporal {
    pub(super) year: i32,
    #[serde(default)]
    pub(super) is_foundational: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawEmotion {
    pub(super) tone: String,
    #[serde(default)]
    pub(super) intensity: f32,
    #[serde(default)]
    pub(super) buoyancy: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawShadowSelf {
    pub(super) inversion: String,
    #[serde(default)]
    pub(super) underlying_fear: Option<String>,
    #[serde(default)]
    pub(super) avoidance: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawBloom {
    pub(super) color: String,
    #[serde(default = "default_bloom_size")]
    pub(super) size: f32,
    #[serde(default)]
    pub(super) glow: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawConnection {
    pub(super) target_id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(default)]
    pub(super) strength: f32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawAmbient {
    #[serde(default)]
    pub(super) growth_rings_per_year: Option<f32>,
    #[serde(default)]
    pub(super) particle_flow: Option<RawParticleFlow>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawParticleFlow {
    #[serde(default)]
    pub(super) speed: Option<f32>,
    #[serde(default)]
    pub(super) size: Option<f32>,
}

fn default_bloom_size() -> f32 {
    1.0
}

pub fn parse_arboretum(raw: &str) -> Result<ArboretumData, DataError> {
    let parsed: RawArboretum = serde_json::from_str(raw)?;
    into_model(parsed)
}

pub(super) fn into_model(raw: RawArboretum) -> Result<ArboretumData, DataError> {
    let insights = raw
        .insights
        .into_iter()
        .map(convert_insight)
        .collect::<Result<Vec<_>, _>>()?;
    let ambient = convert_ambient(raw.ambient.unwrap_or_default());

    ArboretumData::new(insights, ambient)
}

/// Clamps `value` into `[min, max]`, logging when the input was out of range.
/// Non-finite inputs collapse to `fallback`.
fn clamp_field(insight: &str, field: &str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if !value.is_finite() {
        warn!(insight, field, "non-finite value replaced with {fallback}");
        return fallback;
    }

    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(insight, field, value, clamped, "value outside [{min}, {max}] clamped");
    }
    clamped
}

fn convert_insight(raw: RawInsight) -> Result<Insight, DataError> {
    let id = raw.id.trim().to_owned();

    let branch = raw
        .branch
        .parse::<ThematicBranch>()
        .map_err(|()| DataError::UnknownBranch {
            insight: id.clone(),
            value: raw.branch.clone(),
        })?;

    let tone = raw
        .emotion
        .tone
        .parse::<EmotionalTone>()
        .map_err(|()| DataError::UnknownTone {
            insight: id.clone(),
            value: raw.emotion.tone.clone(),
        })?;

    let color = parse_hex_color(&raw.bloom.color).ok_or_else(|| DataError::InvalidColor {
        insight: id.clone(),
        value: raw.bloom.color.clone(),
    })?;

    let connections = raw
        .connections
        .into_iter()
        .map(|connection| {
            let target_id = connection.target_id.trim().to_owned();
            let kind = connection.kind.parse::<ConnectionType>().map_err(|()| {
                DataError::UnknownConnectionType {
                    insight: id.clone(),
                    target: target_id.clone(),
                    value: connection.kind.clone(),
                }
            })?;
            Ok(Connection {
                strength: clamp_field(&id, "strength", connection.strength, 0.0, 1.0, 0.0),
                target_id,
                kind,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    let emotion = Emotion {
        tone,
        intensity: clamp_field(&id, "intensity", raw.emotion.intensity, 0.0, 1.0, 0.0),
        buoyancy: clamp_field(&id, "buoyancy", raw.emotion.buoyancy, -1.0, 1.0, 0.0),
    };

    let bloom = Bloom {
        color,
        size: clamp_field(&id, "size", raw.bloom.size, 0.0, f32::MAX, 1.0),
        glow: clamp_field(&id, "glow", raw.bloom.glow, 0.0, 1.0, 0.0),
    };

    let shadow_self = raw.shadow_self.map(|shadow| ShadowSelf {
        inversion: shadow.inversion,
        underlying_fear: shadow.underlying_fear.filter(|value| !value.trim().is_empty()),
        avoidance: shadow.avoidance.filter(|value| !value.trim().is_empty()),
    });

    Ok(Insight {
        id,
        title: raw.title,
        content: raw.content,
        branch,
        temporal: Temporal {
            year: raw.temporal.year,
            is_foundational: raw.temporal.is_foundational,
        },
        emotion,
        shadow_self,
        bloom,
        tags: raw.tags,
        connections,
        updated_at: raw.updated_at,
    })
}

fn convert_ambient(raw: RawAmbient) -> AmbientConfig {
    let defaults = AmbientConfig::default();
    let flow = raw.particle_flow.unwrap_or_default();

    AmbientConfig {
        growth_rings_per_year: raw
            .growth_rings_per_year
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(defaults.growth_rings_per_year),
        particle_flow: ParticleFlow {
            speed: flow
                .speed
                .filter(|value| value.is_finite() && *value >= 0.0)
                .unwrap_or(defaults.particle_flow.speed),
            size: flow
                .size
                .filter(|value| value.is_finite() && *value > 0.0)
                .unwrap_or(defaults.particle_flow.size),
        },
    }
}
